use chrono::NaiveDateTime;
use derive_more::{AsRef, Display};
use serde::{Deserialize, Deserializer, Serialize, de::Error};

use crate::error::{LedgerError, LedgerResult};
use crate::utils::csv_format::{created_at, text_bool};

fn validate_identifier(field: &'static str, raw: &str) -> LedgerResult<String> {
    let id = raw.trim();
    if id.is_empty() {
        return Err(LedgerError::invalid(field, "must not be empty"));
    }
    if id.chars().any(char::is_control) {
        return Err(LedgerError::invalid(field, "must not contain control characters"));
    }
    Ok(id.to_string())
}

/// HR identifier. Kept as text so `007` never becomes `7`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Display, AsRef, Serialize)]
#[as_ref(forward)]
#[serde(transparent)]
pub struct EmployeeId(String);

impl EmployeeId {
    pub fn parse(raw: &str) -> LedgerResult<Self> {
        validate_identifier("employee_id", raw).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for EmployeeId {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(d)?;
        Self::parse(&raw).map_err(D::Error::custom)
    }
}

/// Identifier produced by the fingerprint matcher; opaque to the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Display, AsRef, Serialize)]
#[as_ref(forward)]
#[serde(transparent)]
pub struct FingerprintId(String);

impl FingerprintId {
    pub fn parse(raw: &str) -> LedgerResult<Self> {
        validate_identifier("fingerprint_id", raw).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for FingerprintId {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(d)?;
        Self::parse(&raw).map_err(D::Error::custom)
    }
}

/// One row of the users table. Field order is the column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub employee_id: EmployeeId,
    pub first_name: String,
    pub last_name: String,
    pub fingerprint_id: FingerprintId,
    #[serde(with = "text_bool")]
    pub is_disabled: bool,
    #[serde(with = "created_at")]
    pub created_at: NaiveDateTime,
}

pub const USER_HEADERS: &[&str] = &[
    "employee_id",
    "first_name",
    "last_name",
    "fingerprint_id",
    "is_disabled",
    "created_at",
];

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn state_label(&self) -> &'static str {
        if self.is_disabled { "disabled" } else { "enabled" }
    }
}

/// Enrollment request as received from the enrollment harness, before normalization.
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub fingerprint_id: String,
    pub employee_id: String,
}
