use std::sync::Arc;

use chrono::NaiveDateTime;
use serde::Serialize;
use strum_macros::Display;
use tracing::{info, instrument, warn};

use crate::error::{LedgerError, LedgerResult};
use crate::model::attendance::AttendanceRecord;
use crate::model::user::FingerprintId;
use crate::models::EmployeeSummary;
use crate::store::{AttendanceStore, UserStore};
use crate::utils::time_policy::{LatePolicy, truncate};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum OutcomeKind {
    Entry,
    Exit,
}

/// What a recognized scan did to the day table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttendanceOutcome {
    pub kind: OutcomeKind,
    pub employee: EmployeeSummary,
    pub record: AttendanceRecord,
}

impl AttendanceOutcome {
    pub fn message(&self) -> String {
        let name = format!("{} {}", self.employee.first_name, self.employee.last_name);
        match self.kind {
            OutcomeKind::Entry => format!("Entry successful. Welcome {}!", name),
            OutcomeKind::Exit => format!("Exit successful. Goodbye {}!", name),
        }
    }
}

/// Turns a recognized identifier into an entry or exit on the day table.
#[derive(Debug, Clone)]
pub struct AttendanceEngine {
    users: Arc<UserStore>,
    days: Arc<AttendanceStore>,
    policy: LatePolicy,
}

impl AttendanceEngine {
    pub fn new(users: Arc<UserStore>, days: Arc<AttendanceStore>, policy: LatePolicy) -> Self {
        Self {
            users,
            days,
            policy,
        }
    }

    pub fn policy(&self) -> LatePolicy {
        self.policy
    }

    #[instrument(skip(self, fingerprint_id), fields(fingerprint_id = %fingerprint_id))]
    pub fn record(
        &self,
        fingerprint_id: &FingerprintId,
        now: NaiveDateTime,
    ) -> LedgerResult<AttendanceOutcome> {
        let result = self.apply(fingerprint_id, truncate(now));

        match &result {
            Ok(outcome) => info!(
                employee_id = %outcome.employee.employee_id,
                kind = %outcome.kind,
                is_late = outcome.record.is_late,
                "attendance recorded"
            ),
            Err(e) if e.is_recoverable() => warn!(reason = %e, "attendance rejected"),
            Err(_) => {}
        }
        result
    }

    fn apply(&self, fingerprint_id: &FingerprintId, now: NaiveDateTime) -> LedgerResult<AttendanceOutcome> {
        let user = self.users.get(fingerprint_id)?;
        if user.is_disabled {
            return Err(LedgerError::AccessDenied);
        }

        let date = now.date();
        let time = now.time();

        self.days.update_day(date, |records| {
            let existing = records
                .iter()
                .position(|r| r.employee_id == user.employee_id && r.created_at == date);

            let (kind, record) = match existing {
                None => {
                    let record = AttendanceRecord::entry(&user, date, time, self.policy.is_late(time));
                    records.push(record.clone());
                    (OutcomeKind::Entry, record)
                }
                Some(idx) if records[idx].is_open() => {
                    let record = &mut records[idx];
                    let total = self.policy.total_time(record.entry_time, time)?;
                    record.close(time, total);
                    (OutcomeKind::Exit, record.clone())
                }
                Some(_) => return Err(LedgerError::AlreadyExited),
            };

            Ok(AttendanceOutcome {
                kind,
                employee: EmployeeSummary::from(&user),
                record,
            })
        })
    }
}
