use serde::Serialize;
use serde_json::Value;
use tracing::error;

use crate::error::LedgerError;
use crate::model::user::{EmployeeId, User};

/// Result object handed to the feedback side (LED, LCD, log).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LedgerResponse {
    pub status: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl LedgerResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            status: true,
            message: message.into(),
            count: None,
            data: None,
        }
    }

    pub fn failure(err: &LedgerError) -> Self {
        Self {
            status: false,
            message: err.to_string(),
            count: None,
            data: None,
        }
    }

    /// Attach `data`. If it cannot be encoded the response is sent without
    /// it and the encoding error is logged.
    pub fn with_data<T: Serialize>(mut self, data: &T) -> Self {
        match serde_json::to_value(data) {
            Ok(value) => self.data = Some(value),
            Err(e) => {
                error!(error = %e, message = %self.message, "failed to encode response data");
                self.data = None;
            }
        }
        self
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }
}

/// Employee fields echoed back on an attendance event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmployeeSummary {
    pub employee_id: EmployeeId,
    pub first_name: String,
    pub last_name: String,
}

impl From<&User> for EmployeeSummary {
    fn from(user: &User) -> Self {
        Self {
            employee_id: user.employee_id.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
        }
    }
}
