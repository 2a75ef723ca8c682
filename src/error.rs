//! Error types for the attendance ledger.

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("User already exists.")]
    DuplicateUser,

    #[error("User not found.")]
    UserNotFound,

    #[error("Access Denied. ( Disabled User )")]
    AccessDenied,

    #[error("Once exited, you cannot enter back on the same day.")]
    AlreadyExited,

    #[error("User is already {state}.")]
    AlreadyInState { state: &'static str },

    #[error("No users found.")]
    EmptyStore,

    #[error("No attendance records found for {0}.")]
    NoRecordsForDate(NaiveDate),

    #[error("Invalid {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("Exit time {exit} is earlier than entry time {entry}.")]
    ExitBeforeEntry { entry: String, exit: String },

    #[error("Persistence failure: {0}")]
    PersistenceFailure(String),
}

impl LedgerError {
    /// Data-level conditions are expected outcomes; only storage failures are not.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, LedgerError::PersistenceFailure(_))
    }

    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        LedgerError::InvalidField {
            field,
            reason: reason.into(),
        }
    }
}

impl From<std::io::Error> for LedgerError {
    fn from(e: std::io::Error) -> Self {
        LedgerError::PersistenceFailure(e.to_string())
    }
}

impl From<csv::Error> for LedgerError {
    fn from(e: csv::Error) -> Self {
        LedgerError::PersistenceFailure(e.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for LedgerError {
    fn from(_: std::sync::PoisonError<T>) -> Self {
        LedgerError::PersistenceFailure("table lock poisoned".to_string())
    }
}

pub type LedgerResult<T> = Result<T, LedgerError>;
