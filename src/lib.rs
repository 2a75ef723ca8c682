//! File-backed attendance ledger.
//!
//! Owns the users table and one attendance table per calendar day, and turns
//! recognized fingerprint identifiers into entry/exit records.

pub mod api;
pub mod config;
pub mod db;
pub mod engine;
pub mod error;
pub mod ledger;
pub mod model;
pub mod models;
pub mod store;
pub mod utils;

pub use engine::{AttendanceEngine, AttendanceOutcome, OutcomeKind};
pub use error::{LedgerError, LedgerResult};
pub use ledger::{Ledger, LedgerConfig};
pub use models::LedgerResponse;
