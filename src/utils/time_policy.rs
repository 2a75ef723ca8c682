use chrono::{Duration, NaiveDateTime, NaiveTime, Timelike};
use once_cell::sync::Lazy;

use crate::error::{LedgerError, LedgerResult};
use crate::utils::csv_format::CLOCK_FORMAT;

/// Entries strictly after 10:30:00 local time are late.
pub static DEFAULT_LATE_THRESHOLD: Lazy<NaiveTime> =
    Lazy::new(|| NaiveTime::from_hms_opt(10, 30, 0).expect("10:30:00 is a valid time of day"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatePolicy {
    pub threshold: NaiveTime,
}

impl Default for LatePolicy {
    fn default() -> Self {
        Self {
            threshold: *DEFAULT_LATE_THRESHOLD,
        }
    }
}

impl LatePolicy {
    pub fn new(threshold: NaiveTime) -> Self {
        Self {
            threshold: truncate_time(threshold),
        }
    }

    pub fn is_late(&self, entry: NaiveTime) -> bool {
        entry > self.threshold
    }

    /// Time-of-day difference between exit and entry.
    ///
    /// An exit earlier than the entry is rejected instead of producing a negative duration.
    pub fn total_time(&self, entry: NaiveTime, exit: NaiveTime) -> LedgerResult<Duration> {
        if exit < entry {
            return Err(LedgerError::ExitBeforeEntry {
                entry: entry.format(CLOCK_FORMAT).to_string(),
                exit: exit.format(CLOCK_FORMAT).to_string(),
            });
        }
        Ok(exit - entry)
    }
}

/// Drop sub-second precision; the on-disk formats only carry whole seconds.
pub fn truncate(now: NaiveDateTime) -> NaiveDateTime {
    now.with_nanosecond(0).unwrap_or(now)
}

pub fn truncate_time(t: NaiveTime) -> NaiveTime {
    t.with_nanosecond(0).unwrap_or(t)
}
