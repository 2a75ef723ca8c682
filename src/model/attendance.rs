use chrono::{Duration, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::model::user::{EmployeeId, User};
use crate::utils::csv_format::{clock_time, opt_clock_time, opt_total_time, text_bool};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
pub enum AttendanceStatus {
    #[serde(rename = "IN")]
    #[strum(serialize = "IN")]
    In,
    #[serde(rename = "OUT")]
    #[strum(serialize = "OUT")]
    Out,
}

/// One row of a day table. Name fields are a snapshot taken at entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub employee_id: EmployeeId,
    pub first_name: String,
    pub last_name: String,
    #[serde(with = "clock_time")]
    pub entry_time: NaiveTime,
    #[serde(with = "opt_clock_time")]
    pub exit_time: Option<NaiveTime>,
    pub status: AttendanceStatus,
    #[serde(with = "opt_total_time")]
    pub total_time: Option<Duration>,
    #[serde(with = "text_bool")]
    pub is_late: bool,
    pub created_at: NaiveDate,
}

pub const ATTENDANCE_HEADERS: &[&str] = &[
    "employee_id",
    "first_name",
    "last_name",
    "entry_time",
    "exit_time",
    "status",
    "total_time",
    "is_late",
    "created_at",
];

impl AttendanceRecord {
    pub fn entry(user: &User, date: NaiveDate, entry_time: NaiveTime, is_late: bool) -> Self {
        Self {
            employee_id: user.employee_id.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            entry_time,
            exit_time: None,
            status: AttendanceStatus::In,
            total_time: None,
            is_late,
            created_at: date,
        }
    }

    pub fn close(&mut self, exit_time: NaiveTime, total_time: Duration) {
        self.exit_time = Some(exit_time);
        self.total_time = Some(total_time);
        self.status = AttendanceStatus::Out;
    }

    pub fn is_open(&self) -> bool {
        self.status == AttendanceStatus::In
    }
}
