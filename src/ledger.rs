use std::sync::Arc;

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};
use tracing::{info, instrument};

use crate::db::{StorageLayout, init_storage};
use crate::engine::{AttendanceEngine, AttendanceOutcome};
use crate::error::LedgerResult;
use crate::model::attendance::AttendanceRecord;
use crate::model::user::{EmployeeId, FingerprintId, NewUser, User};
use crate::store::{AttendanceStore, UserStore};
use crate::utils::time_policy::LatePolicy;

#[derive(Debug, Clone)]
pub struct LedgerConfig {
    pub layout: StorageLayout,
    pub late_threshold: NaiveTime,
}

impl LedgerConfig {
    pub fn new(layout: StorageLayout) -> Self {
        Self {
            layout,
            late_threshold: LatePolicy::default().threshold,
        }
    }
}

/// Owner of the users table and the day tables.
///
/// Every read or write of either goes through here; the stores are created
/// once and handed to the attendance engine.
#[derive(Debug, Clone)]
pub struct Ledger {
    users: Arc<UserStore>,
    days: Arc<AttendanceStore>,
    engine: AttendanceEngine,
}

fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

impl Ledger {
    pub fn open(config: &LedgerConfig) -> LedgerResult<Self> {
        init_storage(&config.layout)?;

        let users = Arc::new(UserStore::open(&config.layout.users_csv)?);
        let days = Arc::new(AttendanceStore::open(&config.layout.attendance_dir)?);
        let engine = AttendanceEngine::new(
            Arc::clone(&users),
            Arc::clone(&days),
            LatePolicy::new(config.late_threshold),
        );

        info!(
            users_csv = %config.layout.users_csv.display(),
            attendance_dir = %config.layout.attendance_dir.display(),
            late_threshold = %config.late_threshold,
            "ledger opened"
        );

        Ok(Self {
            users,
            days,
            engine,
        })
    }

    pub fn engine(&self) -> &AttendanceEngine {
        &self.engine
    }

    // -------------------- Users --------------------

    pub fn enroll_user(
        &self,
        first_name: &str,
        last_name: &str,
        fingerprint_id: &str,
        employee_id: &str,
    ) -> LedgerResult<User> {
        let new_user = NewUser {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            fingerprint_id: fingerprint_id.to_string(),
            employee_id: employee_id.to_string(),
        };
        self.enroll_user_at(&new_user, local_now())
    }

    #[instrument(skip(self, new_user), fields(employee_id = %new_user.employee_id.trim()))]
    pub fn enroll_user_at(&self, new_user: &NewUser, now: NaiveDateTime) -> LedgerResult<User> {
        self.users.enroll(new_user, now)
    }

    pub fn fetch_all_users(&self) -> LedgerResult<Vec<User>> {
        self.users.all()
    }

    pub fn fetch_user(&self, fingerprint_id: &str) -> LedgerResult<User> {
        self.users.get(&FingerprintId::parse(fingerprint_id)?)
    }

    pub fn fetch_user_by_employee_id(&self, employee_id: &str) -> LedgerResult<User> {
        self.users.find_by_employee_id(&EmployeeId::parse(employee_id)?)
    }

    #[instrument(skip(self))]
    pub fn delete_user(&self, fingerprint_id: &str) -> LedgerResult<User> {
        self.users.delete(&FingerprintId::parse(fingerprint_id)?)
    }

    #[instrument(skip(self))]
    pub fn enable_user(&self, fingerprint_id: &str) -> LedgerResult<User> {
        self.users.set_disabled(&FingerprintId::parse(fingerprint_id)?, false)
    }

    #[instrument(skip(self))]
    pub fn disable_user(&self, fingerprint_id: &str) -> LedgerResult<User> {
        self.users.set_disabled(&FingerprintId::parse(fingerprint_id)?, true)
    }

    // -------------------- Attendance --------------------

    pub fn record_attendance(
        &self,
        fingerprint_id: &str,
        now: NaiveDateTime,
    ) -> LedgerResult<AttendanceOutcome> {
        self.engine.record(&FingerprintId::parse(fingerprint_id)?, now)
    }

    /// Record a scan using the host's local clock.
    pub fn record_attendance_now(&self, fingerprint_id: &str) -> LedgerResult<AttendanceOutcome> {
        self.record_attendance(fingerprint_id, local_now())
    }

    pub fn fetch_attendance(&self, date: NaiveDate) -> LedgerResult<Vec<AttendanceRecord>> {
        self.days.fetch_day(date)
    }

    pub fn fetch_today_attendance(&self) -> LedgerResult<Vec<AttendanceRecord>> {
        self.fetch_attendance(local_now().date())
    }

    pub fn attendance_dates(&self) -> LedgerResult<Vec<NaiveDate>> {
        self.days.dates()
    }
}
