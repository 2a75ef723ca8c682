use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use tracing::debug;

use crate::error::{LedgerError, LedgerResult};
use crate::model::attendance::{ATTENDANCE_HEADERS, AttendanceRecord};
use crate::utils::csv_format::DATE_FORMAT;
use crate::utils::csv_utils::{read_table, write_table};

const DAY_TABLE_EXT: &str = "csv";

/// One table file per calendar day, `<dir>/<YYYY-MM-DD>.csv`.
///
/// Each day has its own lock so that two writers never interleave the
/// read-modify-rewrite of the same file.
#[derive(Debug)]
pub struct AttendanceStore {
    dir: PathBuf,
    day_locks: Mutex<HashMap<NaiveDate, Arc<Mutex<()>>>>,
}

impl AttendanceStore {
    pub fn open(dir: impl Into<PathBuf>) -> LedgerResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;

        Ok(Self {
            dir,
            day_locks: Mutex::new(HashMap::new()),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn day_path(&self, date: NaiveDate) -> PathBuf {
        self.dir
            .join(format!("{}.{}", date.format(DATE_FORMAT), DAY_TABLE_EXT))
    }

    /// Lock for one day table. Locks nobody else holds are dropped on the
    /// way, so the map only keeps days that are in use.
    fn day_lock(&self, date: NaiveDate) -> LedgerResult<Arc<Mutex<()>>> {
        let mut locks = self.day_locks.lock()?;
        locks.retain(|d, lock| *d == date || Arc::strong_count(lock) > 1);
        Ok(locks.entry(date).or_default().clone())
    }

    /// Rows of an existing day table.
    pub fn fetch_day(&self, date: NaiveDate) -> LedgerResult<Vec<AttendanceRecord>> {
        let lock = self.day_lock(date)?;
        let _guard = lock.lock()?;

        let path = self.day_path(date);
        if !path.exists() {
            return Err(LedgerError::NoRecordsForDate(date));
        }
        read_table(&path, ATTENDANCE_HEADERS)
    }

    /// Load the day table (empty if it does not exist yet), let `f` change it
    /// and rewrite the file. Nothing is written when `f` fails.
    pub fn update_day<T>(
        &self,
        date: NaiveDate,
        f: impl FnOnce(&mut Vec<AttendanceRecord>) -> LedgerResult<T>,
    ) -> LedgerResult<T> {
        let lock = self.day_lock(date)?;
        let _guard = lock.lock()?;

        let path = self.day_path(date);
        let mut records = if path.exists() {
            read_table(&path, ATTENDANCE_HEADERS)?
        } else {
            debug!(%date, "starting new day table");
            Vec::new()
        };

        let out = f(&mut records)?;
        write_table(&path, ATTENDANCE_HEADERS, &records)?;
        Ok(out)
    }

    /// Dates that have a day table, oldest first.
    pub fn dates(&self) -> LedgerResult<Vec<NaiveDate>> {
        let mut dates = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(DAY_TABLE_EXT) {
                continue;
            }
            let parsed = path
                .file_stem()
                .and_then(|s| s.to_str())
                .and_then(|s| NaiveDate::parse_from_str(s, DATE_FORMAT).ok());
            // `2026-5-3.csv` parses too, but is not the file `fetch_day` reads.
            if let Some(date) = parsed.filter(|d| self.day_path(*d) == path) {
                dates.push(date);
            }
        }
        dates.sort_unstable();
        Ok(dates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::attendance::AttendanceStatus;
    use crate::model::user::{EmployeeId, FingerprintId, User};
    use chrono::NaiveTime;
    use tempfile::tempdir;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 5, d).unwrap()
    }

    fn record(emp: &str, day: NaiveDate) -> AttendanceRecord {
        let user = User {
            employee_id: EmployeeId::parse(emp).unwrap(),
            first_name: "Alan".into(),
            last_name: "Turing".into(),
            fingerprint_id: FingerprintId::parse("1").unwrap(),
            is_disabled: false,
            created_at: day.and_hms_opt(7, 0, 0).unwrap(),
        };
        AttendanceRecord::entry(&user, day, NaiveTime::from_hms_opt(9, 5, 0).unwrap(), false)
    }

    #[test]
    fn missing_day_is_no_records() {
        let dir = tempdir().unwrap();
        let store = AttendanceStore::open(dir.path()).unwrap();

        let err = store.fetch_day(date(1)).unwrap_err();
        assert!(matches!(err, LedgerError::NoRecordsForDate(d) if d == date(1)));
    }

    #[test]
    fn update_creates_file_named_by_date() {
        let dir = tempdir().unwrap();
        let store = AttendanceStore::open(dir.path()).unwrap();

        store
            .update_day(date(2), |rows| {
                rows.push(record("E1", date(2)));
                Ok(())
            })
            .unwrap();

        assert!(dir.path().join("2026-05-02.csv").is_file());
        let rows = store.fetch_day(date(2)).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].status, AttendanceStatus::In);
    }

    #[test]
    fn failed_update_writes_nothing() {
        let dir = tempdir().unwrap();
        let store = AttendanceStore::open(dir.path()).unwrap();

        let err = store
            .update_day(date(3), |rows| -> LedgerResult<()> {
                rows.push(record("E1", date(3)));
                Err(LedgerError::AlreadyExited)
            })
            .unwrap_err();

        assert!(matches!(err, LedgerError::AlreadyExited));
        assert!(!store.day_path(date(3)).exists());
    }

    #[test]
    fn dates_lists_day_tables_only() {
        let dir = tempdir().unwrap();
        let store = AttendanceStore::open(dir.path()).unwrap();
        for d in [date(9), date(4)] {
            store
                .update_day(d, |rows| {
                    rows.push(record("E1", d));
                    Ok(())
                })
                .unwrap();
        }
        fs::write(dir.path().join("notes.txt"), "x").unwrap();
        fs::write(dir.path().join("backup.csv"), "x").unwrap();
        fs::write(dir.path().join("2026-5-7.csv"), "x").unwrap();

        assert_eq!(store.dates().unwrap(), vec![date(4), date(9)]);
    }

    #[test]
    fn idle_day_locks_are_released() {
        let dir = tempdir().unwrap();
        let store = AttendanceStore::open(dir.path()).unwrap();
        for d in 1..=5 {
            store
                .update_day(date(d), |rows| {
                    rows.push(record("E1", date(d)));
                    Ok(())
                })
                .unwrap();
        }

        let held = store.day_lock(date(10)).unwrap();
        store.fetch_day(date(5)).unwrap();

        let locks = store.day_locks.lock().unwrap();
        assert_eq!(locks.len(), 2);
        assert!(locks.contains_key(&date(10)));
        assert!(locks.contains_key(&date(5)));
        drop(held);
    }
}
