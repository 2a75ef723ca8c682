use chrono::{NaiveDate, NaiveDateTime};

use crate::api::render;
use crate::error::LedgerResult;
use crate::ledger::Ledger;
use crate::models::LedgerResponse;

/// Scan handler: `data` carries the employee fields for the LCD/log line.
pub fn record_attendance(
    ledger: &Ledger,
    fingerprint_id: &str,
    now: NaiveDateTime,
) -> LedgerResult<LedgerResponse> {
    render(ledger.record_attendance(fingerprint_id, now), |outcome| {
        LedgerResponse::ok(outcome.message()).with_data(&outcome.employee)
    })
}

pub fn fetch_attendance(ledger: &Ledger, date: NaiveDate) -> LedgerResult<LedgerResponse> {
    render(ledger.fetch_attendance(date), |records| {
        LedgerResponse::ok("Attendance records fetched successfully.")
            .with_count(records.len())
            .with_data(&records)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::StorageLayout;
    use crate::ledger::LedgerConfig;
    use tempfile::tempdir;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 8, 3)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn scan_responses_follow_the_day() {
        let dir = tempdir().unwrap();
        let ledger = Ledger::open(&LedgerConfig::new(StorageLayout::under(dir.path()))).unwrap();
        ledger.enroll_user("barbara", "liskov", "21", "E21").unwrap();

        let entry = record_attendance(&ledger, "21", at(9, 0)).unwrap();
        assert!(entry.status);
        assert_eq!(entry.message, "Entry successful. Welcome Barbara Liskov!");
        assert_eq!(entry.data.unwrap()["employee_id"], "E21");

        let exit = record_attendance(&ledger, "21", at(17, 0)).unwrap();
        assert_eq!(exit.message, "Exit successful. Goodbye Barbara Liskov!");

        let again = record_attendance(&ledger, "21", at(18, 0)).unwrap();
        assert!(!again.status);
        assert_eq!(again.message, "Once exited, you cannot enter back on the same day.");

        let unknown = record_attendance(&ledger, "77", at(9, 0)).unwrap();
        assert_eq!(unknown.message, "User not found.");
    }

    #[test]
    fn fetch_reports_rows_or_missing_day() {
        let dir = tempdir().unwrap();
        let ledger = Ledger::open(&LedgerConfig::new(StorageLayout::under(dir.path()))).unwrap();
        ledger.enroll_user("edsger", "dijkstra", "30", "E30").unwrap();
        record_attendance(&ledger, "30", at(10, 31)).unwrap();

        let day = fetch_attendance(&ledger, at(0, 0).date()).unwrap();
        assert!(day.status);
        assert_eq!(day.count, Some(1));
        let rows = day.data.unwrap();
        assert_eq!(rows[0]["status"], "IN");
        assert_eq!(rows[0]["is_late"], "True");
        assert_eq!(rows[0]["entry_time"], "10:31:00 AM");

        let other = NaiveDate::from_ymd_opt(2026, 8, 4).unwrap();
        let none = fetch_attendance(&ledger, other).unwrap();
        assert!(!none.status);
        assert_eq!(none.message, "No attendance records found for 2026-08-04.");
    }
}
