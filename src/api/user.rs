use chrono::NaiveDateTime;

use crate::api::render;
use crate::error::LedgerResult;
use crate::ledger::Ledger;
use crate::model::user::NewUser;
use crate::models::LedgerResponse;

/// Enroll a user; `data` is the stored row.
pub fn enroll_user(
    ledger: &Ledger,
    payload: &NewUser,
    now: NaiveDateTime,
) -> LedgerResult<LedgerResponse> {
    render(ledger.enroll_user_at(payload, now), |user| {
        LedgerResponse::ok("User enrolled successfully.").with_data(&user)
    })
}

pub fn fetch_all_users(ledger: &Ledger) -> LedgerResult<LedgerResponse> {
    render(ledger.fetch_all_users(), |users| {
        LedgerResponse::ok("Users fetched successfully.")
            .with_count(users.len())
            .with_data(&users)
    })
}

pub fn fetch_user(ledger: &Ledger, fingerprint_id: &str) -> LedgerResult<LedgerResponse> {
    render(ledger.fetch_user(fingerprint_id), |user| {
        LedgerResponse::ok("User fetched successfully.").with_data(&user)
    })
}

pub fn delete_user(ledger: &Ledger, fingerprint_id: &str) -> LedgerResult<LedgerResponse> {
    render(ledger.delete_user(fingerprint_id), |_| {
        LedgerResponse::ok("User deleted successfully.")
    })
}

pub fn enable_user(ledger: &Ledger, fingerprint_id: &str) -> LedgerResult<LedgerResponse> {
    render(ledger.enable_user(fingerprint_id), |_| {
        LedgerResponse::ok("User enabled successfully.")
    })
}

pub fn disable_user(ledger: &Ledger, fingerprint_id: &str) -> LedgerResult<LedgerResponse> {
    render(ledger.disable_user(fingerprint_id), |_| {
        LedgerResponse::ok("User disabled successfully.")
    })
}
