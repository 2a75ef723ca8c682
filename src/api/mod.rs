//! Ledger boundary: operations rendered as [`LedgerResponse`]s for the
//! feedback side. Data-level failures become `status: false` responses;
//! storage failures are returned as errors for the caller to handle.

pub mod attendance;
pub mod user;

use tracing::error;

use crate::error::LedgerResult;
use crate::models::LedgerResponse;

pub(crate) fn render<T>(
    result: LedgerResult<T>,
    on_success: impl FnOnce(T) -> LedgerResponse,
) -> LedgerResult<LedgerResponse> {
    match result {
        Ok(value) => Ok(on_success(value)),
        Err(e) if e.is_recoverable() => Ok(LedgerResponse::failure(&e)),
        Err(e) => {
            error!(error = %e, "ledger storage failure");
            Err(e)
        }
    }
}
