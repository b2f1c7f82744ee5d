//! Holiday lookup error types.

use debitcal_shared::types::HolidayZoneId;
use thiserror::Error;

/// Errors surfaced by holiday calendar lookups.
#[derive(Debug, Clone, Error)]
pub enum HolidayError {
    /// The referenced holiday zone does not exist or is inactive.
    #[error("Holiday zone not found: {0}")]
    ZoneNotFound(HolidayZoneId),

    /// The calendar data source failed or was unreachable.
    #[error("Holiday calendar lookup failed: {0}")]
    Lookup(String),

    /// The calendar data source did not answer within the caller's deadline.
    #[error("Holiday calendar lookup timed out")]
    Timeout,
}
