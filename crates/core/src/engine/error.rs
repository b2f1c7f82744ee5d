//! Date engine error taxonomy.
//!
//! All failures are typed domain errors. Single-item callers surface them
//! directly (retries cannot fix a configuration problem); the batch entry
//! point converts them to per-item error outcomes.

use debitcal_shared::types::{ConfigId, HolidayZoneId, OrganisationId};
use thiserror::Error;

use crate::configuration::{ConfigurationError, StoreError};
use crate::holidays::HolidayError;

/// Errors raised while computing a planned debit date.
#[derive(Debug, Error)]
pub enum EngineError {
    /// No active system configuration exists for the organisation.
    /// Unrecoverable without operator intervention.
    #[error("No active debit configuration found for organisation {organisation_id}")]
    ConfigurationMissing {
        /// Organisation whose resolution failed.
        organisation_id: OrganisationId,
    },

    /// The resolved policy is internally inconsistent (e.g., batch mode
    /// without a batch slot). Points the operator at the offending record.
    #[error("Configuration {config_id} is invalid: {detail}")]
    ConfigurationInvalid {
        /// The record that supplied the inconsistent policy.
        config_id: ConfigId,
        /// What is inconsistent.
        detail: String,
    },

    /// The target month is not in 1-12.
    #[error("Target month {month} is not a valid month")]
    InvalidTargetMonth {
        /// The rejected month value.
        month: u32,
    },

    /// The policy's fixed day does not exist in the target month.
    #[error("Day {day} does not exist in {year}-{month:02}")]
    DayOutOfRangeForMonth {
        /// The configured day.
        day: u32,
        /// Target month.
        month: u32,
        /// Target year.
        year: i32,
    },

    /// The shift loop gave up before finding an eligible date; the zone's
    /// calendar has an unreasonably long closure.
    #[error(
        "No eligible date found within {attempts} shift attempts from {start} in zone {holiday_zone_id}"
    )]
    ShiftBoundExceeded {
        /// The nominal date shifting started from.
        start: chrono::NaiveDate,
        /// The zone whose calendar was consulted.
        holiday_zone_id: HolidayZoneId,
        /// How many candidates were examined.
        attempts: u32,
    },

    /// The caller's deadline passed before this computation started.
    #[error("Deadline exceeded before computation")]
    DeadlineExceeded,

    /// The configuration store failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The holiday calendar failed.
    #[error(transparent)]
    Calendar(#[from] HolidayError),
}

impl EngineError {
    /// Stable machine-readable code for API surfaces and batch outcomes.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::ConfigurationMissing { .. } => "CONFIGURATION_MISSING",
            Self::ConfigurationInvalid { .. } => "CONFIGURATION_INVALID",
            Self::InvalidTargetMonth { .. } => "INVALID_TARGET_MONTH",
            Self::DayOutOfRangeForMonth { .. } => "DAY_OUT_OF_RANGE_FOR_MONTH",
            Self::ShiftBoundExceeded { .. } => "SHIFT_BOUND_EXCEEDED",
            Self::DeadlineExceeded => "DEADLINE_EXCEEDED",
            Self::Store(_) => "STORE_ERROR",
            Self::Calendar(_) => "CALENDAR_ERROR",
        }
    }
}

impl From<ConfigurationError> for EngineError {
    fn from(err: ConfigurationError) -> Self {
        match err {
            ConfigurationError::NoConfiguration { organisation_id } => {
                Self::ConfigurationMissing { organisation_id }
            }
            ConfigurationError::Store(store) => Self::Store(store),
            // Write-side validation errors cannot reach the read path, but
            // the conversion must stay total.
            other => Self::Store(StoreError::Unavailable(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_stable() {
        let org = OrganisationId::new();
        assert_eq!(
            EngineError::ConfigurationMissing {
                organisation_id: org
            }
            .code(),
            "CONFIGURATION_MISSING"
        );
        assert_eq!(
            EngineError::InvalidTargetMonth { month: 13 }.code(),
            "INVALID_TARGET_MONTH"
        );
        assert_eq!(EngineError::DeadlineExceeded.code(), "DEADLINE_EXCEEDED");
    }

    #[test]
    fn test_no_configuration_maps_to_missing() {
        let organisation_id = OrganisationId::new();
        let err: EngineError = ConfigurationError::NoConfiguration { organisation_id }.into();
        assert!(matches!(err, EngineError::ConfigurationMissing { .. }));
    }
}
