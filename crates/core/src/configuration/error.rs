//! Configuration error types.

use debitcal_shared::types::OrganisationId;
use thiserror::Error;

use super::store::StoreError;
use super::types::ConfigLevel;

/// Errors raised while resolving or mutating debit configurations.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// No active configuration exists at any level, including the mandatory
    /// system fallback. Unrecoverable without operator intervention.
    #[error("No active debit configuration found for organisation {organisation_id}")]
    NoConfiguration {
        /// Organisation whose resolution failed.
        organisation_id: OrganisationId,
    },

    /// A batch slot is required when the mode is `batch`.
    #[error("Batch slot is required when mode is batch")]
    BatchRequired,

    /// A fixed day is required when the mode is `fixed_day`.
    #[error("Fixed day is required when mode is fixed_day")]
    FixedDayRequired,

    /// The fixed day must be within 1-31.
    #[error("Fixed day {day} is out of range 1-31")]
    FixedDayOutOfRange {
        /// The rejected day value.
        day: u8,
    },

    /// Deactivation was requested but no active record exists for the scope.
    #[error("No active {level} configuration to deactivate")]
    NothingToDeactivate {
        /// Level that was targeted.
        level: ConfigLevel,
    },

    /// Snapshotting a record for its audit entry failed.
    #[error("Failed to snapshot configuration for audit: {0}")]
    Snapshot(#[from] serde_json::Error),

    /// The underlying store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}
