//! Audit data types.

use chrono::{DateTime, Utc};
use debitcal_shared::types::{ConfigId, OrganisationId, UserId};
use serde::{Deserialize, Serialize};

use crate::configuration::ConfigLevel;

/// Kind of configuration mutation being audited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AuditOperation {
    /// A new configuration record was created.
    Create,
    /// An existing record was modified.
    Update,
    /// A record was soft-deleted (deactivated).
    Delete,
}

impl std::fmt::Display for AuditOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Create => write!(f, "CREATE"),
            Self::Update => write!(f, "UPDATE"),
            Self::Delete => write!(f, "DELETE"),
        }
    }
}

/// A single audited configuration change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntry {
    /// Organisation whose configuration changed.
    pub organisation_id: OrganisationId,
    /// Override level of the mutated record.
    pub level: ConfigLevel,
    /// Identifier of the mutated record.
    pub config_id: ConfigId,
    /// Kind of mutation.
    pub operation: AuditOperation,
    /// User who performed the change.
    pub actor: UserId,
    /// Record snapshot before the change; absent on create.
    pub before: Option<serde_json::Value>,
    /// Record snapshot after the change.
    pub after: Option<serde_json::Value>,
    /// When the change happened.
    pub occurred_at: DateTime<Utc>,
}
