//! Debit configuration data types.

use chrono::{DateTime, Utc};
use debitcal_shared::types::{ClientId, ConfigId, ContratId, HolidayZoneId, OrganisationId, SocieteId};
use serde::{Deserialize, Serialize};

/// How the nominal debit day is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebitMode {
    /// A named batch slot mapping to a fixed day of month.
    Batch,
    /// An explicit day of month.
    FixedDay,
}

/// Named billing batch slots.
///
/// Each slot maps to a fixed day of month. The mapping is system-wide and
/// not configurable per policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DebitBatch {
    /// First slot, day 1.
    L1,
    /// Second slot, day 8.
    L2,
    /// Third slot, day 15.
    L3,
    /// Fourth slot, day 22.
    L4,
}

impl DebitBatch {
    /// The day of month this slot debits on.
    #[must_use]
    pub const fn day_of_month(self) -> u32 {
        match self {
            Self::L1 => 1,
            Self::L2 => 8,
            Self::L3 => 15,
            Self::L4 => 22,
        }
    }
}

/// Rule used to move an ineligible nominal date to an eligible one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftStrategy {
    /// Advance one calendar day at a time until eligible.
    NextBusinessDay,
    /// Retreat one calendar day at a time until eligible.
    PreviousBusinessDay,
    /// Jump forward in whole weeks from the nominal date until eligible.
    NextWeekSameDay,
}

/// Override level a configuration record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigLevel {
    /// Organisation-wide default, mandatory fallback.
    System,
    /// Per-company (societe) override.
    Company,
    /// Per-client override.
    Client,
    /// Per-contract override, most specific.
    Contract,
}

impl ConfigLevel {
    /// Lowercase level name used in traces and audit entries.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::System => "system",
            Self::Company => "company",
            Self::Client => "client",
            Self::Contract => "contract",
        }
    }
}

impl std::fmt::Display for ConfigLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The policy fields shared by every override level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicySpec {
    /// How the nominal day is chosen.
    pub mode: DebitMode,
    /// Batch slot; required when `mode` is [`DebitMode::Batch`].
    pub batch: Option<DebitBatch>,
    /// Explicit day of month (1-31); required when `mode` is [`DebitMode::FixedDay`].
    pub fixed_day: Option<u8>,
    /// Rule applied when the nominal date is not a business day.
    pub shift_strategy: ShiftStrategy,
    /// Holiday calendar zone consulted for eligibility.
    pub holiday_zone_id: HolidayZoneId,
}

/// The resolved, immutable policy the date engine consumes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebitPolicy {
    /// How the nominal day is chosen.
    pub mode: DebitMode,
    /// Batch slot when `mode` is [`DebitMode::Batch`].
    pub batch: Option<DebitBatch>,
    /// Explicit day of month when `mode` is [`DebitMode::FixedDay`].
    pub fixed_day: Option<u8>,
    /// Rule applied when the nominal date is not a business day.
    pub shift_strategy: ShiftStrategy,
    /// Holiday calendar zone consulted for eligibility.
    pub holiday_zone_id: HolidayZoneId,
    /// Override level that supplied this policy. Observability only.
    pub applied_level: ConfigLevel,
    /// Record that supplied this policy, for traceability.
    pub applied_config_id: ConfigId,
}

impl DebitPolicy {
    /// Builds the resolved policy from a record's fields.
    #[must_use]
    pub fn from_spec(spec: &PolicySpec, applied_level: ConfigLevel, applied_config_id: ConfigId) -> Self {
        Self {
            mode: spec.mode,
            batch: spec.batch,
            fixed_day: spec.fixed_day,
            shift_strategy: spec.shift_strategy,
            holiday_zone_id: spec.holiday_zone_id,
            applied_level,
            applied_config_id,
        }
    }
}

/// Organisation-wide default configuration (mandatory fallback level).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemDebitConfig {
    /// Record identifier.
    pub id: ConfigId,
    /// Owning organisation.
    pub organisation_id: OrganisationId,
    /// Policy fields.
    #[serde(flatten)]
    pub policy: PolicySpec,
    /// Soft-delete flag; inactive records are invisible to resolution.
    pub is_active: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Per-company (societe) override configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyDebitConfig {
    /// Record identifier.
    pub id: ConfigId,
    /// Owning organisation.
    pub organisation_id: OrganisationId,
    /// Company this override applies to.
    pub societe_id: SocieteId,
    /// Policy fields.
    #[serde(flatten)]
    pub policy: PolicySpec,
    /// Soft-delete flag; inactive records are invisible to resolution.
    pub is_active: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Per-client override configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientDebitConfig {
    /// Record identifier.
    pub id: ConfigId,
    /// Owning organisation.
    pub organisation_id: OrganisationId,
    /// Client this override applies to.
    pub client_id: ClientId,
    /// Policy fields.
    #[serde(flatten)]
    pub policy: PolicySpec,
    /// Soft-delete flag; inactive records are invisible to resolution.
    pub is_active: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Per-contract override configuration, the most specific level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContratDebitConfig {
    /// Record identifier.
    pub id: ConfigId,
    /// Owning organisation.
    pub organisation_id: OrganisationId,
    /// Contract this override applies to.
    pub contrat_id: ContratId,
    /// Policy fields.
    #[serde(flatten)]
    pub policy: PolicySpec,
    /// Soft-delete flag; inactive records are invisible to resolution.
    pub is_active: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}
