//! Store traits the configuration layer is injected with.
//!
//! Persistence lives outside this crate. The read side is four keyed
//! lookups, each returning at most one active record; the write side takes
//! a whole [`ConfigChange`] (record plus its audit entry) so an
//! implementation can persist both atomically.

use debitcal_shared::types::{ClientId, ContratId, OrganisationId, SocieteId};
use thiserror::Error;

use crate::audit::AuditEntry;
use super::types::{
    ClientDebitConfig, CompanyDebitConfig, ConfigLevel, ContratDebitConfig, SystemDebitConfig,
};

/// Errors surfaced by the configuration store.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// The store failed or was unreachable.
    #[error("Configuration store unavailable: {0}")]
    Unavailable(String),

    /// The store did not answer within the caller's deadline.
    #[error("Configuration store call timed out")]
    Timeout,

    /// A write conflicted with concurrent state.
    #[error("Configuration store conflict: {0}")]
    Conflict(String),
}

/// Read side of the configuration store.
///
/// Each lookup returns the single active record for its scope, or `None`.
/// The unique-active-per-scope invariant is the store's to keep; the write
/// path in [`super::admin::ConfigAdmin`] upholds it by construction.
pub trait ConfigStore: Send + Sync {
    /// Active system-level configuration for the organisation.
    fn active_system_config(
        &self,
        organisation_id: OrganisationId,
    ) -> Result<Option<SystemDebitConfig>, StoreError>;

    /// Active company-level override for (organisation, societe).
    fn active_company_config(
        &self,
        organisation_id: OrganisationId,
        societe_id: SocieteId,
    ) -> Result<Option<CompanyDebitConfig>, StoreError>;

    /// Active client-level override for (organisation, client).
    fn active_client_config(
        &self,
        organisation_id: OrganisationId,
        client_id: ClientId,
    ) -> Result<Option<ClientDebitConfig>, StoreError>;

    /// Active contract-level override for (organisation, contrat).
    fn active_contract_config(
        &self,
        organisation_id: OrganisationId,
        contrat_id: ContratId,
    ) -> Result<Option<ContratDebitConfig>, StoreError>;
}

impl<S: ConfigStore + ?Sized> ConfigStore for std::sync::Arc<S> {
    fn active_system_config(
        &self,
        organisation_id: OrganisationId,
    ) -> Result<Option<SystemDebitConfig>, StoreError> {
        (**self).active_system_config(organisation_id)
    }

    fn active_company_config(
        &self,
        organisation_id: OrganisationId,
        societe_id: SocieteId,
    ) -> Result<Option<CompanyDebitConfig>, StoreError> {
        (**self).active_company_config(organisation_id, societe_id)
    }

    fn active_client_config(
        &self,
        organisation_id: OrganisationId,
        client_id: ClientId,
    ) -> Result<Option<ClientDebitConfig>, StoreError> {
        (**self).active_client_config(organisation_id, client_id)
    }

    fn active_contract_config(
        &self,
        organisation_id: OrganisationId,
        contrat_id: ContratId,
    ) -> Result<Option<ContratDebitConfig>, StoreError> {
        (**self).active_contract_config(organisation_id, contrat_id)
    }
}

/// A configuration record at any override level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigRecord {
    /// System-level record.
    System(SystemDebitConfig),
    /// Company-level record.
    Company(CompanyDebitConfig),
    /// Client-level record.
    Client(ClientDebitConfig),
    /// Contract-level record.
    Contract(ContratDebitConfig),
}

impl ConfigRecord {
    /// The override level of the wrapped record.
    #[must_use]
    pub const fn level(&self) -> ConfigLevel {
        match self {
            Self::System(_) => ConfigLevel::System,
            Self::Company(_) => ConfigLevel::Company,
            Self::Client(_) => ConfigLevel::Client,
            Self::Contract(_) => ConfigLevel::Contract,
        }
    }

    /// The wrapped record's identifier.
    #[must_use]
    pub const fn id(&self) -> debitcal_shared::types::ConfigId {
        match self {
            Self::System(c) => c.id,
            Self::Company(c) => c.id,
            Self::Client(c) => c.id,
            Self::Contract(c) => c.id,
        }
    }
}

/// A record write and its audit entry, applied as one unit.
///
/// Replace-by-id semantics: the store inserts the record if its id is new,
/// otherwise replaces the stored record wholesale. Soft-deletes are records
/// written with `is_active = false`.
#[derive(Debug, Clone)]
pub struct ConfigChange {
    /// The record state to persist.
    pub record: ConfigRecord,
    /// The audit entry describing this mutation.
    pub audit: AuditEntry,
}

/// Write side of the configuration store.
pub trait ConfigWriteStore: Send + Sync {
    /// Atomically persists the record state and its audit entry.
    fn apply(&self, change: ConfigChange) -> Result<(), StoreError>;
}

impl<S: ConfigWriteStore + ?Sized> ConfigWriteStore for std::sync::Arc<S> {
    fn apply(&self, change: ConfigChange) -> Result<(), StoreError> {
        (**self).apply(change)
    }
}
