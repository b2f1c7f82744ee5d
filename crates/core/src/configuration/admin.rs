//! Write-side configuration admin: validation and audit pairing.
//!
//! Every mutation validates the policy shape first, then hands the store a
//! single [`ConfigChange`] carrying both the record state and its audit
//! entry, so a transactional store commits both or neither. Upserts replace
//! the existing active record for a scope in place, which keeps the
//! unique-active-per-scope invariant by construction.

use chrono::Utc;
use debitcal_shared::types::{
    ClientId, ConfigId, ContratId, OrganisationId, SocieteId, UserId,
};
use tracing::info;

use crate::audit::{AuditEntry, AuditOperation};
use super::error::ConfigurationError;
use super::store::{ConfigChange, ConfigRecord, ConfigStore, ConfigWriteStore};
use super::types::{
    ClientDebitConfig, CompanyDebitConfig, ConfigLevel, ContratDebitConfig, DebitMode,
    PolicySpec, SystemDebitConfig,
};

/// Admin surface over the configuration store's write side.
pub struct ConfigAdmin<S> {
    store: S,
}

impl<S: ConfigStore + ConfigWriteStore> ConfigAdmin<S> {
    /// Creates an admin over the given store.
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Creates or replaces the organisation's system-level configuration.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an inconsistent policy shape, or a
    /// store error when persisting fails.
    pub fn upsert_system(
        &self,
        organisation_id: OrganisationId,
        spec: PolicySpec,
        actor: UserId,
    ) -> Result<SystemDebitConfig, ConfigurationError> {
        validate_spec(&spec)?;
        let existing = self.store.active_system_config(organisation_id)?;
        let now = Utc::now();

        let record = match &existing {
            Some(current) => SystemDebitConfig {
                policy: spec,
                updated_at: now,
                ..current.clone()
            },
            None => SystemDebitConfig {
                id: ConfigId::new(),
                organisation_id,
                policy: spec,
                is_active: true,
                created_at: now,
                updated_at: now,
            },
        };

        let audit = audit_entry(
            organisation_id,
            ConfigLevel::System,
            record.id,
            if existing.is_some() {
                AuditOperation::Update
            } else {
                AuditOperation::Create
            },
            existing.as_ref().map(serde_json::to_value).transpose()?,
            Some(serde_json::to_value(&record)?),
            actor,
        );
        self.store.apply(ConfigChange {
            record: ConfigRecord::System(record.clone()),
            audit,
        })?;
        info!(%organisation_id, config_id = %record.id, "system configuration upserted");
        Ok(record)
    }

    /// Creates or replaces the company-level override for a societe.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Self::upsert_system`].
    pub fn upsert_company(
        &self,
        organisation_id: OrganisationId,
        societe_id: SocieteId,
        spec: PolicySpec,
        actor: UserId,
    ) -> Result<CompanyDebitConfig, ConfigurationError> {
        validate_spec(&spec)?;
        let existing = self.store.active_company_config(organisation_id, societe_id)?;
        let now = Utc::now();

        let record = match &existing {
            Some(current) => CompanyDebitConfig {
                policy: spec,
                updated_at: now,
                ..current.clone()
            },
            None => CompanyDebitConfig {
                id: ConfigId::new(),
                organisation_id,
                societe_id,
                policy: spec,
                is_active: true,
                created_at: now,
                updated_at: now,
            },
        };

        let audit = audit_entry(
            organisation_id,
            ConfigLevel::Company,
            record.id,
            if existing.is_some() {
                AuditOperation::Update
            } else {
                AuditOperation::Create
            },
            existing.as_ref().map(serde_json::to_value).transpose()?,
            Some(serde_json::to_value(&record)?),
            actor,
        );
        self.store.apply(ConfigChange {
            record: ConfigRecord::Company(record.clone()),
            audit,
        })?;
        info!(%organisation_id, %societe_id, config_id = %record.id, "company configuration upserted");
        Ok(record)
    }

    /// Creates or replaces the client-level override for a client.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Self::upsert_system`].
    pub fn upsert_client(
        &self,
        organisation_id: OrganisationId,
        client_id: ClientId,
        spec: PolicySpec,
        actor: UserId,
    ) -> Result<ClientDebitConfig, ConfigurationError> {
        validate_spec(&spec)?;
        let existing = self.store.active_client_config(organisation_id, client_id)?;
        let now = Utc::now();

        let record = match &existing {
            Some(current) => ClientDebitConfig {
                policy: spec,
                updated_at: now,
                ..current.clone()
            },
            None => ClientDebitConfig {
                id: ConfigId::new(),
                organisation_id,
                client_id,
                policy: spec,
                is_active: true,
                created_at: now,
                updated_at: now,
            },
        };

        let audit = audit_entry(
            organisation_id,
            ConfigLevel::Client,
            record.id,
            if existing.is_some() {
                AuditOperation::Update
            } else {
                AuditOperation::Create
            },
            existing.as_ref().map(serde_json::to_value).transpose()?,
            Some(serde_json::to_value(&record)?),
            actor,
        );
        self.store.apply(ConfigChange {
            record: ConfigRecord::Client(record.clone()),
            audit,
        })?;
        info!(%organisation_id, %client_id, config_id = %record.id, "client configuration upserted");
        Ok(record)
    }

    /// Creates or replaces the contract-level override for a contract.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Self::upsert_system`].
    pub fn upsert_contract(
        &self,
        organisation_id: OrganisationId,
        contrat_id: ContratId,
        spec: PolicySpec,
        actor: UserId,
    ) -> Result<ContratDebitConfig, ConfigurationError> {
        validate_spec(&spec)?;
        let existing = self.store.active_contract_config(organisation_id, contrat_id)?;
        let now = Utc::now();

        let record = match &existing {
            Some(current) => ContratDebitConfig {
                policy: spec,
                updated_at: now,
                ..current.clone()
            },
            None => ContratDebitConfig {
                id: ConfigId::new(),
                organisation_id,
                contrat_id,
                policy: spec,
                is_active: true,
                created_at: now,
                updated_at: now,
            },
        };

        let audit = audit_entry(
            organisation_id,
            ConfigLevel::Contract,
            record.id,
            if existing.is_some() {
                AuditOperation::Update
            } else {
                AuditOperation::Create
            },
            existing.as_ref().map(serde_json::to_value).transpose()?,
            Some(serde_json::to_value(&record)?),
            actor,
        );
        self.store.apply(ConfigChange {
            record: ConfigRecord::Contract(record.clone()),
            audit,
        })?;
        info!(%organisation_id, %contrat_id, config_id = %record.id, "contract configuration upserted");
        Ok(record)
    }

    /// Soft-deletes the contract-level override for a contract.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::NothingToDeactivate`] when no active
    /// record exists for the scope.
    pub fn deactivate_contract(
        &self,
        organisation_id: OrganisationId,
        contrat_id: ContratId,
        actor: UserId,
    ) -> Result<(), ConfigurationError> {
        let current = self
            .store
            .active_contract_config(organisation_id, contrat_id)?
            .ok_or(ConfigurationError::NothingToDeactivate {
                level: ConfigLevel::Contract,
            })?;

        let mut record = current.clone();
        record.is_active = false;
        record.updated_at = Utc::now();

        let audit = audit_entry(
            organisation_id,
            ConfigLevel::Contract,
            record.id,
            AuditOperation::Delete,
            Some(serde_json::to_value(&current)?),
            Some(serde_json::to_value(&record)?),
            actor,
        );
        self.store.apply(ConfigChange {
            record: ConfigRecord::Contract(record),
            audit,
        })?;
        info!(%organisation_id, %contrat_id, "contract configuration deactivated");
        Ok(())
    }

    /// Soft-deletes the client-level override for a client.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::NothingToDeactivate`] when no active
    /// record exists for the scope.
    pub fn deactivate_client(
        &self,
        organisation_id: OrganisationId,
        client_id: ClientId,
        actor: UserId,
    ) -> Result<(), ConfigurationError> {
        let current = self
            .store
            .active_client_config(organisation_id, client_id)?
            .ok_or(ConfigurationError::NothingToDeactivate {
                level: ConfigLevel::Client,
            })?;

        let mut record = current.clone();
        record.is_active = false;
        record.updated_at = Utc::now();

        let audit = audit_entry(
            organisation_id,
            ConfigLevel::Client,
            record.id,
            AuditOperation::Delete,
            Some(serde_json::to_value(&current)?),
            Some(serde_json::to_value(&record)?),
            actor,
        );
        self.store.apply(ConfigChange {
            record: ConfigRecord::Client(record),
            audit,
        })?;
        info!(%organisation_id, %client_id, "client configuration deactivated");
        Ok(())
    }

    /// Soft-deletes the company-level override for a societe.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::NothingToDeactivate`] when no active
    /// record exists for the scope.
    pub fn deactivate_company(
        &self,
        organisation_id: OrganisationId,
        societe_id: SocieteId,
        actor: UserId,
    ) -> Result<(), ConfigurationError> {
        let current = self
            .store
            .active_company_config(organisation_id, societe_id)?
            .ok_or(ConfigurationError::NothingToDeactivate {
                level: ConfigLevel::Company,
            })?;

        let mut record = current.clone();
        record.is_active = false;
        record.updated_at = Utc::now();

        let audit = audit_entry(
            organisation_id,
            ConfigLevel::Company,
            record.id,
            AuditOperation::Delete,
            Some(serde_json::to_value(&current)?),
            Some(serde_json::to_value(&record)?),
            actor,
        );
        self.store.apply(ConfigChange {
            record: ConfigRecord::Company(record),
            audit,
        })?;
        info!(%organisation_id, %societe_id, "company configuration deactivated");
        Ok(())
    }
}

/// Rejects policy shapes the date engine could never evaluate.
fn validate_spec(spec: &PolicySpec) -> Result<(), ConfigurationError> {
    match spec.mode {
        DebitMode::Batch => {
            if spec.batch.is_none() {
                return Err(ConfigurationError::BatchRequired);
            }
        }
        DebitMode::FixedDay => match spec.fixed_day {
            None => return Err(ConfigurationError::FixedDayRequired),
            Some(day) if !(1..=31).contains(&day) => {
                return Err(ConfigurationError::FixedDayOutOfRange { day });
            }
            Some(_) => {}
        },
    }
    Ok(())
}

fn audit_entry(
    organisation_id: OrganisationId,
    level: ConfigLevel,
    config_id: ConfigId,
    operation: AuditOperation,
    before: Option<serde_json::Value>,
    after: Option<serde_json::Value>,
    actor: UserId,
) -> AuditEntry {
    AuditEntry {
        organisation_id,
        level,
        config_id,
        operation,
        actor,
        before,
        after,
        occurred_at: Utc::now(),
    }
}
