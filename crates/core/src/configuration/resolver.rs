//! Precedence resolution across the four override levels.

use debitcal_shared::types::{ClientId, ContratId, OrganisationId, SocieteId};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::ConfigurationError;
use super::store::ConfigStore;
use super::types::{ConfigLevel, DebitPolicy};

/// Optional scope keys narrowing a resolution.
///
/// A level is only consulted when its key is present: resolving without a
/// `contrat_id` never sees contract-level overrides, even if they exist.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionScope {
    /// Company key for the company level.
    pub societe_id: Option<SocieteId>,
    /// Client key for the client level.
    pub client_id: Option<ClientId>,
    /// Contract key for the contract level.
    pub contrat_id: Option<ContratId>,
}

/// One consulted level and whether it supplied a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelCheck {
    /// The level that was consulted.
    pub level: ConfigLevel,
    /// True when an active record was found at this level.
    pub hit: bool,
}

/// Outcome of a resolution: the winning policy and the consulted levels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// The single effective policy.
    pub policy: DebitPolicy,
    /// Levels consulted, in precedence order, ending with the hit.
    pub checked: Vec<LevelCheck>,
}

/// Resolves the effective debit policy for an organisation and scope.
///
/// Pure precedence without merging: the most specific active record wins
/// whole, so every resolved date traces back to exactly one configuration
/// record. Read-only and idempotent; safe to call concurrently.
pub struct ConfigResolver<S> {
    store: S,
}

impl<S: ConfigStore> ConfigResolver<S> {
    /// Creates a resolver over the given store.
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Resolves the effective policy, trying Contract > Client > Company >
    /// System.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::NoConfiguration`] when not even a
    /// system-level record exists, or [`ConfigurationError::Store`] when a
    /// lookup fails.
    pub fn resolve(
        &self,
        organisation_id: OrganisationId,
        scope: &ResolutionScope,
    ) -> Result<Resolution, ConfigurationError> {
        let mut checked = Vec::with_capacity(4);

        if let Some(contrat_id) = scope.contrat_id {
            let found = self.store.active_contract_config(organisation_id, contrat_id)?;
            checked.push(LevelCheck {
                level: ConfigLevel::Contract,
                hit: found.is_some(),
            });
            if let Some(config) = found {
                debug!(config_id = %config.id, "configuration resolved at contract level");
                return Ok(Resolution {
                    policy: DebitPolicy::from_spec(&config.policy, ConfigLevel::Contract, config.id),
                    checked,
                });
            }
        }

        if let Some(client_id) = scope.client_id {
            let found = self.store.active_client_config(organisation_id, client_id)?;
            checked.push(LevelCheck {
                level: ConfigLevel::Client,
                hit: found.is_some(),
            });
            if let Some(config) = found {
                debug!(config_id = %config.id, "configuration resolved at client level");
                return Ok(Resolution {
                    policy: DebitPolicy::from_spec(&config.policy, ConfigLevel::Client, config.id),
                    checked,
                });
            }
        }

        if let Some(societe_id) = scope.societe_id {
            let found = self.store.active_company_config(organisation_id, societe_id)?;
            checked.push(LevelCheck {
                level: ConfigLevel::Company,
                hit: found.is_some(),
            });
            if let Some(config) = found {
                debug!(config_id = %config.id, "configuration resolved at company level");
                return Ok(Resolution {
                    policy: DebitPolicy::from_spec(&config.policy, ConfigLevel::Company, config.id),
                    checked,
                });
            }
        }

        let found = self.store.active_system_config(organisation_id)?;
        checked.push(LevelCheck {
            level: ConfigLevel::System,
            hit: found.is_some(),
        });
        if let Some(config) = found {
            debug!(config_id = %config.id, "configuration resolved at system level");
            return Ok(Resolution {
                policy: DebitPolicy::from_spec(&config.policy, ConfigLevel::System, config.id),
                checked,
            });
        }

        debug!(%organisation_id, "no active configuration at any level");
        Err(ConfigurationError::NoConfiguration { organisation_id })
    }
}
