//! In-memory store and calendar fixtures shared by module tests.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{NaiveDate, Utc};
use debitcal_shared::types::{
    ClientId, ConfigId, ContratId, HolidayZoneId, OrganisationId, SocieteId,
};

use crate::audit::AuditEntry;
use crate::configuration::{
    ClientDebitConfig, CompanyDebitConfig, ConfigChange, ConfigRecord, ConfigStore,
    ConfigWriteStore, ContratDebitConfig, DebitBatch, DebitMode, PolicySpec, ShiftStrategy,
    StoreError, SystemDebitConfig,
};
use crate::holidays::{Holiday, HolidayCalendar, HolidayError, HolidayKind};

/// Batch-mode policy spec with the next-business-day strategy.
pub(crate) fn spec_batch(batch: DebitBatch, zone: HolidayZoneId) -> PolicySpec {
    PolicySpec {
        mode: DebitMode::Batch,
        batch: Some(batch),
        fixed_day: None,
        shift_strategy: ShiftStrategy::NextBusinessDay,
        holiday_zone_id: zone,
    }
}

/// Fixed-day policy spec with the next-business-day strategy.
pub(crate) fn spec_fixed(day: u8, zone: HolidayZoneId) -> PolicySpec {
    PolicySpec {
        mode: DebitMode::FixedDay,
        batch: None,
        fixed_day: Some(day),
        shift_strategy: ShiftStrategy::NextBusinessDay,
        holiday_zone_id: zone,
    }
}

/// In-memory configuration store with replace-by-id write semantics and an
/// inspectable audit log.
#[derive(Default)]
pub(crate) struct InMemoryStore {
    system: Mutex<Vec<SystemDebitConfig>>,
    company: Mutex<Vec<CompanyDebitConfig>>,
    client: Mutex<Vec<ClientDebitConfig>>,
    contract: Mutex<Vec<ContratDebitConfig>>,
    audit: Mutex<Vec<AuditEntry>>,
}

impl InMemoryStore {
    pub(crate) fn seed_system(&self, organisation_id: OrganisationId, policy: PolicySpec) -> ConfigId {
        let now = Utc::now();
        let id = ConfigId::new();
        self.system.lock().unwrap().push(SystemDebitConfig {
            id,
            organisation_id,
            policy,
            is_active: true,
            created_at: now,
            updated_at: now,
        });
        id
    }

    pub(crate) fn seed_company(
        &self,
        organisation_id: OrganisationId,
        societe_id: SocieteId,
        policy: PolicySpec,
    ) -> ConfigId {
        let now = Utc::now();
        let id = ConfigId::new();
        self.company.lock().unwrap().push(CompanyDebitConfig {
            id,
            organisation_id,
            societe_id,
            policy,
            is_active: true,
            created_at: now,
            updated_at: now,
        });
        id
    }

    pub(crate) fn seed_client(
        &self,
        organisation_id: OrganisationId,
        client_id: ClientId,
        policy: PolicySpec,
    ) -> ConfigId {
        let now = Utc::now();
        let id = ConfigId::new();
        self.client.lock().unwrap().push(ClientDebitConfig {
            id,
            organisation_id,
            client_id,
            policy,
            is_active: true,
            created_at: now,
            updated_at: now,
        });
        id
    }

    pub(crate) fn seed_contract(
        &self,
        organisation_id: OrganisationId,
        contrat_id: ContratId,
        policy: PolicySpec,
    ) -> ConfigId {
        let now = Utc::now();
        let id = ConfigId::new();
        self.contract.lock().unwrap().push(ContratDebitConfig {
            id,
            organisation_id,
            contrat_id,
            policy,
            is_active: true,
            created_at: now,
            updated_at: now,
        });
        id
    }

    pub(crate) fn deactivate_contract(&self, id: ConfigId) {
        for record in self.contract.lock().unwrap().iter_mut() {
            if record.id == id {
                record.is_active = false;
            }
        }
    }

    pub(crate) fn audit_entries(&self) -> Vec<AuditEntry> {
        self.audit.lock().unwrap().clone()
    }
}

impl ConfigStore for InMemoryStore {
    fn active_system_config(
        &self,
        organisation_id: OrganisationId,
    ) -> Result<Option<SystemDebitConfig>, StoreError> {
        Ok(self
            .system
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.organisation_id == organisation_id && c.is_active)
            .cloned())
    }

    fn active_company_config(
        &self,
        organisation_id: OrganisationId,
        societe_id: SocieteId,
    ) -> Result<Option<CompanyDebitConfig>, StoreError> {
        Ok(self
            .company
            .lock()
            .unwrap()
            .iter()
            .find(|c| {
                c.organisation_id == organisation_id && c.societe_id == societe_id && c.is_active
            })
            .cloned())
    }

    fn active_client_config(
        &self,
        organisation_id: OrganisationId,
        client_id: ClientId,
    ) -> Result<Option<ClientDebitConfig>, StoreError> {
        Ok(self
            .client
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.organisation_id == organisation_id && c.client_id == client_id && c.is_active)
            .cloned())
    }

    fn active_contract_config(
        &self,
        organisation_id: OrganisationId,
        contrat_id: ContratId,
    ) -> Result<Option<ContratDebitConfig>, StoreError> {
        Ok(self
            .contract
            .lock()
            .unwrap()
            .iter()
            .find(|c| {
                c.organisation_id == organisation_id && c.contrat_id == contrat_id && c.is_active
            })
            .cloned())
    }
}

impl ConfigWriteStore for InMemoryStore {
    fn apply(&self, change: ConfigChange) -> Result<(), StoreError> {
        match change.record {
            ConfigRecord::System(record) => upsert_by_id(&self.system, record, |r| r.id),
            ConfigRecord::Company(record) => upsert_by_id(&self.company, record, |r| r.id),
            ConfigRecord::Client(record) => upsert_by_id(&self.client, record, |r| r.id),
            ConfigRecord::Contract(record) => upsert_by_id(&self.contract, record, |r| r.id),
        }
        self.audit.lock().unwrap().push(change.audit);
        Ok(())
    }
}

fn upsert_by_id<T>(table: &Mutex<Vec<T>>, record: T, id_of: impl Fn(&T) -> ConfigId) {
    let mut table = table.lock().unwrap();
    let id = id_of(&record);
    if let Some(pos) = table.iter().position(|r| id_of(r) == id) {
        table[pos] = record;
    } else {
        table.push(record);
    }
}

/// Calendar fixture keyed by (zone, date).
#[derive(Default)]
pub(crate) struct FixtureCalendar {
    holidays: HashMap<(HolidayZoneId, NaiveDate), Holiday>,
}

impl FixtureCalendar {
    pub(crate) fn add_holiday(
        &mut self,
        zone: HolidayZoneId,
        date: NaiveDate,
        name: &str,
        kind: HolidayKind,
    ) {
        self.holidays.insert(
            (zone, date),
            Holiday {
                name: name.to_string(),
                kind,
            },
        );
    }
}

impl HolidayCalendar for FixtureCalendar {
    fn holiday_on(
        &self,
        date: NaiveDate,
        zone: HolidayZoneId,
    ) -> Result<Option<Holiday>, HolidayError> {
        Ok(self.holidays.get(&(zone, date)).cloned())
    }
}
