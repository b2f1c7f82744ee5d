//! Property-based tests for the date engine.
//!
//! - Batch accounting: counts always reconcile and outcomes preserve order.
//! - Shifting: the planned date is eligible and minimal for its strategy.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use debitcal_shared::types::{ClientId, ContratId, HolidayZoneId, Money, OrganisationId, SocieteId};
use proptest::prelude::*;

use crate::configuration::{DebitBatch, DebitMode, PolicySpec, ShiftStrategy};
use crate::holidays::HolidayKind;
use crate::testing::{spec_batch, spec_fixed, FixtureCalendar, InMemoryStore};

use super::service::DateEngine;
use super::types::{BatchItem, BatchOptions, CalculateInput};

/// Strategy: which items of a batch carry a broken contract override.
fn item_shapes() -> impl Strategy<Value = Vec<bool>> {
    prop::collection::vec(any::<bool>(), 0..50)
}

/// Strategy: a set of holiday days in June 2026 (a 30-day month).
fn june_holidays() -> impl Strategy<Value = HashSet<u32>> {
    prop::collection::hash_set(1u32..=30, 0..10)
}

/// Strategy: a fixed debit day that exists in every month.
fn any_fixed_day() -> impl Strategy<Value = u8> {
    1u8..=28
}

fn batch_item() -> BatchItem {
    BatchItem {
        contrat_id: ContratId::new(),
        client_id: ClientId::new(),
        societe_id: SocieteId::new(),
        amount: Money::new(4_990, "EUR"),
    }
}

fn is_eligible(date: NaiveDate, holidays: &HashSet<u32>) -> bool {
    let weekday = date.weekday();
    let is_weekend = weekday == Weekday::Sat || weekday == Weekday::Sun;
    let is_holiday = date.month() == 6 && date.year() == 2026 && holidays.contains(&date.day());
    !is_weekend && !is_holiday
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// *For any* mix of valid and broken items, the batch result SHALL
    /// satisfy `success_count + error_count == total_count == items.len()`.
    #[test]
    fn prop_batch_counts_reconcile(broken in item_shapes()) {
        let store = Arc::new(InMemoryStore::default());
        let organisation_id = OrganisationId::new();
        let zone = HolidayZoneId::new();
        store.seed_system(organisation_id, spec_batch(DebitBatch::L2, zone));

        let items: Vec<BatchItem> = broken
            .iter()
            .map(|is_broken| {
                let item = batch_item();
                if *is_broken {
                    store.seed_contract(
                        organisation_id,
                        item.contrat_id,
                        PolicySpec {
                            mode: DebitMode::Batch,
                            batch: None,
                            fixed_day: None,
                            shift_strategy: ShiftStrategy::NextBusinessDay,
                            holiday_zone_id: zone,
                        },
                    );
                }
                item
            })
            .collect();

        let engine = DateEngine::new(store, FixtureCalendar::default());
        let result = engine.calculate_batch(
            &items,
            organisation_id,
            6,
            2026,
            &BatchOptions::default(),
        );

        prop_assert_eq!(result.total_count, items.len());
        prop_assert_eq!(
            result.success_count + result.error_count,
            result.total_count
        );
        prop_assert_eq!(
            result.error_count,
            broken.iter().filter(|b| **b).count()
        );
    }

    /// *For any* mix of valid and broken items, outcomes SHALL preserve the
    /// input order and each outcome SHALL match its item's validity.
    #[test]
    fn prop_batch_preserves_order(broken in item_shapes()) {
        let store = Arc::new(InMemoryStore::default());
        let organisation_id = OrganisationId::new();
        let zone = HolidayZoneId::new();
        store.seed_system(organisation_id, spec_batch(DebitBatch::L2, zone));

        let items: Vec<BatchItem> = broken
            .iter()
            .map(|is_broken| {
                let item = batch_item();
                if *is_broken {
                    store.seed_contract(
                        organisation_id,
                        item.contrat_id,
                        PolicySpec {
                            mode: DebitMode::FixedDay,
                            batch: None,
                            fixed_day: None,
                            shift_strategy: ShiftStrategy::NextBusinessDay,
                            holiday_zone_id: zone,
                        },
                    );
                }
                item
            })
            .collect();

        let engine = DateEngine::new(store, FixtureCalendar::default());
        let result = engine.calculate_batch(
            &items,
            organisation_id,
            6,
            2026,
            &BatchOptions::default(),
        );

        prop_assert_eq!(result.outcomes.len(), items.len());
        for ((item, is_broken), outcome) in items.iter().zip(&broken).zip(&result.outcomes) {
            prop_assert_eq!(outcome.contrat_id, item.contrat_id);
            prop_assert_eq!(outcome.client_id, item.client_id);
            prop_assert_eq!(&outcome.amount, &item.amount);
            prop_assert_eq!(outcome.outcome.is_success(), !is_broken);
        }
    }

    /// *For any* calendar of up to ten June holidays, the next-business-day
    /// strategy SHALL land on an eligible date and SHALL skip only
    /// ineligible dates on the way there.
    #[test]
    fn prop_next_business_day_is_minimal(
        day in any_fixed_day(),
        holidays in june_holidays(),
    ) {
        let store = Arc::new(InMemoryStore::default());
        let organisation_id = OrganisationId::new();
        let zone = HolidayZoneId::new();
        store.seed_system(organisation_id, spec_fixed(day, zone));

        let mut calendar = FixtureCalendar::default();
        for d in &holidays {
            let date = NaiveDate::from_ymd_opt(2026, 6, *d).unwrap();
            calendar.add_holiday(zone, date, "Jour ferie", HolidayKind::Public);
        }

        let engine = DateEngine::new(store, calendar);
        let result = engine
            .calculate_planned_date(&CalculateInput {
                organisation_id,
                target_month: 6,
                target_year: 2026,
                societe_id: None,
                client_id: None,
                contrat_id: None,
                include_resolution_trace: false,
            })
            .unwrap();

        prop_assert!(is_eligible(result.planned_debit_date, &holidays));
        prop_assert!(result.planned_debit_date >= result.nominal_date);
        prop_assert_eq!(
            result.was_shifted,
            result.planned_debit_date != result.nominal_date
        );

        // Minimality: every date walked over was itself ineligible.
        let mut cursor = result.nominal_date;
        while cursor < result.planned_debit_date {
            prop_assert!(!is_eligible(cursor, &holidays));
            cursor += Duration::days(1);
        }
    }
}
