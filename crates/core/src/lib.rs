//! Core business logic for debitcal.
//!
//! This crate contains pure business logic with ZERO web or database
//! dependencies. All domain types, the configuration precedence resolver,
//! the holiday eligibility rules, and the planned-debit-date engine live here.
//!
//! # Modules
//!
//! - `configuration` - Debit policy records, precedence resolution, write-side admin
//! - `holidays` - Weekend/holiday eligibility of calendar dates
//! - `engine` - Planned debit date computation, single and batched
//! - `audit` - Audit entries emitted by configuration mutations

pub mod audit;
pub mod configuration;
pub mod engine;
pub mod holidays;

#[cfg(test)]
pub(crate) mod testing;
