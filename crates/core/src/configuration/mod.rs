//! Debit configuration records and precedence resolution.
//!
//! A debit policy can be overridden at four levels; the most specific active
//! override wins whole, with no field-by-field merging:
//!
//! Contract > Client > Company > System
//!
//! # Modules
//!
//! - `types` - Policy enums, the resolved [`DebitPolicy`], the four override records
//! - `store` - Read and write store traits the core is injected with
//! - `resolver` - Precedence resolution
//! - `admin` - Write-side validation and audit pairing
//! - `error` - Configuration error types

pub mod admin;
pub mod error;
pub mod resolver;
pub mod store;
pub mod types;

pub use admin::ConfigAdmin;
pub use error::ConfigurationError;
pub use resolver::{ConfigResolver, LevelCheck, Resolution, ResolutionScope};
pub use store::{ConfigChange, ConfigRecord, ConfigStore, ConfigWriteStore, StoreError};
pub use types::{
    ClientDebitConfig, CompanyDebitConfig, ConfigLevel, ContratDebitConfig, DebitBatch,
    DebitMode, DebitPolicy, PolicySpec, ShiftStrategy, SystemDebitConfig,
};
