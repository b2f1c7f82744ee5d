//! Planned debit date computation.
//!
//! Given a resolved policy and a target month, the engine computes the
//! nominal date, checks its eligibility against the policy's holiday zone,
//! and shifts it according to the policy's strategy until an eligible date
//! is found. A batched entry point runs many independent computations with
//! per-item failure isolation.
//!
//! # Modules
//!
//! - `types` - Inputs, results, traces, batch outcomes
//! - `service` - The [`DateEngine`]
//! - `error` - The engine's error taxonomy

pub mod error;
pub mod service;
pub mod types;


#[cfg(test)]
mod batch_props;

pub use error::EngineError;
pub use service::DateEngine;
pub use types::{
    BatchItem, BatchOptions, BatchOutcome, BatchResult, CalculateInput, ItemFailure,
    ItemOutcome, PlannedDateResult, TraceStep,
};
