//! Audit entries emitted by configuration mutations.
//!
//! Every write to a debit configuration record must be paired with exactly
//! one audit entry; read paths never audit. The entry travels with the write
//! in a single [`crate::configuration::ConfigChange`] so a transactional
//! store can persist both or neither.

pub mod types;

pub use types::{AuditEntry, AuditOperation};
