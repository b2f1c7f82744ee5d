//! Shared types for debitcal.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for type-safe entity references
//! - Money amounts carried through the batch pipeline

pub mod types;
