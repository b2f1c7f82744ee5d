//! Weekend and holiday eligibility of calendar dates.
//!
//! A debit can only be emitted on a business day: not a Saturday or Sunday,
//! and not a holiday listed in the contract's holiday zone. The zone's
//! holiday data lives outside this crate; it is reached through the
//! [`HolidayCalendar`] trait.

pub mod error;
pub mod service;
pub mod types;

pub use error::HolidayError;
pub use service::{EligibilityService, HolidayCalendar};
pub use types::{DateEligibility, Holiday, HolidayKind};
