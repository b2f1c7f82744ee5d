//! Holiday and eligibility data types.

use serde::{Deserialize, Serialize};

/// Classification of a holiday within a zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HolidayKind {
    /// Nationwide public holiday.
    Public,
    /// Regional holiday (e.g., Alsace-Moselle).
    Regional,
    /// Organisation-specific closure day.
    Custom,
}

/// A named holiday on a specific date in a zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holiday {
    /// Display name (e.g., "Jour de l'An").
    pub name: String,
    /// Holiday classification.
    pub kind: HolidayKind,
}

/// Whether a date is usable for a debit, and why not if it isn't.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateEligibility {
    /// True when the date is neither a weekend nor a holiday.
    pub is_eligible: bool,
    /// True when the date falls on Saturday or Sunday.
    pub is_weekend: bool,
    /// True when the date matches a holiday in the zone.
    pub is_holiday: bool,
    /// Display name of the matched holiday, when `is_holiday`.
    pub holiday_name: Option<String>,
    /// Short human-readable failure summary; absent when eligible.
    pub reason: Option<String>,
}

impl DateEligibility {
    /// An eligible date (business day, no holiday).
    #[must_use]
    pub const fn eligible() -> Self {
        Self {
            is_eligible: true,
            is_weekend: false,
            is_holiday: false,
            holiday_name: None,
            reason: None,
        }
    }
}
