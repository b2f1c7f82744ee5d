//! Money amounts carried through the billing pipeline.
//!
//! CRITICAL: Never use floating-point for money. Amounts are integer cents;
//! the core never computes on them, it only ferries them to the
//! debit-scheduling pipeline.

use serde::{Deserialize, Serialize};

/// A monetary amount in the smallest currency unit, with its ISO 4217 code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    /// Amount in cents (or the currency's smallest unit).
    pub amount_cents: i64,
    /// ISO 4217 currency code (e.g., "EUR", "USD").
    pub currency: String,
}

impl Money {
    /// Creates a new Money instance.
    #[must_use]
    pub fn new(amount_cents: i64, currency: impl Into<String>) -> Self {
        Self {
            amount_cents,
            currency: currency.into(),
        }
    }

    /// Creates a zero amount in the specified currency.
    #[must_use]
    pub fn zero(currency: impl Into<String>) -> Self {
        Self::new(0, currency)
    }

    /// Returns true if the amount is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.amount_cents == 0
    }

    /// Returns true if the amount is negative.
    #[must_use]
    pub const fn is_negative(&self) -> bool {
        self.amount_cents < 0
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.amount_cents, self.currency)
    }
}
