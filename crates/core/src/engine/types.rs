//! Date engine inputs and results.

use chrono::NaiveDate;
use debitcal_shared::types::{ClientId, ContratId, Money, OrganisationId, SocieteId};
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::configuration::DebitPolicy;

/// Input for a single planned-date computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculateInput {
    /// Organisation the contract belongs to.
    pub organisation_id: OrganisationId,
    /// Target month (1-12).
    pub target_month: u32,
    /// Target year.
    pub target_year: i32,
    /// Company key; enables the company override level.
    pub societe_id: Option<SocieteId>,
    /// Client key; enables the client override level.
    pub client_id: Option<ClientId>,
    /// Contract key; enables the contract override level.
    pub contrat_id: Option<ContratId>,
    /// When true, the result carries an ordered resolution trace.
    pub include_resolution_trace: bool,
}

/// One diagnostic step recorded while producing a result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceStep {
    /// Position in the trace, starting at 1.
    pub step: u32,
    /// What happened.
    pub description: String,
    /// Date going into the step, when dates are involved.
    pub input_date: Option<NaiveDate>,
    /// Date coming out of the step, when dates are involved.
    pub output_date: Option<NaiveDate>,
    /// The rule or record that drove the step.
    pub applied_rule: String,
}

/// Outcome of a single planned-date computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedDateResult {
    /// The eligible date the debit is planned on.
    pub planned_debit_date: NaiveDate,
    /// The date computed from the policy before any shifting.
    pub nominal_date: NaiveDate,
    /// True when the nominal date was ineligible and had to be shifted.
    pub was_shifted: bool,
    /// Why the nominal date was ineligible: `"weekend"` or `"holiday: <name>"`.
    pub shift_reason: Option<String>,
    /// The resolved policy that produced the date.
    pub policy: DebitPolicy,
    /// Ordered diagnostic trace; present only when requested.
    pub resolution_trace: Option<Vec<TraceStep>>,
}

/// One contract instalment in a batch run.
///
/// `amount` is pass-through: it plays no part in date computation and exists
/// so the caller can hand successes straight to a debit-scheduling pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchItem {
    /// Contract being debited.
    pub contrat_id: ContratId,
    /// Client owning the contract.
    pub client_id: ClientId,
    /// Company carrying the contract.
    pub societe_id: SocieteId,
    /// Instalment amount, ferried untouched.
    pub amount: Money,
}

/// Why a single batch item failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemFailure {
    /// Stable error code (see [`super::error::EngineError::code`]).
    pub code: String,
    /// Operator-facing message.
    pub message: String,
}

/// Success or failure of one batch item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemOutcome {
    /// The planned date was computed.
    Planned(PlannedDateResult),
    /// The item failed; the rest of the batch is unaffected.
    Failed(ItemFailure),
}

impl ItemOutcome {
    /// True for [`ItemOutcome::Planned`].
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Planned(_))
    }
}

/// Per-item result, echoing the input's identifying keys and amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchOutcome {
    /// Contract key from the input.
    pub contrat_id: ContratId,
    /// Client key from the input.
    pub client_id: ClientId,
    /// Company key from the input.
    pub societe_id: SocieteId,
    /// Amount from the input, untouched.
    pub amount: Money,
    /// What happened to this item.
    pub outcome: ItemOutcome,
}

/// Aggregate result of a batch run.
///
/// `outcomes` preserves input order and `success_count + error_count`
/// always equals `total_count`. Constructed fresh per invocation, never
/// persisted here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchResult {
    /// Number of inputs processed (equals the input length).
    pub total_count: usize,
    /// Number of successful items.
    pub success_count: usize,
    /// Number of failed items.
    pub error_count: usize,
    /// Per-item outcomes, in input order.
    pub outcomes: Vec<BatchOutcome>,
}

/// Options controlling a batch run.
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchOptions {
    /// Cut-off instant: items not started by then are recorded as
    /// deadline errors and the partial result is returned.
    pub deadline: Option<Instant>,
}
