//! The planned debit date engine.

use chrono::{Duration, NaiveDate};
use debitcal_shared::types::{HolidayZoneId, OrganisationId};
use tracing::{debug, warn};

use crate::configuration::{ConfigResolver, ConfigStore, DebitMode, DebitPolicy, ResolutionScope};
use crate::holidays::{DateEligibility, EligibilityService, HolidayCalendar};

use super::error::EngineError;
use super::types::{
    BatchItem, BatchOptions, BatchOutcome, BatchResult, CalculateInput, ItemFailure, ItemOutcome,
    PlannedDateResult, TraceStep,
};

/// Upper bound on one-day shift steps before giving up.
const MAX_DAY_STEPS: u32 = 30;

/// Upper bound on seven-day jumps for the next-week strategy.
const MAX_WEEK_JUMPS: u32 = 10;

/// Computes planned debit dates from resolved policies.
///
/// Holds no locks and mutates no shared state: every call is a synchronous
/// computation over the injected store and calendar, safe to invoke
/// concurrently from multiple callers.
pub struct DateEngine<S, C> {
    resolver: ConfigResolver<S>,
    eligibility: EligibilityService<C>,
}

/// Trace accumulator; a no-op when the caller did not ask for a trace.
struct Trace {
    steps: Option<Vec<TraceStep>>,
    next: u32,
}

impl Trace {
    fn new(enabled: bool) -> Self {
        Self {
            steps: enabled.then(Vec::new),
            next: 1,
        }
    }

    fn push(
        &mut self,
        description: impl Into<String>,
        input_date: Option<NaiveDate>,
        output_date: Option<NaiveDate>,
        applied_rule: impl Into<String>,
    ) {
        if let Some(steps) = &mut self.steps {
            steps.push(TraceStep {
                step: self.next,
                description: description.into(),
                input_date,
                output_date,
                applied_rule: applied_rule.into(),
            });
            self.next += 1;
        }
    }

    fn into_steps(self) -> Option<Vec<TraceStep>> {
        self.steps
    }
}

impl<S: ConfigStore, C: HolidayCalendar> DateEngine<S, C> {
    /// Creates an engine over the given configuration store and calendar.
    pub const fn new(store: S, calendar: C) -> Self {
        Self {
            resolver: ConfigResolver::new(store),
            eligibility: EligibilityService::new(calendar),
        }
    }

    /// Computes the planned debit date for one contract instalment.
    ///
    /// Resolves the effective policy, derives the nominal date for the
    /// target month, and shifts it per the policy's strategy until an
    /// eligible date is found.
    ///
    /// # Errors
    ///
    /// Returns a typed [`EngineError`]; see the module docs for the
    /// taxonomy. There is no retry here: these are configuration problems a
    /// retry cannot fix.
    pub fn calculate_planned_date(
        &self,
        input: &CalculateInput,
    ) -> Result<PlannedDateResult, EngineError> {
        let mut trace = Trace::new(input.include_resolution_trace);

        let scope = ResolutionScope {
            societe_id: input.societe_id,
            client_id: input.client_id,
            contrat_id: input.contrat_id,
        };
        let resolution = self.resolver.resolve(input.organisation_id, &scope)?;
        let policy = resolution.policy;

        for check in &resolution.checked {
            trace.push(
                format!("Consulted {} level configuration", check.level),
                None,
                None,
                if check.hit { "hit" } else { "miss" },
            );
        }
        trace.push(
            format!("Configuration resolved at {} level", policy.applied_level),
            None,
            None,
            format!("{}: {}", policy.applied_level, policy.applied_config_id),
        );

        let nominal = nominal_date(input.target_year, input.target_month, &policy)?;
        trace.push(
            "Nominal date computed",
            None,
            Some(nominal),
            match policy.mode {
                DebitMode::Batch => format!("batch slot day {}", nominal.format("%d")),
                DebitMode::FixedDay => format!("fixed day {}", nominal.format("%d")),
            },
        );

        let zone = policy.holiday_zone_id;
        let eligibility = self.check(nominal, zone, &mut trace)?;
        if eligibility.is_eligible {
            return Ok(PlannedDateResult {
                planned_debit_date: nominal,
                nominal_date: nominal,
                was_shifted: false,
                shift_reason: None,
                policy,
                resolution_trace: trace.into_steps(),
            });
        }

        // The reason reported to the caller is always the nominal date's
        // first ineligibility, not the last candidate's.
        let shift_reason = shift_reason(&eligibility);
        debug!(
            %nominal,
            reason = %shift_reason,
            strategy = ?policy.shift_strategy,
            "nominal date ineligible, shifting"
        );

        let planned = match policy.shift_strategy {
            crate::configuration::ShiftStrategy::NextBusinessDay => {
                self.step_days(nominal, 1, zone, &mut trace)?
            }
            crate::configuration::ShiftStrategy::PreviousBusinessDay => {
                self.step_days(nominal, -1, zone, &mut trace)?
            }
            crate::configuration::ShiftStrategy::NextWeekSameDay => {
                self.week_jumps(nominal, zone, &mut trace)?
            }
        };
        trace.push(
            format!("Date shifted due to {shift_reason}"),
            Some(nominal),
            Some(planned),
            format!("strategy: {:?}", policy.shift_strategy),
        );

        Ok(PlannedDateResult {
            planned_debit_date: planned,
            nominal_date: nominal,
            was_shifted: true,
            shift_reason: Some(shift_reason),
            policy,
            resolution_trace: trace.into_steps(),
        })
    }

    /// Runs many independent computations with per-item failure isolation.
    ///
    /// One item's bad configuration never prevents other items from
    /// receiving a valid planned date. Outcomes preserve input order, and
    /// `success_count + error_count == total_count == items.len()`.
    ///
    /// When `opts.deadline` passes mid-run, items not yet started are
    /// recorded as deadline errors and the partial result is returned
    /// rather than discarding completed work.
    pub fn calculate_batch(
        &self,
        items: &[BatchItem],
        organisation_id: OrganisationId,
        target_month: u32,
        target_year: i32,
        opts: &BatchOptions,
    ) -> BatchResult {
        let mut outcomes = Vec::with_capacity(items.len());
        let mut success_count = 0;
        let mut error_count = 0;

        for item in items {
            let computed = if opts
                .deadline
                .is_some_and(|deadline| std::time::Instant::now() >= deadline)
            {
                Err(EngineError::DeadlineExceeded)
            } else {
                self.calculate_planned_date(&CalculateInput {
                    organisation_id,
                    target_month,
                    target_year,
                    societe_id: Some(item.societe_id),
                    client_id: Some(item.client_id),
                    contrat_id: Some(item.contrat_id),
                    include_resolution_trace: false,
                })
            };

            let outcome = match computed {
                Ok(result) => {
                    success_count += 1;
                    ItemOutcome::Planned(result)
                }
                Err(err) => {
                    error_count += 1;
                    warn!(
                        contrat_id = %item.contrat_id,
                        code = err.code(),
                        "batch item failed: {err}"
                    );
                    ItemOutcome::Failed(ItemFailure {
                        code: err.code().to_string(),
                        message: err.to_string(),
                    })
                }
            };
            outcomes.push(BatchOutcome {
                contrat_id: item.contrat_id,
                client_id: item.client_id,
                societe_id: item.societe_id,
                amount: item.amount.clone(),
                outcome,
            });
        }

        BatchResult {
            total_count: items.len(),
            success_count,
            error_count,
            outcomes,
        }
    }

    /// Eligibility check that also records a trace step.
    fn check(
        &self,
        date: NaiveDate,
        zone: HolidayZoneId,
        trace: &mut Trace,
    ) -> Result<DateEligibility, EngineError> {
        let eligibility = self.eligibility.check_eligibility(date, zone)?;
        trace.push(
            "Checked date eligibility",
            Some(date),
            None,
            eligibility
                .reason
                .clone()
                .unwrap_or_else(|| "eligible".to_string()),
        );
        Ok(eligibility)
    }

    /// Walks one day at a time (forward or back) until an eligible date.
    fn step_days(
        &self,
        start: NaiveDate,
        delta_days: i64,
        zone: HolidayZoneId,
        trace: &mut Trace,
    ) -> Result<NaiveDate, EngineError> {
        let mut current = start;
        for _ in 0..MAX_DAY_STEPS {
            current += Duration::days(delta_days);
            if self.check(current, zone, trace)?.is_eligible {
                return Ok(current);
            }
        }
        Err(EngineError::ShiftBoundExceeded {
            start,
            holiday_zone_id: zone,
            attempts: MAX_DAY_STEPS,
        })
    }

    /// Jumps forward in whole weeks from the nominal date until an eligible
    /// date, keeping the same weekday.
    fn week_jumps(
        &self,
        nominal: NaiveDate,
        zone: HolidayZoneId,
        trace: &mut Trace,
    ) -> Result<NaiveDate, EngineError> {
        for jump in 1..=i64::from(MAX_WEEK_JUMPS) {
            let candidate = nominal + Duration::weeks(jump);
            if self.check(candidate, zone, trace)?.is_eligible {
                return Ok(candidate);
            }
        }
        Err(EngineError::ShiftBoundExceeded {
            start: nominal,
            holiday_zone_id: zone,
            attempts: MAX_WEEK_JUMPS,
        })
    }
}

/// Derives the nominal date from the policy and target month.
fn nominal_date(year: i32, month: u32, policy: &DebitPolicy) -> Result<NaiveDate, EngineError> {
    if !(1..=12).contains(&month) {
        return Err(EngineError::InvalidTargetMonth { month });
    }

    let day = match policy.mode {
        DebitMode::Batch => policy
            .batch
            .ok_or_else(|| EngineError::ConfigurationInvalid {
                config_id: policy.applied_config_id,
                detail: "batch slot is required when mode is batch".to_string(),
            })?
            .day_of_month(),
        DebitMode::FixedDay => {
            let day = policy
                .fixed_day
                .ok_or_else(|| EngineError::ConfigurationInvalid {
                    config_id: policy.applied_config_id,
                    detail: "fixed day is required when mode is fixed_day".to_string(),
                })?;
            if !(1..=31).contains(&day) {
                return Err(EngineError::ConfigurationInvalid {
                    config_id: policy.applied_config_id,
                    detail: format!("fixed day {day} is out of range 1-31"),
                });
            }
            u32::from(day)
        }
    };

    // Never clamp: day 30 in February is a hard error, not the 28th.
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or(EngineError::DayOutOfRangeForMonth { day, month, year })
}

fn shift_reason(eligibility: &DateEligibility) -> String {
    if eligibility.is_weekend {
        "weekend".to_string()
    } else {
        format!(
            "holiday: {}",
            eligibility.holiday_name.as_deref().unwrap_or("unknown")
        )
    }
}
