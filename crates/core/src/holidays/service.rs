//! Date eligibility checks against a holiday zone.

use chrono::{Datelike, NaiveDate, Weekday};
use debitcal_shared::types::HolidayZoneId;

use super::error::HolidayError;
use super::types::{DateEligibility, Holiday};

/// Lookup into a zone's holiday calendar.
///
/// Implementations live outside this crate (database tables, a national
/// holiday library, a remote reference service). The lookup is read-mostly
/// and must be safe to call repeatedly for every shift attempt.
pub trait HolidayCalendar: Send + Sync {
    /// Returns the holiday listed on `date` in `zone`, if any.
    fn holiday_on(&self, date: NaiveDate, zone: HolidayZoneId)
        -> Result<Option<Holiday>, HolidayError>;
}

impl<C: HolidayCalendar + ?Sized> HolidayCalendar for std::sync::Arc<C> {
    fn holiday_on(
        &self,
        date: NaiveDate,
        zone: HolidayZoneId,
    ) -> Result<Option<Holiday>, HolidayError> {
        (**self).holiday_on(date, zone)
    }
}

/// Eligibility rules over a holiday calendar.
///
/// The weekend rule is universal and checked here; only the holiday lookup
/// goes through the injected calendar. Pure and idempotent: no mutation,
/// identical inputs give identical answers while the calendar is unchanged.
pub struct EligibilityService<C> {
    calendar: C,
}

impl<C: HolidayCalendar> EligibilityService<C> {
    /// Creates a new eligibility service over the given calendar.
    pub const fn new(calendar: C) -> Self {
        Self { calendar }
    }

    /// Reports whether `date` is usable for a debit in `zone`.
    ///
    /// Weekends short-circuit: the calendar is not consulted for a Saturday
    /// or Sunday.
    ///
    /// # Errors
    ///
    /// Returns [`HolidayError`] when the calendar lookup itself fails.
    pub fn check_eligibility(
        &self,
        date: NaiveDate,
        zone: HolidayZoneId,
    ) -> Result<DateEligibility, HolidayError> {
        match date.weekday() {
            Weekday::Sat | Weekday::Sun => {
                return Ok(DateEligibility {
                    is_eligible: false,
                    is_weekend: true,
                    is_holiday: false,
                    holiday_name: None,
                    reason: Some(weekday_name(date.weekday()).to_string()),
                });
            }
            _ => {}
        }

        if let Some(holiday) = self.calendar.holiday_on(date, zone)? {
            return Ok(DateEligibility {
                is_eligible: false,
                is_weekend: false,
                is_holiday: true,
                reason: Some(format!("Holiday: {}", holiday.name)),
                holiday_name: Some(holiday.name),
            });
        }

        Ok(DateEligibility::eligible())
    }
}

const fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}
