//! `Temporal` implementation for plain calendar dates.

use chrono::NaiveDate;

use crate::error::CoreResult;
use crate::temporal::{PredicateArg, Temporal};

use super::step::CalendarStep;
use super::predicates;

impl Temporal for NaiveDate {
    type Step = CalendarStep;

    /// Advances by the calendar portion of the step. A sub-day duration
    /// component does not apply to plain dates and is ignored.
    fn advance(&self, step: &CalendarStep) -> Self {
        step.shift_date(*self)
    }

    fn query(&self, name: &str, args: &[PredicateArg]) -> CoreResult<bool> {
        predicates::query(*self, name, args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_steps_by_calendar_units() {
        let start = NaiveDate::from_ymd_opt(2018, 4, 16).unwrap();
        assert_eq!(
            start.advance(&CalendarStep::days(1)),
            NaiveDate::from_ymd_opt(2018, 4, 17).unwrap(),
        );
        assert_eq!(
            start.advance(&CalendarStep::weeks(2)),
            NaiveDate::from_ymd_opt(2018, 4, 30).unwrap(),
        );
    }

    #[test]
    fn sub_day_step_component_is_ignored_for_dates() {
        let start = NaiveDate::from_ymd_opt(2018, 4, 16).unwrap();
        assert_eq!(start.advance(&CalendarStep::hours(36)), start);
    }
}
