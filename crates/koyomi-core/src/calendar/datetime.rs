//! `Temporal` implementation for zoned date-times.
//!
//! Calendar units are applied in local time, so a daily step lands on the
//! same wall-clock time across a DST transition. Ambiguous local times
//! (DST fold) resolve to the earliest mapping; non-existent local times
//! (DST gap) are reinterpreted through the original value's UTC offset.

use chrono::{DateTime, Duration, LocalResult, Offset, TimeZone};

use crate::error::CoreResult;
use crate::temporal::{PredicateArg, Temporal};

use super::step::CalendarStep;
use super::predicates;

impl<Tz: TimeZone> Temporal for DateTime<Tz> {
    type Step = CalendarStep;

    fn advance(&self, step: &CalendarStep) -> Self {
        let tz = self.timezone();
        let shifted = step.shift_naive(self.naive_local());
        match tz.from_local_datetime(&shifted) {
            LocalResult::Single(out) => out,
            LocalResult::Ambiguous(earliest, _) => earliest,
            LocalResult::None => {
                let offset = i64::from(self.offset().fix().local_minus_utc());
                tz.from_utc_datetime(&(shifted - Duration::seconds(offset)))
            }
        }
    }

    fn query(&self, name: &str, args: &[PredicateArg]) -> CoreResult<bool> {
        predicates::query(self.naive_local().date(), name, args)
    }
}
