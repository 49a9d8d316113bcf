//! Calendar-unit step interval.

use chrono::{Days, Duration, Months, NaiveDate, NaiveDateTime};

/// A step interval combining calendar units with a sub-day duration.
///
/// Month and year arithmetic clamps to the last valid day of the target
/// month (Jan 31 + 1 month = Feb 28). Out-of-range results saturate at the
/// chrono date limits. The default step is zero-length; the engine allows
/// this and relies on termination entries to bound the resulting sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarStep {
    months: i32,
    days: i64,
    time: Duration,
}

impl CalendarStep {
    #[must_use]
    pub fn zero() -> Self {
        Self {
            months: 0,
            days: 0,
            time: Duration::zero(),
        }
    }

    #[must_use]
    pub fn days(count: i64) -> Self {
        Self {
            days: count,
            ..Self::zero()
        }
    }

    #[must_use]
    pub fn weeks(count: i64) -> Self {
        Self::days(count * 7)
    }

    #[must_use]
    pub fn months(count: i32) -> Self {
        Self {
            months: count,
            ..Self::zero()
        }
    }

    #[must_use]
    pub fn years(count: i32) -> Self {
        Self::months(count * 12)
    }

    #[must_use]
    pub fn hours(count: i64) -> Self {
        Self {
            time: Duration::hours(count),
            ..Self::zero()
        }
    }

    #[must_use]
    pub fn minutes(count: i64) -> Self {
        Self {
            time: Duration::minutes(count),
            ..Self::zero()
        }
    }

    #[must_use]
    pub fn seconds(count: i64) -> Self {
        Self {
            time: Duration::seconds(count),
            ..Self::zero()
        }
    }

    /// Combines two steps unit-wise.
    #[must_use]
    pub fn and(self, other: Self) -> Self {
        Self {
            months: self.months + other.months,
            days: self.days + other.days,
            time: self.time + other.time,
        }
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.months == 0 && self.days == 0 && self.time.is_zero()
    }

    /// Shifts a plain date by the calendar portion of this step. The
    /// sub-day component does not apply to dates.
    pub(crate) fn shift_date(&self, date: NaiveDate) -> NaiveDate {
        let months = Months::new(self.months.unsigned_abs());
        let shifted = if self.months >= 0 {
            date.checked_add_months(months)
        } else {
            date.checked_sub_months(months)
        };
        let shifted = shifted.unwrap_or(if self.months >= 0 {
            NaiveDate::MAX
        } else {
            NaiveDate::MIN
        });

        let days = Days::new(self.days.unsigned_abs());
        let shifted = if self.days >= 0 {
            shifted.checked_add_days(days)
        } else {
            shifted.checked_sub_days(days)
        };
        shifted.unwrap_or(if self.days >= 0 {
            NaiveDate::MAX
        } else {
            NaiveDate::MIN
        })
    }

    /// Shifts a naive date-time: calendar units first, preserving the time
    /// of day, then the sub-day duration.
    pub(crate) fn shift_naive(&self, value: NaiveDateTime) -> NaiveDateTime {
        let shifted = NaiveDateTime::new(self.shift_date(value.date()), value.time());
        shifted
            .checked_add_signed(self.time)
            .unwrap_or(if self.time >= Duration::zero() {
                NaiveDateTime::MAX
            } else {
                NaiveDateTime::MIN
            })
    }
}

impl Default for CalendarStep {
    fn default() -> Self {
        Self::zero()
    }
}
