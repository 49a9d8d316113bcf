//! Named boolean predicates shared by the chrono-backed temporal values.
//!
//! This is the registry behind `Temporal::query`. Every name carries the
//! `is_` prefix, matching the resolution convention in
//! `crate::constants::PREDICATE_NAME_PREFIX`.

use chrono::{Datelike, NaiveDate, Weekday};

use crate::error::{CoreResult, TemporalError};
use crate::temporal::PredicateArg;

pub(crate) fn query(date: NaiveDate, name: &str, args: &[PredicateArg]) -> CoreResult<bool> {
    match name {
        "is_weekend" => {
            expect_no_args(name, args)?;
            Ok(matches!(date.weekday(), Weekday::Sat | Weekday::Sun))
        }
        "is_weekday" => {
            expect_no_args(name, args)?;
            Ok(!matches!(date.weekday(), Weekday::Sat | Weekday::Sun))
        }
        "is_first_day_of_month" => {
            expect_no_args(name, args)?;
            Ok(date.day() == 1)
        }
        "is_last_day_of_month" => {
            expect_no_args(name, args)?;
            Ok(date.succ_opt().is_none_or(|next| next.month() != date.month()))
        }
        "is_leap_year" => {
            expect_no_args(name, args)?;
            Ok(NaiveDate::from_ymd_opt(date.year(), 2, 29).is_some())
        }
        "is_day_of_week" => {
            let day = expect_one_int(name, args)?;
            if !(1..=7).contains(&day) {
                return Err(TemporalError::InvalidArguments {
                    name: name.to_string(),
                    reason: format!("day of week must be 1..=7 (Monday = 1), got {day}"),
                });
            }
            Ok(i64::from(date.weekday().number_from_monday()) == day)
        }
        _ => Err(TemporalError::UnknownPredicate(name.to_string())),
    }
}

fn expect_no_args(name: &str, args: &[PredicateArg]) -> CoreResult<()> {
    if args.is_empty() {
        Ok(())
    } else {
        Err(TemporalError::InvalidArguments {
            name: name.to_string(),
            reason: format!("expected no arguments, got {}", args.len()),
        })
    }
}

fn expect_one_int(name: &str, args: &[PredicateArg]) -> CoreResult<i64> {
    match args {
        [PredicateArg::Int(value)] => Ok(*value),
        _ => Err(TemporalError::InvalidArguments {
            name: name.to_string(),
            reason: "expected exactly one integer argument".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn weekend_and_weekday_are_complements() {
        // 2018-04-14 was a Saturday.
        assert!(query(date(2018, 4, 14), "is_weekend", &[]).unwrap());
        assert!(!query(date(2018, 4, 14), "is_weekday", &[]).unwrap());
        assert!(query(date(2018, 4, 16), "is_weekday", &[]).unwrap());
    }

    #[test]
    fn month_boundaries() {
        assert!(query(date(2018, 4, 1), "is_first_day_of_month", &[]).unwrap());
        assert!(query(date(2018, 4, 30), "is_last_day_of_month", &[]).unwrap());
        assert!(!query(date(2018, 2, 28), "is_first_day_of_month", &[]).unwrap());
        assert!(query(date(2020, 2, 29), "is_last_day_of_month", &[]).unwrap());
        assert!(!query(date(2020, 2, 28), "is_last_day_of_month", &[]).unwrap());
    }

    #[test]
    fn leap_years() {
        assert!(query(date(2020, 6, 1), "is_leap_year", &[]).unwrap());
        assert!(!query(date(2018, 6, 1), "is_leap_year", &[]).unwrap());
        assert!(!query(date(1900, 6, 1), "is_leap_year", &[]).unwrap());
        assert!(query(date(2000, 6, 1), "is_leap_year", &[]).unwrap());
    }

    #[test]
    fn day_of_week_takes_one_bounded_int() {
        let monday = date(2018, 4, 16);
        assert!(query(monday, "is_day_of_week", &[PredicateArg::Int(1)]).unwrap());
        assert!(!query(monday, "is_day_of_week", &[PredicateArg::Int(2)]).unwrap());

        let err = query(monday, "is_day_of_week", &[PredicateArg::Int(8)]).unwrap_err();
        assert!(matches!(err, TemporalError::InvalidArguments { .. }));

        let err = query(monday, "is_day_of_week", &[]).unwrap_err();
        assert!(matches!(err, TemporalError::InvalidArguments { .. }));
    }

    #[test]
    fn unknown_names_fail() {
        let err = query(date(2018, 4, 16), "is_blue_moon", &[]).unwrap_err();
        assert!(matches!(err, TemporalError::UnknownPredicate(name) if name == "is_blue_moon"));
    }
}
