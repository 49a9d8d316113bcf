//! Lazy date-sequence generation with a composable filter pipeline.
//!
//! A [`Period`] pairs a start value and a step interval with an ordered
//! chain of predicates. Traversing the period produces every candidate the
//! chain accepts, in order, until a termination entry (end bound,
//! recurrence count, or an explicit terminate filter) ends the sequence.
//!
//! The engine is generic over [`Temporal`]; chrono-backed implementations
//! for plain dates and zoned date-times live in [`calendar`].
//!
//! ```
//! use chrono::NaiveDate;
//! use koyomi_period::{CalendarStep, Period};
//!
//! # fn main() -> Result<(), koyomi_period::PeriodError> {
//! let start = NaiveDate::from_ymd_opt(2018, 4, 16).unwrap();
//! let end = NaiveDate::from_ymd_opt(2018, 4, 18).unwrap();
//! let period = Period::between(start, end, CalendarStep::days(1));
//!
//! let days: Vec<NaiveDate> = period.iter().collect::<Result<_, _>>()?;
//! assert_eq!(days.len(), 3);
//! # Ok(())
//! # }
//! ```

pub use koyomi_core::calendar;
pub mod cursor;
pub mod error;
pub mod filter;
pub mod period;

pub use calendar::CalendarStep;
pub use cursor::PeriodIter;
pub use error::{PeriodError, PeriodResult};
pub use filter::{FilterChain, FilterEntry, FilterQuery, PredicateSpec, Verdict};
pub use koyomi_core::constants;
pub use koyomi_core::error::TemporalError;
pub use koyomi_core::temporal::{PredicateArg, Temporal};
pub use period::{FrozenPeriod, Period, PeriodOptions};
