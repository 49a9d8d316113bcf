//! Chrono-backed temporal values.
//!
//! Implements [`Temporal`](crate::temporal::Temporal) for plain
//! calendar dates and for zoned date-times, stepping by [`CalendarStep`].

mod date;
mod datetime;
mod predicates;
mod step;

pub use step::CalendarStep;
