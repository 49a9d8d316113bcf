//! Minimal-dependency shared layer for the koyomi workspace.
//!
//! Holds the temporal-value contract consumed by the period engine, the
//! core error taxonomy, and tunable constants.

pub mod calendar;
pub mod constants;
pub mod error;
pub mod temporal;
