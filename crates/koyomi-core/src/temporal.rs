//! The temporal-value contract consumed by the period engine.
//!
//! The engine never does calendar arithmetic itself; it works against any
//! type implementing [`Temporal`]. Concrete chrono-backed implementations
//! live in `koyomi-period::calendar`.

use serde::{Deserialize, Serialize};

use crate::error::CoreResult;

/// Argument to a named boolean predicate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredicateArg {
    Int(i64),
    Str(String),
}

impl From<i64> for PredicateArg {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<&str> for PredicateArg {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl std::fmt::Display for PredicateArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Str(s) => f.write_str(s),
        }
    }
}

/// An immutable point in time.
///
/// Values are cheap to clone and freely shareable; every operation returns
/// a new value rather than mutating in place.
pub trait Temporal: Clone + Ord {
    /// Opaque step descriptor understood only by [`Temporal::advance`].
    ///
    /// A step may be degenerate (zero-length); the engine does not
    /// special-case this and relies on filters and termination entries to
    /// bound the sequence.
    type Step: Clone + std::fmt::Debug;

    /// Returns this value advanced by one step.
    ///
    /// Out-of-range results saturate rather than panic.
    #[must_use]
    fn advance(&self, step: &Self::Step) -> Self;

    /// Invokes a named boolean predicate from this value's registry.
    ///
    /// ## Errors
    /// Returns [`TemporalError::UnknownPredicate`] if the name is not a
    /// recognized capability, or [`TemporalError::InvalidArguments`] if the
    /// arguments do not match the predicate's signature.
    ///
    /// [`TemporalError::UnknownPredicate`]: crate::error::TemporalError::UnknownPredicate
    /// [`TemporalError::InvalidArguments`]: crate::error::TemporalError::InvalidArguments
    fn query(&self, name: &str, args: &[PredicateArg]) -> CoreResult<bool>;
}
