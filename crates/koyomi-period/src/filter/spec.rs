//! Predicate specifications and the entries that carry them.

use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use koyomi_core::constants::PREDICATE_NAME_PREFIX;
use koyomi_core::temporal::{PredicateArg, Temporal};

use crate::period::Period;

/// Outcome of one predicate evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// The candidate is part of the sequence.
    Accept,
    /// Skip this candidate and continue searching.
    Reject,
    /// Stop the whole sequence now, excluding this candidate.
    Terminate,
}

/// Shared predicate closure: `(candidate, position, owner) -> Verdict`.
///
/// `position` is the index of the output slot currently being searched for;
/// it advances only when a candidate is emitted, so a predicate sees each
/// position exactly once per traversal.
pub type PredicateFn<T> = Rc<dyn Fn(&T, usize, &Period<T>) -> Verdict>;

/// What a filter entry does when consulted.
///
/// Entries compare by structural equality; callables compare by closure
/// identity. The two built-in variants are synthesized by the engine and
/// double as the period's derived termination state.
#[derive(Clone)]
pub enum PredicateSpec<T: Temporal> {
    /// A caller-supplied predicate closure.
    Callable(PredicateFn<T>),
    /// A name resolved against the temporal value's predicate registry.
    Named {
        name: String,
        args: Vec<PredicateArg>,
    },
    /// An unresolved name kept only for identity bookkeeping. Skipped as
    /// always-Accept during evaluation, never invoked.
    Opaque {
        name: String,
        args: Vec<PredicateArg>,
    },
    /// Built-in absolute ceiling on candidate values.
    EndBound(T),
    /// Built-in recurrence budget: terminates once `n` values were emitted.
    Recurrence(usize),
    /// Ends the sequence at the first candidate it sees.
    TerminateNow,
}

impl<T: Temporal> PredicateSpec<T> {
    /// Wraps a closure as a callable predicate entry.
    #[must_use]
    pub fn callable(f: impl Fn(&T, usize, &Period<T>) -> Verdict + 'static) -> Self {
        Self::Callable(Rc::new(f))
    }

    /// Builds a named predicate entry, applying the resolution rule.
    ///
    /// Names carrying [`PREDICATE_NAME_PREFIX`] resolve to an invocable
    /// entry backed by [`Temporal::query`]; any other name is stored as an
    /// opaque entry that participates in lookup and removal but is never
    /// invoked.
    #[must_use]
    pub fn named(name: impl Into<String>, args: Vec<PredicateArg>) -> Self {
        let name = name.into();
        if name.starts_with(PREDICATE_NAME_PREFIX) {
            Self::Named { name, args }
        } else {
            Self::Opaque { name, args }
        }
    }

    /// True for the entries the engine synthesizes itself.
    #[must_use]
    pub const fn is_builtin(&self) -> bool {
        matches!(self, Self::EndBound(_) | Self::Recurrence(_))
    }
}

impl<T: Temporal> PartialEq for PredicateSpec<T> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Callable(a), Self::Callable(b)) => {
                // Closure identity: compare data pointers, not vtables.
                std::ptr::eq(Rc::as_ptr(a).cast::<()>(), Rc::as_ptr(b).cast::<()>())
            }
            (
                Self::Named { name: a, args: x },
                Self::Named { name: b, args: y },
            )
            | (
                Self::Opaque { name: a, args: x },
                Self::Opaque { name: b, args: y },
            ) => a == b && x == y,
            (Self::EndBound(a), Self::EndBound(b)) => a == b,
            (Self::Recurrence(a), Self::Recurrence(b)) => a == b,
            (Self::TerminateNow, Self::TerminateNow) => true,
            _ => false,
        }
    }
}

impl<T: Temporal + fmt::Debug> fmt::Debug for PredicateSpec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Callable(_) => f.write_str("Callable(..)"),
            Self::Named { name, args } => f
                .debug_struct("Named")
                .field("name", name)
                .field("args", args)
                .finish(),
            Self::Opaque { name, args } => f
                .debug_struct("Opaque")
                .field("name", name)
                .field("args", args)
                .finish(),
            Self::EndBound(bound) => f.debug_tuple("EndBound").field(bound).finish(),
            Self::Recurrence(n) => f.debug_tuple("Recurrence").field(n).finish(),
            Self::TerminateNow => f.write_str("TerminateNow"),
        }
    }
}

/// One pipeline entry: a predicate specification plus an optional label.
#[derive(Clone)]
pub struct FilterEntry<T: Temporal> {
    spec: PredicateSpec<T>,
    label: Option<String>,
}

impl<T: Temporal> FilterEntry<T> {
    #[must_use]
    pub const fn new(spec: PredicateSpec<T>) -> Self {
        Self { spec, label: None }
    }

    #[must_use]
    pub fn labeled(spec: PredicateSpec<T>, label: impl Into<String>) -> Self {
        Self {
            spec,
            label: Some(label.into()),
        }
    }

    #[must_use]
    pub const fn spec(&self) -> &PredicateSpec<T> {
        &self.spec
    }

    pub(crate) fn spec_mut(&mut self) -> &mut PredicateSpec<T> {
        &mut self.spec
    }

    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    #[must_use]
    pub const fn is_builtin(&self) -> bool {
        self.spec.is_builtin()
    }
}

impl<T: Temporal + fmt::Debug> fmt::Debug for FilterEntry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterEntry")
            .field("spec", &self.spec)
            .field("label", &self.label)
            .finish()
    }
}

/// Matching rule for [`remove_filter`] / [`has_filter`] lookups.
///
/// A spec query matches entries by structural equality of their predicate
/// specification; a label query matches entries by label equality. Both
/// match *all* entries that satisfy the rule, not just the first.
///
/// [`remove_filter`]: crate::period::Period::remove_filter
/// [`has_filter`]: crate::period::Period::has_filter
#[derive(Debug)]
pub enum FilterQuery<'q, T: Temporal> {
    Spec(&'q PredicateSpec<T>),
    Label(&'q str),
}

impl<T: Temporal> FilterQuery<'_, T> {
    #[must_use]
    pub fn matches(&self, entry: &FilterEntry<T>) -> bool {
        match self {
            Self::Spec(spec) => entry.spec() == *spec,
            Self::Label(label) => entry.label() == Some(label),
        }
    }
}

impl<'q, T: Temporal> From<&'q str> for FilterQuery<'q, T> {
    fn from(label: &'q str) -> Self {
        Self::Label(label)
    }
}

impl<'q, T: Temporal> From<&'q PredicateSpec<T>> for FilterQuery<'q, T> {
    fn from(spec: &'q PredicateSpec<T>) -> Self {
        Self::Spec(spec)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn named_specs_with_predicate_prefix_resolve() {
        let spec: PredicateSpec<NaiveDate> = PredicateSpec::named("is_weekend", vec![]);
        assert!(matches!(spec, PredicateSpec::Named { .. }));
    }

    #[test]
    fn named_specs_without_prefix_stay_opaque() {
        let spec: PredicateSpec<NaiveDate> = PredicateSpec::named("weekend", vec![]);
        assert!(matches!(spec, PredicateSpec::Opaque { .. }));
    }

    #[test]
    fn callables_compare_by_identity() {
        let a: PredicateSpec<NaiveDate> = PredicateSpec::callable(|_, _, _| Verdict::Accept);
        let b = a.clone();
        let c: PredicateSpec<NaiveDate> = PredicateSpec::callable(|_, _, _| Verdict::Accept);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn builtin_specs_compare_structurally() {
        assert_eq!(
            PredicateSpec::EndBound(date(2018, 4, 16)),
            PredicateSpec::EndBound(date(2018, 4, 16)),
        );
        assert_ne!(
            PredicateSpec::EndBound(date(2018, 4, 16)),
            PredicateSpec::EndBound(date(2018, 4, 17)),
        );
        assert_eq!(
            PredicateSpec::<NaiveDate>::Recurrence(2),
            PredicateSpec::<NaiveDate>::Recurrence(2),
        );
        assert_ne!(
            PredicateSpec::<NaiveDate>::Recurrence(2),
            PredicateSpec::<NaiveDate>::TerminateNow,
        );
    }

    #[test]
    fn label_queries_match_labels_only() {
        let entry = FilterEntry::labeled(
            PredicateSpec::<NaiveDate>::named("weekend", vec![]),
            "mine",
        );
        assert!(FilterQuery::from("mine").matches(&entry));
        assert!(!FilterQuery::from("other").matches(&entry));
        let unlabeled = FilterEntry::new(PredicateSpec::<NaiveDate>::TerminateNow);
        assert!(!FilterQuery::from("mine").matches(&unlabeled));
    }
}
