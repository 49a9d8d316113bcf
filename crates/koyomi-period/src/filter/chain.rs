//! Ordered predicate chain with short-circuit evaluation.

use std::cmp::Ordering;

use tracing::trace;

use koyomi_core::temporal::Temporal;

use crate::error::PeriodResult;
use crate::filter::{FilterEntry, FilterQuery, PredicateSpec, Verdict};
use crate::period::Period;

/// Ordered list of filter entries.
///
/// Built-in entries (end bound, recurrence) live in this list alongside
/// user entries, in insertion order; the period's termination state is
/// derived by scanning for them, never stored separately.
#[derive(Clone)]
pub struct FilterChain<T: Temporal> {
    entries: Vec<FilterEntry<T>>,
}

impl<T: Temporal> FilterChain<T> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Evaluates a candidate against every entry in order.
    ///
    /// The first Reject or Terminate short-circuits the chain; remaining
    /// entries are not consulted for this candidate. Opaque entries are
    /// skipped as always-Accept.
    ///
    /// ## Errors
    /// Propagates [`TemporalError::UnknownPredicate`] untouched when a
    /// resolved name is not a capability of the temporal value.
    ///
    /// [`TemporalError::UnknownPredicate`]: koyomi_core::error::TemporalError::UnknownPredicate
    pub fn evaluate(
        &self,
        candidate: &T,
        position: usize,
        owner: &Period<T>,
    ) -> PeriodResult<Verdict> {
        for entry in &self.entries {
            let verdict = match entry.spec() {
                PredicateSpec::Callable(predicate) => predicate(candidate, position, owner),
                PredicateSpec::Named { name, args } => {
                    if candidate.query(name, args)? {
                        Verdict::Accept
                    } else {
                        Verdict::Reject
                    }
                }
                PredicateSpec::Opaque { .. } => Verdict::Accept,
                PredicateSpec::EndBound(bound) => match candidate.cmp(bound) {
                    Ordering::Less => Verdict::Accept,
                    Ordering::Equal if owner.options().excludes_end() => Verdict::Terminate,
                    Ordering::Equal => Verdict::Accept,
                    Ordering::Greater => Verdict::Terminate,
                },
                PredicateSpec::Recurrence(count) => {
                    if position >= *count {
                        Verdict::Terminate
                    } else {
                        Verdict::Accept
                    }
                }
                PredicateSpec::TerminateNow => Verdict::Terminate,
            };
            match verdict {
                Verdict::Accept => {}
                Verdict::Reject | Verdict::Terminate => {
                    trace!(position, ?verdict, label = ?entry.label(), "chain short-circuit");
                    return Ok(verdict);
                }
            }
        }
        Ok(Verdict::Accept)
    }

    /// Ordered snapshot of the current entries.
    #[must_use]
    pub fn entries(&self) -> &[FilterEntry<T>] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn add(&mut self, entry: FilterEntry<T>, at_front: bool) {
        if at_front {
            self.entries.insert(0, entry);
        } else {
            self.entries.push(entry);
        }
    }

    /// Removes every entry the query matches; returns how many were removed.
    /// Relative order of the remaining entries is preserved.
    pub fn remove(&mut self, query: &FilterQuery<'_, T>) -> usize {
        let before = self.entries.len();
        self.entries.retain(|entry| !query.matches(entry));
        before - self.entries.len()
    }

    #[must_use]
    pub fn has(&self, query: &FilterQuery<'_, T>) -> bool {
        self.entries.iter().any(|entry| query.matches(entry))
    }

    /// Replaces the whole chain. Any built-in entries present in the new
    /// list become the period's derived termination state.
    pub fn set_all(&mut self, entries: Vec<FilterEntry<T>>) {
        self.entries = entries;
    }

    /// Drops every user entry, keeping exactly the built-in entries implied
    /// by the current termination configuration. Idempotent.
    pub fn reset_to_builtins(&mut self) {
        self.entries.retain(FilterEntry::is_builtin);
    }

    /// The configured end bound, derived by scanning for the built-in entry.
    #[must_use]
    pub fn end_bound(&self) -> Option<&T> {
        self.entries.iter().find_map(|entry| match entry.spec() {
            PredicateSpec::EndBound(bound) => Some(bound),
            _ => None,
        })
    }

    /// The configured recurrence count, derived by scanning.
    #[must_use]
    pub fn recurrence(&self) -> Option<usize> {
        self.entries.iter().find_map(|entry| match entry.spec() {
            PredicateSpec::Recurrence(count) => Some(*count),
            _ => None,
        })
    }

    /// Replaces the end-bound entry in place, or appends one.
    pub fn upsert_end_bound(&mut self, bound: T) {
        let existing = self
            .entries
            .iter_mut()
            .find(|entry| matches!(entry.spec(), PredicateSpec::EndBound(_)));
        if let Some(entry) = existing {
            *entry.spec_mut() = PredicateSpec::EndBound(bound);
        } else {
            self.entries.push(FilterEntry::new(PredicateSpec::EndBound(bound)));
        }
    }

    /// Removes the end-bound entry only, leaving everything else untouched.
    pub fn clear_end_bound(&mut self) {
        self.entries
            .retain(|entry| !matches!(entry.spec(), PredicateSpec::EndBound(_)));
    }

    /// Replaces the recurrence entry in place, or appends one.
    pub fn upsert_recurrence(&mut self, count: usize) {
        let existing = self
            .entries
            .iter_mut()
            .find(|entry| matches!(entry.spec(), PredicateSpec::Recurrence(_)));
        if let Some(entry) = existing {
            *entry.spec_mut() = PredicateSpec::Recurrence(count);
        } else {
            self.entries
                .push(FilterEntry::new(PredicateSpec::Recurrence(count)));
        }
    }

    /// Removes the recurrence entry only, leaving everything else untouched.
    pub fn clear_recurrence(&mut self) {
        self.entries
            .retain(|entry| !matches!(entry.spec(), PredicateSpec::Recurrence(_)));
    }
}

impl<T: Temporal> Default for FilterChain<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Temporal + std::fmt::Debug> std::fmt::Debug for FilterChain<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(&self.entries).finish()
    }
}
