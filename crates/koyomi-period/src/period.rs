//! The period aggregate: start value, step interval, filter chain, and
//! boundary options, exposed as a restartable lazy sequence.

use serde::{Deserialize, Serialize};
use tracing::debug;

use koyomi_core::constants::DEFAULT_MAX_SEARCH_ATTEMPTS;
use koyomi_core::temporal::Temporal;

use crate::cursor::PeriodIter;
use crate::error::PeriodResult;
use crate::filter::{FilterChain, FilterEntry, FilterQuery, PredicateSpec, Verdict};

/// Boundary-exclusion option set.
///
/// `set_options` replaces the whole set; flags do not accumulate across
/// calls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodOptions {
    exclude_start: bool,
    exclude_end: bool,
}

impl PeriodOptions {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            exclude_start: false,
            exclude_end: false,
        }
    }

    /// Never emit the starting value itself, even if it would pass all
    /// filters. The start value is not moved; it is skipped.
    #[must_use]
    pub const fn exclude_start(mut self) -> Self {
        self.exclude_start = true;
        self
    }

    /// Treat a candidate exactly equal to the end bound as terminating the
    /// sequence instead of being emitted.
    #[must_use]
    pub const fn exclude_end(mut self) -> Self {
        self.exclude_end = true;
        self
    }

    #[must_use]
    pub const fn excludes_start(self) -> bool {
        self.exclude_start
    }

    #[must_use]
    pub const fn excludes_end(self) -> bool {
        self.exclude_end
    }
}

/// A lazily generated, restartable sequence of temporal values.
///
/// A period pairs a start value and a step with an ordered filter chain.
/// Termination state (end bound, recurrence count) is not stored as fields;
/// it is derived by scanning the chain for the built-in entries, so bulk
/// filter replacement redefines it as a side effect.
///
/// This is the mutating variant: setters mutate in place and return
/// `&mut Self` for chaining. [`FrozenPeriod`] wraps the same engine with
/// clone-on-mutate discipline.
#[derive(Debug, Clone)]
pub struct Period<T: Temporal> {
    start: T,
    step: T::Step,
    filters: FilterChain<T>,
    options: PeriodOptions,
    max_search_attempts: usize,
}

impl<T: Temporal> Period<T> {
    /// An open-ended period: no end bound, no recurrence limit.
    #[must_use]
    pub fn new(start: T, step: T::Step) -> Self {
        Self {
            start,
            step,
            filters: FilterChain::new(),
            options: PeriodOptions::new(),
            max_search_attempts: DEFAULT_MAX_SEARCH_ATTEMPTS,
        }
    }

    /// A period bounded by an absolute end value (inclusive unless
    /// `exclude_end` is set).
    #[must_use]
    pub fn between(start: T, end: T, step: T::Step) -> Self {
        let mut period = Self::new(start, step);
        period.set_end_bound(Some(end));
        period
    }

    /// A period bounded by a recurrence count.
    #[must_use]
    pub fn recurring(start: T, step: T::Step, count: usize) -> Self {
        let mut period = Self::new(start, step);
        period.set_recurrence_count(Some(count));
        period
    }

    /// Converts into the non-mutating variant.
    #[must_use]
    pub fn frozen(self) -> FrozenPeriod<T> {
        FrozenPeriod { inner: self }
    }

    #[must_use]
    pub const fn start(&self) -> &T {
        &self.start
    }

    #[must_use]
    pub const fn step(&self) -> &T::Step {
        &self.step
    }

    #[must_use]
    pub const fn options(&self) -> PeriodOptions {
        self.options
    }

    #[must_use]
    pub const fn max_search_attempts(&self) -> usize {
        self.max_search_attempts
    }

    /// Ordered snapshot of the current filter entries, built-ins included.
    #[must_use]
    pub fn filters(&self) -> &[FilterEntry<T>] {
        self.filters.entries()
    }

    /// The configured end bound, derived by scanning the filter chain.
    #[must_use]
    pub fn end_bound(&self) -> Option<&T> {
        self.filters.end_bound()
    }

    /// The configured recurrence count, derived by scanning the chain.
    #[must_use]
    pub fn recurrence_count(&self) -> Option<usize> {
        self.filters.recurrence()
    }

    /// Configures or clears the absolute end bound.
    ///
    /// Upserts the built-in end-bound entry in place (or removes exactly
    /// that entry on `None`), leaving user entries and the recurrence entry
    /// untouched.
    pub fn set_end_bound(&mut self, bound: Option<T>) -> &mut Self {
        match bound {
            Some(bound) => self.filters.upsert_end_bound(bound),
            None => self.filters.clear_end_bound(),
        }
        self
    }

    /// Configures or clears the recurrence count.
    ///
    /// The built-in entry terminates the sequence once `count` values have
    /// been emitted. Coexists with an end bound; whichever fires first
    /// governs.
    pub fn set_recurrence_count(&mut self, count: Option<usize>) -> &mut Self {
        match count {
            Some(count) => self.filters.upsert_recurrence(count),
            None => self.filters.clear_recurrence(),
        }
        self
    }

    /// Appends a filter entry.
    pub fn add_filter(&mut self, spec: PredicateSpec<T>) -> &mut Self {
        self.filters.add(FilterEntry::new(spec), false);
        self
    }

    /// Appends a labeled filter entry. Labels are removal handles; several
    /// entries may share one.
    pub fn add_labeled_filter(&mut self, spec: PredicateSpec<T>, label: impl Into<String>) -> &mut Self {
        self.filters.add(FilterEntry::labeled(spec, label), false);
        self
    }

    /// Inserts a filter entry at the front of the chain.
    pub fn prepend_filter(&mut self, spec: PredicateSpec<T>) -> &mut Self {
        self.filters.add(FilterEntry::new(spec), true);
        self
    }

    /// Removes every entry the query matches (by spec equality or by
    /// label), preserving the relative order of the rest.
    pub fn remove_filter<'q>(&mut self, query: impl Into<FilterQuery<'q, T>>) -> &mut Self
    where
        T: 'q,
    {
        let removed = self.filters.remove(&query.into());
        debug!(removed, "removed filter entries");
        self
    }

    /// Reports whether any entry matches the query.
    #[must_use]
    pub fn has_filter<'q>(&self, query: impl Into<FilterQuery<'q, T>>) -> bool
    where
        T: 'q,
    {
        self.filters.has(&query.into())
    }

    /// Replaces the entire filter chain.
    ///
    /// Built-in entries present in the new list become the derived
    /// termination state; if none are present the period is unbounded. This
    /// lets termination state be serialized and restored via the list.
    pub fn set_filters(&mut self, entries: Vec<FilterEntry<T>>) -> &mut Self {
        self.filters.set_all(entries);
        self
    }

    /// Discards all user entries, reconstructing exactly the built-in
    /// entries implied by the current termination configuration.
    /// Idempotent.
    pub fn reset_filters(&mut self) -> &mut Self {
        self.filters.reset_to_builtins();
        self
    }

    /// Replaces the boundary option set.
    pub fn set_options(&mut self, options: PeriodOptions) -> &mut Self {
        self.options = options;
        self
    }

    /// Overrides the bounded retry ceiling for candidate search.
    pub fn set_max_search_attempts(&mut self, attempts: usize) -> &mut Self {
        self.max_search_attempts = attempts;
        self
    }

    /// Starts a fresh traversal.
    ///
    /// Each call constructs a new cursor; the period holds no traversal
    /// state, so re-consuming it reproduces the same sequence given
    /// unchanged configuration and stateless predicates.
    #[must_use]
    pub fn iter(&self) -> PeriodIter<'_, T> {
        PeriodIter::new(self)
    }

    pub(crate) fn evaluate(&self, candidate: &T, position: usize) -> PeriodResult<Verdict> {
        self.filters.evaluate(candidate, position, self)
    }
}

impl<'p, T: Temporal> IntoIterator for &'p Period<T> {
    type Item = PeriodResult<T>;
    type IntoIter = PeriodIter<'p, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// The non-mutating variant: every setter clones the underlying period,
/// mutates the clone, and returns it, so existing values are never
/// disturbed. Wraps the same engine by composition.
#[derive(Debug, Clone)]
pub struct FrozenPeriod<T: Temporal> {
    inner: Period<T>,
}

impl<T: Temporal> FrozenPeriod<T> {
    #[must_use]
    pub fn new(start: T, step: T::Step) -> Self {
        Period::new(start, step).frozen()
    }

    #[must_use]
    pub fn between(start: T, end: T, step: T::Step) -> Self {
        Period::between(start, end, step).frozen()
    }

    #[must_use]
    pub fn recurring(start: T, step: T::Step, count: usize) -> Self {
        Period::recurring(start, step, count).frozen()
    }

    /// Converts back into the mutating variant.
    #[must_use]
    pub fn thaw(self) -> Period<T> {
        self.inner
    }

    #[must_use]
    pub fn set_end_bound(&self, bound: Option<T>) -> Self {
        let mut next = self.clone();
        next.inner.set_end_bound(bound);
        next
    }

    #[must_use]
    pub fn set_recurrence_count(&self, count: Option<usize>) -> Self {
        let mut next = self.clone();
        next.inner.set_recurrence_count(count);
        next
    }

    #[must_use]
    pub fn add_filter(&self, spec: PredicateSpec<T>) -> Self {
        let mut next = self.clone();
        next.inner.add_filter(spec);
        next
    }

    #[must_use]
    pub fn add_labeled_filter(&self, spec: PredicateSpec<T>, label: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.inner.add_labeled_filter(spec, label);
        next
    }

    #[must_use]
    pub fn prepend_filter(&self, spec: PredicateSpec<T>) -> Self {
        let mut next = self.clone();
        next.inner.prepend_filter(spec);
        next
    }

    #[must_use]
    pub fn remove_filter<'q>(&self, query: impl Into<FilterQuery<'q, T>>) -> Self
    where
        T: 'q,
    {
        let mut next = self.clone();
        next.inner.remove_filter(query);
        next
    }

    #[must_use]
    pub fn has_filter<'q>(&self, query: impl Into<FilterQuery<'q, T>>) -> bool
    where
        T: 'q,
    {
        self.inner.has_filter(query)
    }

    #[must_use]
    pub fn set_filters(&self, entries: Vec<FilterEntry<T>>) -> Self {
        let mut next = self.clone();
        next.inner.set_filters(entries);
        next
    }

    #[must_use]
    pub fn reset_filters(&self) -> Self {
        let mut next = self.clone();
        next.inner.reset_filters();
        next
    }

    #[must_use]
    pub fn set_options(&self, options: PeriodOptions) -> Self {
        let mut next = self.clone();
        next.inner.set_options(options);
        next
    }

    #[must_use]
    pub fn set_max_search_attempts(&self, attempts: usize) -> Self {
        let mut next = self.clone();
        next.inner.set_max_search_attempts(attempts);
        next
    }

    #[must_use]
    pub const fn start(&self) -> &T {
        self.inner.start()
    }

    #[must_use]
    pub const fn step(&self) -> &T::Step {
        self.inner.step()
    }

    #[must_use]
    pub const fn options(&self) -> PeriodOptions {
        self.inner.options()
    }

    #[must_use]
    pub fn filters(&self) -> &[FilterEntry<T>] {
        self.inner.filters()
    }

    #[must_use]
    pub fn end_bound(&self) -> Option<&T> {
        self.inner.end_bound()
    }

    #[must_use]
    pub fn recurrence_count(&self) -> Option<usize> {
        self.inner.recurrence_count()
    }

    #[must_use]
    pub fn iter(&self) -> PeriodIter<'_, T> {
        self.inner.iter()
    }
}

impl<T: Temporal> From<Period<T>> for FrozenPeriod<T> {
    fn from(period: Period<T>) -> Self {
        period.frozen()
    }
}

impl<'p, T: Temporal> IntoIterator for &'p FrozenPeriod<T> {
    type Item = PeriodResult<T>;
    type IntoIter = PeriodIter<'p, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
