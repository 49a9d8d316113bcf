//! The per-traversal iteration state machine.
//!
//! A cursor walks `Start -> Searching -> {Emitting, Exhausted, Failed}`,
//! looping `Emitting -> Searching` until the chain terminates the sequence
//! or the retry ceiling trips.

use tracing::{debug, trace};

use koyomi_core::temporal::Temporal;

use crate::error::{PeriodError, PeriodResult};
use crate::filter::Verdict;
use crate::period::Period;

/// One traversal of a [`Period`].
///
/// Created fresh by [`Period::iter`]. The cursor caches the outcome of each
/// search, so for a fixed candidate position the filter chain is evaluated
/// at most once no matter how many times the consumer probes — a stateful
/// user predicate sees exactly one call per output position.
pub struct PeriodIter<'p, T: Temporal> {
    period: &'p Period<T>,
    candidate: T,
    position: usize,
    pending: Option<Outcome<T>>,
    skip_start: bool,
    finished: bool,
}

enum Outcome<T> {
    Emit(T),
    Exhausted,
    Failed(PeriodError),
}

impl<'p, T: Temporal> PeriodIter<'p, T> {
    pub(crate) fn new(period: &'p Period<T>) -> Self {
        Self {
            period,
            candidate: period.start().clone(),
            position: 0,
            pending: None,
            skip_start: period.options().excludes_start(),
            finished: false,
        }
    }

    /// Reports whether a value is still available.
    ///
    /// Returns `false` only when the sequence is cleanly exhausted; a
    /// pending failure still reports `true` and surfaces as an `Err` from
    /// the next pull. The search outcome is cached, so probing repeatedly
    /// costs nothing and runs no predicate twice.
    pub fn has_next(&mut self) -> bool {
        self.ensure_pending();
        matches!(self.pending, Some(Outcome::Emit(_) | Outcome::Failed(_)))
    }

    fn ensure_pending(&mut self) {
        if self.pending.is_none() && !self.finished {
            let outcome = self.search();
            self.pending = Some(outcome);
        }
    }

    /// Runs the Searching state: advances through rejected candidates until
    /// one is accepted, the chain terminates, or the retry ceiling trips.
    fn search(&mut self) -> Outcome<T> {
        let mut attempts = 0_usize;
        loop {
            if self.skip_start {
                // Implicit filter for the ExcludeStart option, active only
                // before the first output position.
                self.skip_start = false;
                trace!("skipping excluded start value");
                self.candidate = self.candidate.advance(self.period.step());
                attempts += 1;
                continue;
            }
            match self.period.evaluate(&self.candidate, self.position) {
                Ok(Verdict::Accept) => {
                    trace!(position = self.position, "candidate accepted");
                    return Outcome::Emit(self.candidate.clone());
                }
                Ok(Verdict::Reject) => {
                    attempts += 1;
                    if attempts >= self.period.max_search_attempts() {
                        debug!(attempts, "retry ceiling exceeded");
                        return Outcome::Failed(PeriodError::NoValidCandidate { attempts });
                    }
                    self.candidate = self.candidate.advance(self.period.step());
                }
                Ok(Verdict::Terminate) => {
                    debug!(position = self.position, "sequence terminated");
                    return Outcome::Exhausted;
                }
                Err(err) => return Outcome::Failed(err),
            }
        }
    }
}

impl<T: Temporal> Iterator for PeriodIter<'_, T> {
    type Item = PeriodResult<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        self.ensure_pending();
        match self.pending.take() {
            Some(Outcome::Emit(value)) => {
                self.position += 1;
                self.candidate = value.advance(self.period.step());
                Some(Ok(value))
            }
            Some(Outcome::Failed(err)) => {
                self.finished = true;
                Some(Err(err))
            }
            Some(Outcome::Exhausted) | None => {
                self.finished = true;
                None
            }
        }
    }
}

impl<T: Temporal> std::iter::FusedIterator for PeriodIter<'_, T> {}
