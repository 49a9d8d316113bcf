//! The predicate pipeline: filter entries, matching queries, and the
//! ordered evaluation chain.

mod chain;
mod spec;

pub use chain::FilterChain;
pub use spec::{FilterEntry, FilterQuery, PredicateFn, PredicateSpec, Verdict};
