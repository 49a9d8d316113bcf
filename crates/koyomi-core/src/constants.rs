//! Tunable constants shared across crates.

/// Retry ceiling for a single candidate search run.
///
/// When a period has to reject this many consecutive candidates without
/// finding an acceptable one, the traversal fails with `NoValidCandidate`
/// instead of looping forever. Overridable per period via
/// `Period::set_max_search_attempts`.
pub const DEFAULT_MAX_SEARCH_ATTEMPTS: usize = 10_000;

/// Prefix that marks a filter name as a boolean predicate query.
///
/// Names carrying this prefix are resolved against the temporal value's
/// named-predicate registry; any other name is stored as an inert opaque
/// filter entry that is never invoked.
pub const PREDICATE_NAME_PREFIX: &str = "is_";
