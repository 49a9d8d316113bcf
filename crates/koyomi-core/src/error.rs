use thiserror::Error;

/// Core error type with minimal dependencies
#[derive(Error, Debug)]
pub enum TemporalError {
    #[error("Unknown predicate: {0}")]
    UnknownPredicate(String),

    #[error("Invalid arguments for predicate {name}: {reason}")]
    InvalidArguments { name: String, reason: String },
}

pub type CoreResult<T> = std::result::Result<T, TemporalError>;
