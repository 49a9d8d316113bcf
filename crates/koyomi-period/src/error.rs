use thiserror::Error;

use koyomi_core::error::TemporalError;

/// Period engine errors
#[derive(Error, Debug)]
pub enum PeriodError {
    /// The retry ceiling was exceeded while searching for the next
    /// acceptable candidate. Fatal to the current traversal.
    #[error("No valid candidate found after {attempts} attempts")]
    NoValidCandidate { attempts: usize },

    #[error(transparent)]
    Temporal(#[from] TemporalError),
}

pub type PeriodResult<T> = std::result::Result<T, PeriodError>;
