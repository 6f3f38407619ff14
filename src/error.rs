//! Configuration errors.
//!
//! Every failure the experiment can report is a configuration problem caught
//! before the first trial runs. Once validation passes the run cannot fail.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("trial count must be at least 1")]
    ZeroTrials,

    #[error("pattern set is empty")]
    EmptyPatternSet,

    #[error("sequence length {len} is shorter than the longest pattern ({longest})")]
    SequenceTooShort { len: usize, longest: usize },

    #[error("sequence length {len} exceeds the maximum of {max}")]
    SequenceTooLong { len: usize, max: usize },

    #[error("unknown random source '{0}' (expected 'small' or 'splitmix')")]
    UnknownRng(String),

    #[error("invalid value for {flag}: '{value}'")]
    InvalidValue { flag: String, value: String },

    #[error("missing value for {0}")]
    MissingValue(String),

    #[error("unknown argument: {0}")]
    UnknownArgument(String),
}
