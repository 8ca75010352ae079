//! Error types for the songbake library

use std::io;

/// Library error type for songbake operations
#[derive(Debug, thiserror::Error)]
pub enum SongError {
    /// Input document is not well-formed, or a required field is absent or non-numeric
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// A sequence entry references a pattern the pool does not hold
    #[error("pattern index {index} out of range: pool holds {pool_len} patterns")]
    PatternIndexOutOfRange { index: usize, pool_len: usize },

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(String),
}

impl From<io::Error> for SongError {
    fn from(error: io::Error) -> Self {
        Self::IoError(error.to_string())
    }
}
