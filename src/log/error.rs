//! Error types for log loading

use std::io;

use thiserror::Error;

/// Errors raised while reading a flight log
#[derive(Debug, Error)]
pub enum LogLoadError {
    #[error("failed to read log: {0}")]
    Io(#[from] io::Error),

    #[error("log is empty")]
    Empty,

    #[error("header has no time column (expected first column to start with \"time\")")]
    MissingTimeColumn,

    #[error("line {line}: {message}")]
    InvalidRow { line: usize, message: String },

    #[error("line {line}: time {time} goes backwards")]
    TimeNotMonotonic { line: usize, time: i64 },

    #[error("log has a header but no frames")]
    NoFrames,
}

impl LogLoadError {
    pub(crate) fn invalid_row(line: usize, message: impl Into<String>) -> Self {
        Self::InvalidRow {
            line,
            message: message.into(),
        }
    }
}
