//! Typed error definitions for file_mover.
//! These are the run-terminating failure modes; per-file relocation failures
//! are carried in `fs_ops::Outcome` instead so one bad file cannot abort a batch.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MoverError {
    #[error("cannot read source folder '{path}': {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid regex pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("no files matched the pattern '{pattern}'")]
    NoMatch { pattern: String },
}

impl MoverError {
    /// Stable short code for structured log fields.
    pub fn code(&self) -> &'static str {
        match self {
            MoverError::DirectoryRead { .. } => "directory_read",
            MoverError::InvalidPattern { .. } => "invalid_pattern",
            MoverError::NoMatch { .. } => "no_match",
        }
    }
}
