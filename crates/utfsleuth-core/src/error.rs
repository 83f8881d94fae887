//! Error types for the utfsleuth-core library.
//!
//! This module provides error handling using the `thiserror` crate. Note that
//! malformed input bytes are never an error here: classifying malformed input
//! is the library's job, and that outcome is carried in
//! [`ValidationResult`](crate::utf8::ValidationResult). The variants below
//! cover I/O failures and caller-contract violations only.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for utfsleuth operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for all utfsleuth operations
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Failed to read input file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        /// Path to the file that failed to read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A sample limit of zero bytes was configured for the guesser
    #[error("max_sample_bytes must be at least 1")]
    InvalidSampleLimit,

    /// A window radius of zero was requested for a diagnostic snippet
    #[error("window radius must be at least 1")]
    InvalidWindowRadius,

    /// Snippet position does not point into the buffer
    #[error("snippet position {position} is out of bounds for buffer of {len} bytes")]
    PositionOutOfBounds {
        /// The requested position
        position: usize,
        /// Length of the buffer being inspected
        len: usize,
    },
}

impl Error {
    /// Creates a new file read error
    pub fn file_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileRead {
            path: path.into(),
            source,
        }
    }

    /// Creates a new out-of-bounds position error
    pub fn position_out_of_bounds(position: usize, len: usize) -> Self {
        Self::PositionOutOfBounds { position, len }
    }
}
