//! Error types for the cuckoo filter.

use thiserror::Error;

/// The result type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// The error type for filter construction and insertion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The requested fingerprint width is not one of 8, 16 or 32 bits.
    #[error("Unsupported fingerprint width: {0} bits (expected 8, 16 or 32)")]
    UnsupportedWidth(u32),

    /// An insert ran out of relocation attempts; the filter is at or near capacity.
    #[error("Insertion failed after {max_kicks} kicks: filter is full")]
    InsertionFailed {
        /// The kick ceiling that was exhausted.
        max_kicks: usize,
    },

    /// An invalid argument was provided.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl Error {
    /// Creates a new invalid argument error.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }

    /// Returns true if this error means the filter is full.
    pub fn is_insertion_failed(&self) -> bool {
        matches!(self, Error::InsertionFailed { .. })
    }
}
