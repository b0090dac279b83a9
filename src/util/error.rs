//! Error types for boxnms.

use thiserror::Error;

/// Result alias for boxnms operations.
pub type NmsResult<T> = std::result::Result<T, NmsError>;

/// Errors raised when building or validating detection input.
///
/// Suppression itself is infallible; these only surface from the opt-in
/// construction and validation helpers.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NmsError {
    /// Flat detection data whose length is not a multiple of the row width.
    #[error("detection rows must have 5 values each, got {len} values total")]
    RaggedRows {
        /// Total number of values supplied.
        len: usize,
    },
    /// A detection carrying a non-finite coordinate or score.
    #[error("non-finite value in detection {index}")]
    NonFinite {
        /// Input index of the offending detection.
        index: usize,
    },
}
