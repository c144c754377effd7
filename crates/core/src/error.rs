//! Validation errors raised by the registry and the raycast setters.

use thiserror::Error;

/// Errors returned by fallible [`crate::Iris`] operations.
///
/// Every variant is raised before any state is touched, so a failed call
/// leaves the registry and the focus state exactly as they were.
#[derive(Debug, Error)]
pub enum IrisError {
    /// A value that must be an integer was something else.
    #[error("'{field}' is not an integer")]
    NotAnInteger {
        /// Name of the offending argument or payload field.
        field: &'static str,
    },
    /// An integer outside the accepted range.
    #[error("unsupported value {value} for '{field}'")]
    OutOfRange {
        /// Name of the offending argument.
        field: &'static str,
        /// The rejected value.
        value: i64,
    },
    /// A required payload field is missing or has the wrong shape.
    #[error("invalid '{field}': {reason}")]
    InvalidField {
        /// Name of the offending payload field.
        field: &'static str,
        /// Human-readable reason.
        reason: &'static str,
    },
    /// A value that must be a number was something else (including NaN).
    #[error("'{field}' must be a number")]
    NotANumber {
        /// Name of the offending argument.
        field: &'static str,
    },
    /// Extra payload fields could not be decoded into the attachment type.
    #[error("failed to decode interaction attachment: {0}")]
    Attachment(#[from] serde_json::Error),
}
