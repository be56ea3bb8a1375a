//! Error types for slotbook.

use thiserror::Error;

/// Common error type for slotbook infrastructure and plumbing operations.
///
/// Expected business outcomes (slot conflicts, lockouts, …) are modeled as
/// typed enums in their own modules; this type covers store failures and
/// simple data-entry validation.
#[derive(Error, Debug)]
pub enum SlotbookError {
    /// Database error.
    ///
    /// Generic database error wrapping errors from sqlx.
    #[error("database error: {0}")]
    Database(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Validation error for user input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),
}

// Conversion from sqlx errors
impl From<sqlx::Error> for SlotbookError {
    fn from(e: sqlx::Error) -> Self {
        SlotbookError::Database(e.to_string())
    }
}

/// Result type alias for slotbook operations.
pub type Result<T> = std::result::Result<T, SlotbookError>;
