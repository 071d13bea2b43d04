//! Core error types for daybudget.
//!
//! Store implementations convert their own failures into [`StoreError`] so
//! the evaluator stays independent of whatever backs the budget figures.

use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the budgeting core.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Budget store operation failed: {0}")]
    Store(#[from] StoreError),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Invalid configuration value: {0}")]
    InvalidConfigValue(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Store-agnostic error type for reads and writes against the budget store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The store could not be reached or read.
    #[error("Failed to read from store: {0}")]
    ReadFailed(String),

    /// A write was rejected.
    #[error("Failed to write to store: {0}")]
    WriteFailed(String),

    /// A stored value could not be decoded.
    #[error("Corrupt stored value for '{key}': {reason}")]
    Corrupt { key: String, reason: String },
}

/// Validation errors for user input.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Amount must not be negative: {0}")]
    NegativeAmount(String),

    #[error("Amount out of range: {0}")]
    AmountOutOfRange(String),

    #[error("Failed to parse decimal number: {0}")]
    DecimalParse(#[from] rust_decimal::Error),
}

impl From<rust_decimal::Error> for Error {
    fn from(err: rust_decimal::Error) -> Self {
        Error::Validation(ValidationError::DecimalParse(err))
    }
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}
