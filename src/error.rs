//! Error types for flatdb
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using FlatError
pub type Result<T> = std::result::Result<T, FlatError>;

/// Unified error type for flatdb operations
#[derive(Debug, Error)]
pub enum FlatError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Format Errors
    // -------------------------------------------------------------------------
    /// A line in the backing file could not be decoded into a record
    #[error("Malformed record at line {line}: {reason}")]
    Format { line: usize, reason: String },

    // -------------------------------------------------------------------------
    // Validation Errors
    // -------------------------------------------------------------------------
    #[error("Invalid {field} '{value}': {reason}")]
    Validation {
        field: &'static str,
        value: String,
        reason: String,
    },

    // -------------------------------------------------------------------------
    // Key Errors
    // -------------------------------------------------------------------------
    #[error("Key '{0}' already exists")]
    AlreadyExists(String),

    #[error("Key '{0}' not found")]
    NotFound(String),

    // -------------------------------------------------------------------------
    // User Input Errors
    // -------------------------------------------------------------------------
    #[error("Invalid input: {0}")]
    Input(String),

    /// The interactive line editor failed
    #[error("Terminal error: {0}")]
    Terminal(#[from] rustyline::error::ReadlineError),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl FlatError {
    /// Build a format error for the given 1-based line
    pub fn format(line: usize, reason: impl Into<String>) -> Self {
        FlatError::Format {
            line,
            reason: reason.into(),
        }
    }
}
