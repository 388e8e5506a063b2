//! Error types for Rollcall
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using RollcallError
pub type Result<T> = std::result::Result<T, RollcallError>;

/// Unified error type for Rollcall operations
#[derive(Debug, Error)]
pub enum RollcallError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    /// Terminal or other non-storage I/O
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Storage Errors
    // -------------------------------------------------------------------------
    /// Any underlying I/O failure, with the operation that hit it
    #[error("Storage error while {context}: {source}")]
    Storage {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("No matching records found for batch update of {model}")]
    NoMatches { model: String },

    // -------------------------------------------------------------------------
    // Codec Errors
    // -------------------------------------------------------------------------
    #[error("Malformed record (expected {expected} fields, found {found}): {line}")]
    MalformedRecord {
        line: String,
        expected: usize,
        found: usize,
    },

    #[error("Invalid value for {field}: {value:?}")]
    InvalidFieldFormat { field: &'static str, value: String },

    #[error("Field {field} contains the delimiter: {value:?}")]
    DelimiterInField { field: &'static str, value: String },

    // -------------------------------------------------------------------------
    // Service Errors
    // -------------------------------------------------------------------------
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("A student with {field} {value:?} already exists")]
    Duplicate { field: &'static str, value: String },

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl RollcallError {
    /// Wrap an I/O error with a description of what was being done
    pub fn storage(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Storage {
            context: context.into(),
            source,
        }
    }
}
