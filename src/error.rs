//! Error types for Stockroom
//!
//! Provides a unified error type for all operations. Every variant is
//! recoverable; the presentation layer decides how to render each one.

use thiserror::Error;

/// Result type alias using StockError
pub type Result<T> = std::result::Result<T, StockError>;

/// Unified error type for Stockroom operations
#[derive(Debug, Error)]
pub enum StockError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Input Errors
    // -------------------------------------------------------------------------
    #[error("Invalid {field}: {input:?}")]
    Parse { field: &'static str, input: String },

    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    // -------------------------------------------------------------------------
    // Mirror File Errors
    // -------------------------------------------------------------------------
    #[error("Malformed mirror line {line}: {reason}")]
    Malformed { line: usize, reason: String },

    #[error("Mirror corruption detected: {0}")]
    Corruption(String),

    // -------------------------------------------------------------------------
    // Serialization Errors
    // -------------------------------------------------------------------------
    #[error("Serialization error: {0}")]
    Serialization(String),

    // -------------------------------------------------------------------------
    // Store Errors
    // -------------------------------------------------------------------------
    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Record ID already exists: {0}")]
    Duplicate(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl StockError {
    /// Build a `Malformed` error for a 1-based line number
    pub fn malformed(line: usize, reason: impl Into<String>) -> Self {
        StockError::Malformed {
            line,
            reason: reason.into(),
        }
    }

    /// True when the error only means "there is no mirror file yet"
    pub fn is_missing_file(&self) -> bool {
        matches!(self, StockError::Io(e) if e.kind() == std::io::ErrorKind::NotFound)
    }
}
