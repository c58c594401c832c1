//! Error types for data operations.

use thiserror::Error;

/// Result type for data operations.
pub type Result<T> = std::result::Result<T, DataError>;

/// Errors that can occur during data operations.
#[derive(Debug, Error)]
pub enum DataError {
    /// FDIC BankFind API error
    #[error("FDIC API error: {0}")]
    FdicApi(String),

    /// Network error
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Data parsing error
    #[error("Data parsing error: {0}")]
    Parse(String),

    /// Invalid date range
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange {
        /// Start date of the range
        start: String,
        /// End date of the range
        end: String,
    },

    /// Missing data
    #[error("Missing data for cert {cert}: {reason}")]
    MissingData {
        /// FDIC certificate number that was queried
        cert: String,
        /// Reason for missing data
        reason: String,
    },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Institution not found for a cert number or name
    #[error("Institution not found: {0}")]
    InstitutionNotFound(String),

    /// Invalid certificate number
    #[error("Invalid cert number: {0}")]
    InvalidCert(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
