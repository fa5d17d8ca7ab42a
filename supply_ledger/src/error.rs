//! Error types for the supply_ledger crate

use thiserror::Error;

/// Fatal decoding failures. A single malformed facility is not one of
/// these; it is reported as a [`crate::aggregator::MalformedFacility`].
#[derive(Debug, Error)]
pub enum SupplyError {
    /// Error from IO operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Document is not valid JSON or has the wrong overall shape
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A record that cannot be represented at all
    #[error("Invalid record: {0}")]
    InvalidRecord(String),
}

/// Result type for supply operations
pub type Result<T> = std::result::Result<T, SupplyError>;
