//! Error types for the demand_forecast crate

use lag_math::MathError;
use thiserror::Error;

/// Custom error types for the demand_forecast crate
#[derive(Debug, Error)]
pub enum ForecastError {
    /// Series too short to build lag features
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// No usable training rows, or the regressor failed to fit
    #[error("Training error: {0}")]
    Training(String),

    /// Non-positive forecast length
    #[error("Invalid horizon: {0} (must be a positive number of periods)")]
    InvalidHorizon(i64),

    /// Empty or non-positive seasonal trend vector
    #[error("Invalid seasonal trend: {0}")]
    InvalidTrend(String),

    /// Error related to data validation or decoding
    #[error("Data error: {0}")]
    DataError(String),

    /// Error from invalid parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Error from the regression primitives
    #[error("Math error: {0}")]
    Math(#[from] MathError),

    /// Error from IO operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error from JSON decoding
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Error from CSV decoding
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// Error from TOML configuration decoding
    #[error("Config error: {0}")]
    ConfigError(#[from] toml::de::Error),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;
