//! Error types for the agrocast facade

use demand_forecast::ForecastError;
use supply_ledger::SupplyError;
use thiserror::Error;

/// Errors surfaced by [`crate::AgroContext`]
#[derive(Debug, Error)]
pub enum AgroError {
    /// Forecasting failed
    #[error(transparent)]
    Forecast(#[from] ForecastError),

    /// Supply decoding failed
    #[error(transparent)]
    Supply(#[from] SupplyError),

    /// No series registered under this product name
    #[error("Unknown product: {0}")]
    UnknownProduct(String),

    /// A snapshot-only operation was called without a snapshot
    #[error("No warehouse snapshot loaded")]
    MissingSnapshot,

    /// The snapshot has no sales of this material
    #[error("No sales history for material: {0}")]
    NoSalesHistory(String),
}

/// Result type for facade operations
pub type Result<T> = std::result::Result<T, AgroError>;
