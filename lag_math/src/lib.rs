//! # Lag Math
//!
//! Numeric building blocks for single-feature lag models.
//! This crate knows nothing about dates, products or facilities; it fits
//! regressors over plain `(x, y)` pairs and scores their predictions.

use thiserror::Error;

pub mod boosting;
pub mod metrics;
pub mod regression;

pub use boosting::{GradientBoostedTrees, GradientBoostingParams, RegressionTree, MAX_ESTIMATORS};
pub use regression::LeastSquares;

/// Errors that can occur while fitting or scoring a regressor
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("Insufficient data for calculation: {0}")]
    InsufficientData(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Calculation error: {0}")]
    CalculationError(String),
}

/// Result type for lag math operations
pub type Result<T> = std::result::Result<T, MathError>;

/// Reject empty or mismatched sample sets before fitting.
pub(crate) fn check_samples(xs: &[f64], ys: &[f64]) -> Result<()> {
    if xs.len() != ys.len() {
        return Err(MathError::InvalidInput(format!(
            "Feature length ({}) doesn't match target length ({})",
            xs.len(),
            ys.len()
        )));
    }
    if xs.is_empty() {
        return Err(MathError::InsufficientData(
            "Need at least one sample to fit".to_string(),
        ));
    }
    if xs.iter().chain(ys.iter()).any(|v| !v.is_finite()) {
        return Err(MathError::InvalidInput(
            "Samples must be finite numbers".to_string(),
        ));
    }
    Ok(())
}
