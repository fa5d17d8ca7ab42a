//! Error metrics for scoring predictions against actual values

use crate::{MathError, Result};
use serde::{Deserialize, Serialize};

/// Accuracy of a prediction run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionAccuracy {
    /// Mean Absolute Error
    pub mae: f64,
    /// Mean Squared Error
    pub mse: f64,
    /// Root Mean Squared Error
    pub rmse: f64,
}

fn check_lengths(predicted: &[f64], actual: &[f64]) -> Result<()> {
    if predicted.len() != actual.len() || predicted.is_empty() {
        return Err(MathError::InvalidInput(
            "Predicted and actual values must have the same non-zero length".to_string(),
        ));
    }
    Ok(())
}

/// Mean squared error between predicted and actual values
pub fn mean_squared_error(predicted: &[f64], actual: &[f64]) -> Result<f64> {
    check_lengths(predicted, actual)?;

    let sum: f64 = predicted
        .iter()
        .zip(actual.iter())
        .map(|(p, a)| (p - a).powi(2))
        .sum();

    Ok(sum / predicted.len() as f64)
}

/// Full accuracy summary between predicted and actual values
pub fn prediction_accuracy(predicted: &[f64], actual: &[f64]) -> Result<PredictionAccuracy> {
    check_lengths(predicted, actual)?;

    let n = predicted.len() as f64;
    let mae = predicted
        .iter()
        .zip(actual.iter())
        .map(|(p, a)| (p - a).abs())
        .sum::<f64>()
        / n;
    let mse = mean_squared_error(predicted, actual)?;

    Ok(PredictionAccuracy {
        mae,
        mse,
        rmse: mse.sqrt(),
    })
}

impl std::fmt::Display for PredictionAccuracy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "MAE: {:.4}, MSE: {:.4}, RMSE: {:.4}",
            self.mae, self.mse, self.rmse
        )
    }
}
