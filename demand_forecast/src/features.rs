//! Lag features: previous value in, next value out

use crate::data::TimeSeries;
use crate::error::{ForecastError, Result};
use serde::{Deserialize, Serialize};

/// One supervised-learning row derived from two consecutive observations
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureRow {
    /// Value of the earlier observation
    pub lag_value: f64,
    /// Value of the observation that follows it
    pub target_value: f64,
}

/// Builds lag-1 feature rows from a series
#[derive(Debug, Clone, Copy, Default)]
pub struct LagFeatureBuilder;

impl LagFeatureBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self
    }

    /// Turn a series of N observations into N-1 rows where row `i` pairs
    /// `series[i]` with `series[i + 1]`. The first observation has no lag
    /// and so never appears as a target.
    pub fn build(&self, series: &TimeSeries) -> Result<Vec<FeatureRow>> {
        let values = series.values();
        Self::from_values(&values).map_err(|_| {
            ForecastError::InsufficientData(format!(
                "Series '{}' has {} observation(s); at least 2 are needed to build lag features",
                series.name(),
                values.len()
            ))
        })
    }

    /// Same as [`LagFeatureBuilder::build`] on bare values
    pub fn from_values(values: &[f64]) -> Result<Vec<FeatureRow>> {
        if values.len() < 2 {
            return Err(ForecastError::InsufficientData(format!(
                "{} value(s); at least 2 are needed to build lag features",
                values.len()
            )));
        }

        Ok(values
            .windows(2)
            .map(|w| FeatureRow {
                lag_value: w[0],
                target_value: w[1],
            })
            .collect())
    }
}

/// Split rows into parallel feature and target vectors
pub fn unzip_rows(rows: &[FeatureRow]) -> (Vec<f64>, Vec<f64>) {
    rows.iter().map(|r| (r.lag_value, r.target_value)).unzip()
}
