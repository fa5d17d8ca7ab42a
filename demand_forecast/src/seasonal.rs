//! Multiplicative seasonal adjustment

use crate::error::{ForecastError, Result};
use crate::forecaster::ForecastPoint;
use serde::{Deserialize, Serialize};

/// Default trend multipliers (six-slot cycle)
pub const DEFAULT_SEASONAL_TRENDS: [f64; 6] = [1.05, 1.05, 1.00, 1.00, 0.95, 0.95];

/// Non-empty cycle of positive multipliers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct SeasonalTrendVector(Vec<f64>);

impl SeasonalTrendVector {
    /// Create a trend vector; it must be non-empty and every factor positive and finite
    pub fn new(factors: Vec<f64>) -> Result<Self> {
        if factors.is_empty() {
            return Err(ForecastError::InvalidTrend(
                "trend vector must not be empty".to_string(),
            ));
        }
        if let Some((i, f)) = factors
            .iter()
            .enumerate()
            .find(|(_, f)| !(f.is_finite() && **f > 0.0))
        {
            return Err(ForecastError::InvalidTrend(format!(
                "factor {} is {}; factors must be positive",
                i, f
            )));
        }
        Ok(Self(factors))
    }

    /// Factors in cycle order
    pub fn factors(&self) -> &[f64] {
        &self.0
    }

    /// Cycle length L
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the vector is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Factor that applies to a 0-based period
    pub fn factor_for(&self, period_index: usize) -> f64 {
        self.0[period_index % self.0.len()]
    }
}

impl Default for SeasonalTrendVector {
    fn default() -> Self {
        Self(DEFAULT_SEASONAL_TRENDS.to_vec())
    }
}

impl TryFrom<Vec<f64>> for SeasonalTrendVector {
    type Error = ForecastError;

    fn try_from(factors: Vec<f64>) -> Result<Self> {
        Self::new(factors)
    }
}

impl From<SeasonalTrendVector> for Vec<f64> {
    fn from(trend: SeasonalTrendVector) -> Self {
        trend.0
    }
}

/// Tiles a trend vector over a forecast from period 0
#[derive(Debug, Clone, PartialEq)]
pub struct SeasonalAdjuster {
    trend: SeasonalTrendVector,
}

impl SeasonalAdjuster {
    /// Create an adjuster for the given trend vector
    pub fn new(trend: SeasonalTrendVector) -> Self {
        Self { trend }
    }

    /// Create an adjuster from raw factors
    pub fn from_factors(factors: Vec<f64>) -> Result<Self> {
        Ok(Self::new(SeasonalTrendVector::new(factors)?))
    }

    /// Get the trend vector
    pub fn trend(&self) -> &SeasonalTrendVector {
        &self.trend
    }

    /// Set `adjusted_value[i] = raw_value[i] * trend[period_index mod L]`.
    ///
    /// Alignment is purely positional: period 0 always takes trend slot 0
    /// regardless of which calendar week or month it falls on.
    pub fn adjust(&self, points: &mut [ForecastPoint]) {
        for point in points.iter_mut() {
            point.adjusted_value = point.raw_value * self.trend.factor_for(point.period_index);
        }
    }

    /// Adjust a bare sequence of raw values
    pub fn adjust_values(&self, raw: &[f64]) -> Vec<f64> {
        raw.iter()
            .enumerate()
            .map(|(i, v)| v * self.trend.factor_for(i))
            .collect()
    }
}

impl Default for SeasonalAdjuster {
    fn default() -> Self {
        Self::new(SeasonalTrendVector::default())
    }
}
