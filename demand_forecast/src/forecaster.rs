//! Recursive (autoregressive) multi-period forecasting
//!
//! Each step feeds the previous step's prediction back in as the next lag.
//! Nothing anchors the chain to the observed history beyond the seed, so
//! errors compound and long horizons can drift without bound. The drift is
//! left uncorrected.

use crate::error::{ForecastError, Result};
use crate::models::SingleStepPredictor;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default number of periods to forecast (one year of weeks)
pub const DEFAULT_PERIODS: i64 = 52;

/// Longest accepted horizon
pub const MAX_PERIODS: i64 = 100_000;

/// One forecast period
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    /// 0-based position in the horizon; selects the seasonal trend slot
    pub period_index: usize,
    /// Value predicted by the recursive chain
    pub raw_value: f64,
    /// Value after seasonal adjustment (equal to `raw_value` until adjusted)
    pub adjusted_value: f64,
}

/// Applies a single-step predictor repeatedly over a fixed horizon
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecursiveForecaster {
    periods: usize,
}

impl RecursiveForecaster {
    /// Create a forecaster for `periods` steps, `1..=MAX_PERIODS`
    pub fn new(periods: i64) -> Result<Self> {
        if !(1..=MAX_PERIODS).contains(&periods) {
            return Err(ForecastError::InvalidHorizon(periods));
        }
        let periods =
            usize::try_from(periods).map_err(|_| ForecastError::InvalidHorizon(periods))?;
        Ok(Self { periods })
    }

    /// Get the horizon
    pub fn periods(&self) -> usize {
        self.periods
    }

    /// Produce `periods` points: `raw[0] = predict(seed)`, `raw[i] = predict(raw[i-1])`
    pub fn forecast<P>(&self, predictor: &P, seed: f64) -> Vec<ForecastPoint>
    where
        P: SingleStepPredictor + ?Sized,
    {
        debug!(
            predictor = predictor.name(),
            seed,
            periods = self.periods,
            "recursive forecast"
        );

        let mut points = Vec::with_capacity(self.periods);
        let mut lag = seed;
        for period_index in 0..self.periods {
            let next = predictor.predict(lag);
            points.push(ForecastPoint {
                period_index,
                raw_value: next,
                adjusted_value: next,
            });
            lag = next;
        }
        points
    }
}

impl Default for RecursiveForecaster {
    fn default() -> Self {
        Self {
            periods: DEFAULT_PERIODS as usize,
        }
    }
}
