//! Least-squares line on the lag feature

use crate::error::{ForecastError, Result};
use crate::features::{unzip_rows, FeatureRow};
use crate::models::{Regressor, SingleStepPredictor};
use lag_math::LeastSquares;

/// Ordinary least squares `target = slope * lag + intercept`
#[derive(Debug, Clone, Default)]
pub struct LinearLag;

/// Trained least-squares lag model
#[derive(Debug, Clone)]
pub struct FittedLinearLag {
    fit: LeastSquares,
}

impl LinearLag {
    /// Create a new linear lag model
    pub fn new() -> Self {
        Self
    }
}

impl Regressor for LinearLag {
    type Fitted = FittedLinearLag;

    fn fit(&self, rows: &[FeatureRow]) -> Result<Self::Fitted> {
        let (xs, ys) = unzip_rows(rows);
        let fit = LeastSquares::fit(&xs, &ys).map_err(|e| ForecastError::Training(e.to_string()))?;
        Ok(FittedLinearLag { fit })
    }

    fn name(&self) -> &str {
        "Linear Regression"
    }
}

impl FittedLinearLag {
    /// Slope of the fitted line
    pub fn slope(&self) -> f64 {
        self.fit.slope()
    }

    /// Intercept of the fitted line
    pub fn intercept(&self) -> f64 {
        self.fit.intercept()
    }
}

impl SingleStepPredictor for FittedLinearLag {
    fn predict(&self, lag_value: f64) -> f64 {
        self.fit.predict(lag_value)
    }

    fn name(&self) -> &str {
        "Linear Regression"
    }
}
