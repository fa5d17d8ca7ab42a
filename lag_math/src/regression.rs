//! Ordinary least squares over a single feature

use crate::{check_samples, Result};

/// Fitted line `y = slope * x + intercept`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeastSquares {
    slope: f64,
    intercept: f64,
}

impl LeastSquares {
    /// Fit the line to paired samples.
    ///
    /// A constant feature has no slope to estimate; the fit then collapses
    /// to the mean of the targets.
    pub fn fit(xs: &[f64], ys: &[f64]) -> Result<Self> {
        check_samples(xs, ys)?;

        let n = xs.len() as f64;
        let x_mean = xs.iter().sum::<f64>() / n;
        let y_mean = ys.iter().sum::<f64>() / n;

        let mut numerator = 0.0;
        let mut denominator = 0.0;
        for (&x, &y) in xs.iter().zip(ys.iter()) {
            numerator += (x - x_mean) * (y - y_mean);
            denominator += (x - x_mean) * (x - x_mean);
        }

        if denominator.abs() < 1e-10 {
            return Ok(Self {
                slope: 0.0,
                intercept: y_mean,
            });
        }

        let slope = numerator / denominator;
        Ok(Self {
            slope,
            intercept: y_mean - slope * x_mean,
        })
    }

    /// Predict the target for one feature value
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    /// Get the slope
    pub fn slope(&self) -> f64 {
        self.slope
    }

    /// Get the intercept
    pub fn intercept(&self) -> f64 {
        self.intercept
    }
}
