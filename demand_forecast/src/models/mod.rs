//! Single-step lag predictors and the regressors that train them

use crate::error::Result;
use crate::features::FeatureRow;
use std::fmt::Debug;

/// A trained function from one lag value to the predicted next value
pub trait SingleStepPredictor {
    /// Predict the next value from the previous one
    fn predict(&self, lag_value: f64) -> f64;

    /// Name of the predictor
    fn name(&self) -> &str {
        "custom"
    }
}

impl<F> SingleStepPredictor for F
where
    F: Fn(f64) -> f64,
{
    fn predict(&self, lag_value: f64) -> f64 {
        self(lag_value)
    }
}

/// Regression algorithm that can be fitted on lag feature rows
pub trait Regressor: Debug {
    /// The type of trained predictor produced
    type Fitted: SingleStepPredictor + Debug + Clone;

    /// Fit the regressor on training rows
    fn fit(&self, rows: &[FeatureRow]) -> Result<Self::Fitted>;

    /// Get the name of the regressor
    fn name(&self) -> &str;
}

pub mod gradient_boosting;
pub mod linear;

pub use gradient_boosting::{FittedGradientBoostedLag, GradientBoostedLag};
pub use linear::{FittedLinearLag, LinearLag};
