//! Gradient-boosted trees on the lag feature

use crate::error::{ForecastError, Result};
use crate::features::{unzip_rows, FeatureRow};
use crate::models::{Regressor, SingleStepPredictor};
use lag_math::{GradientBoostedTrees, GradientBoostingParams};

/// Gradient-boosted regression trees mapping `lag_value -> target_value`
#[derive(Debug, Clone)]
pub struct GradientBoostedLag {
    /// Name of the model
    name: String,
    /// Boosting hyperparameters
    params: GradientBoostingParams,
}

/// Trained gradient-boosted lag model
#[derive(Debug, Clone)]
pub struct FittedGradientBoostedLag {
    /// Name of the model
    name: String,
    /// Fitted ensemble
    model: GradientBoostedTrees,
}

impl GradientBoostedLag {
    /// Create a model with explicit hyperparameters
    pub fn new(params: GradientBoostingParams) -> Result<Self> {
        params
            .validate()
            .map_err(|e| ForecastError::InvalidParameter(e.to_string()))?;

        Ok(Self {
            name: format!(
                "Gradient Boosted Trees (n_estimators={}, max_depth={}, learning_rate={})",
                params.n_estimators, params.max_depth, params.learning_rate
            ),
            params,
        })
    }

    /// Get the hyperparameters
    pub fn params(&self) -> &GradientBoostingParams {
        &self.params
    }
}

impl Default for GradientBoostedLag {
    fn default() -> Self {
        let params = GradientBoostingParams::default();
        Self {
            name: format!(
                "Gradient Boosted Trees (n_estimators={}, max_depth={}, learning_rate={})",
                params.n_estimators, params.max_depth, params.learning_rate
            ),
            params,
        }
    }
}

impl Regressor for GradientBoostedLag {
    type Fitted = FittedGradientBoostedLag;

    fn fit(&self, rows: &[FeatureRow]) -> Result<Self::Fitted> {
        let (xs, ys) = unzip_rows(rows);
        let model = GradientBoostedTrees::fit(&xs, &ys, &self.params)
            .map_err(|e| ForecastError::Training(e.to_string()))?;

        Ok(FittedGradientBoostedLag {
            name: self.name.clone(),
            model,
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl FittedGradientBoostedLag {
    /// Number of boosting rounds in the fitted ensemble
    pub fn tree_count(&self) -> usize {
        self.model.trees().len()
    }
}

impl SingleStepPredictor for FittedGradientBoostedLag {
    fn predict(&self, lag_value: f64) -> f64 {
        self.model.predict(lag_value)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
