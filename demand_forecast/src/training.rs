//! Training a single-step predictor on a held-out split

use crate::error::{ForecastError, Result};
use crate::features::FeatureRow;
use crate::models::{Regressor, SingleStepPredictor};
use crate::utils::train_test_split;
use lag_math::metrics::{prediction_accuracy, PredictionAccuracy};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// How rows are split between training and evaluation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SplitOptions {
    /// Fraction of rows held out for evaluation
    pub test_ratio: f64,
    /// Seed of the split shuffle
    pub seed: u64,
}

impl Default for SplitOptions {
    fn default() -> Self {
        Self {
            test_ratio: 0.2,
            seed: 42,
        }
    }
}

/// What happened during training
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingReport {
    /// Name of the regressor that was fitted
    pub regressor: String,
    /// Rows used for fitting
    pub train_rows: usize,
    /// Rows held out for evaluation
    pub eval_rows: usize,
    /// Mean squared error on the evaluation rows, if there were any
    pub eval_mse: Option<f64>,
    /// MAE, MSE and RMSE on the evaluation rows
    pub eval_accuracy: Option<PredictionAccuracy>,
}

/// A fitted predictor together with its training report
#[derive(Debug, Clone)]
pub struct TrainedPredictor<P> {
    predictor: P,
    report: TrainingReport,
}

impl<P: SingleStepPredictor> TrainedPredictor<P> {
    /// Get the fitted predictor
    pub fn predictor(&self) -> &P {
        &self.predictor
    }

    /// Get the training report
    pub fn report(&self) -> &TrainingReport {
        &self.report
    }

    /// Split into predictor and report
    pub fn into_parts(self) -> (P, TrainingReport) {
        (self.predictor, self.report)
    }
}

/// Fit `regressor` on the training share of `rows` and score it on the rest.
///
/// The evaluation MSE is reported and logged but never gates success. An
/// empty training share is a [`ForecastError::Training`].
pub fn train<R: Regressor>(
    regressor: &R,
    rows: &[FeatureRow],
    split: SplitOptions,
) -> Result<TrainedPredictor<R::Fitted>> {
    let (train_rows, eval_rows) = train_test_split(rows, split.test_ratio, split.seed)?;
    debug!(
        regressor = regressor.name(),
        train_rows = train_rows.len(),
        eval_rows = eval_rows.len(),
        "split lag feature rows"
    );

    if train_rows.is_empty() {
        return Err(ForecastError::Training(format!(
            "No training rows left after holding out {} of {} row(s) for evaluation",
            eval_rows.len(),
            rows.len()
        )));
    }

    let predictor = regressor.fit(&train_rows)?;

    let eval_accuracy = if eval_rows.is_empty() {
        None
    } else {
        let predicted: Vec<f64> = eval_rows
            .iter()
            .map(|r| predictor.predict(r.lag_value))
            .collect();
        let actual: Vec<f64> = eval_rows.iter().map(|r| r.target_value).collect();
        Some(prediction_accuracy(&predicted, &actual)?)
    };

    match &eval_accuracy {
        Some(acc) => info!(
            regressor = regressor.name(),
            mse = acc.mse,
            accuracy = %acc,
            "evaluation mean squared error"
        ),
        None => info!(regressor = regressor.name(), "no evaluation rows; mse not computed"),
    }

    Ok(TrainedPredictor {
        predictor,
        report: TrainingReport {
            regressor: regressor.name().to_string(),
            train_rows: train_rows.len(),
            eval_rows: eval_rows.len(),
            eval_mse: eval_accuracy.map(|acc| acc.mse),
            eval_accuracy,
        },
    })
}
