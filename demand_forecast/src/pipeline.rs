//! End-to-end product forecast: features, training, recursion, seasonality
//!
//! Every call builds its own feature rows, predictor and forecast points;
//! the pipeline holds only its immutable configuration and can be shared
//! freely between concurrent callers.

use crate::config::ForecastConfig;
use crate::data::TimeSeries;
use crate::error::{ForecastError, Result};
use crate::features::LagFeatureBuilder;
use crate::forecaster::ForecastPoint;
use crate::models::{Regressor, SingleStepPredictor};
use crate::training::{self, TrainedPredictor, TrainingReport};
use crate::utils::round_to;
use serde::Serialize;
use tracing::info;

/// Forecast of one product
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductForecast {
    /// Product the forecast belongs to
    pub product: String,
    /// Observed values, passed through unchanged
    pub historical: Vec<f64>,
    /// Forecast periods in order
    pub points: Vec<ForecastPoint>,
    /// Trend vector that was applied
    pub seasonal_trends: Vec<f64>,
    /// How the predictor was trained
    pub training: TrainingReport,
    /// Decimal places of [`ProductForecast::reported`]
    pub round_decimals: u32,
}

impl ProductForecast {
    /// Raw (unadjusted) forecast values
    pub fn raw(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.raw_value).collect()
    }

    /// Seasonally adjusted forecast values
    pub fn adjusted(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.adjusted_value).collect()
    }

    /// Adjusted values rounded for reporting
    pub fn adjusted_rounded(&self, decimals: u32) -> Vec<f64> {
        self.points
            .iter()
            .map(|p| round_to(p.adjusted_value, decimals))
            .collect()
    }

    /// Adjusted values rounded to the configured decimal places
    pub fn reported(&self) -> Vec<f64> {
        self.adjusted_rounded(self.round_decimals)
    }

    /// Number of forecast periods
    pub fn horizon(&self) -> usize {
        self.points.len()
    }
}

/// Runs the forecasting components in order for one series
#[derive(Debug, Clone, Default)]
pub struct ForecastPipeline {
    config: ForecastConfig,
}

impl ForecastPipeline {
    /// Create a pipeline, rejecting invalid configuration up front
    pub fn new(config: ForecastConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Get the configuration
    pub fn config(&self) -> &ForecastConfig {
        &self.config
    }

    /// Build lag rows from `series` and train `regressor` on them
    pub fn train<R: Regressor>(
        &self,
        series: &TimeSeries,
        regressor: &R,
    ) -> Result<TrainedPredictor<R::Fitted>> {
        let rows = LagFeatureBuilder::new().build(series)?;
        training::train(regressor, &rows, self.config.split())
    }

    /// Forecast `series` forward with an already trained predictor
    pub fn forecast_with<P>(
        &self,
        series: &TimeSeries,
        predictor: &P,
        training: TrainingReport,
    ) -> Result<ProductForecast>
    where
        P: SingleStepPredictor + ?Sized,
    {
        let seed = series.last_value().ok_or_else(|| {
            ForecastError::InsufficientData(format!(
                "Series '{}' is empty; nothing to seed the forecast with",
                series.name()
            ))
        })?;

        let forecaster = self.config.forecaster()?;
        let adjuster = self.config.adjuster()?;

        let mut points = forecaster.forecast(predictor, seed);
        adjuster.adjust(&mut points);

        info!(
            product = series.name(),
            periods = points.len(),
            seed,
            "forecast complete"
        );

        Ok(ProductForecast {
            product: series.name().to_string(),
            historical: series.values(),
            points,
            seasonal_trends: adjuster.trend().factors().to_vec(),
            training,
            round_decimals: self.config.round_decimals,
        })
    }

    /// Train on `series` and forecast it in one call
    pub fn run<R: Regressor>(&self, series: &TimeSeries, regressor: &R) -> Result<ProductForecast> {
        let (predictor, report) = self.train(series, regressor)?.into_parts();
        self.forecast_with(series, &predictor, report)
    }
}
