//! Forecast configuration
//!
//! The horizon, the trend vector and the train/evaluate split are the only
//! tunables. They are always passed in explicitly; nothing is read from the
//! environment.

use crate::error::{ForecastError, Result};
use crate::forecaster::{RecursiveForecaster, DEFAULT_PERIODS};
use crate::seasonal::{SeasonalAdjuster, SeasonalTrendVector, DEFAULT_SEASONAL_TRENDS};
use crate::training::SplitOptions;
use serde::{Deserialize, Serialize};

fn default_periods() -> i64 {
    DEFAULT_PERIODS
}

fn default_trends() -> Vec<f64> {
    DEFAULT_SEASONAL_TRENDS.to_vec()
}

fn default_test_ratio() -> f64 {
    0.2
}

fn default_seed() -> u64 {
    42
}

fn default_round_decimals() -> u32 {
    2
}

/// Settings for one forecast invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastConfig {
    /// Number of periods to forecast
    #[serde(default = "default_periods")]
    pub periods: i64,
    /// Multiplicative trend factors tiled over the horizon
    #[serde(default = "default_trends")]
    pub seasonal_trends: Vec<f64>,
    /// Fraction of lag rows held out for evaluation
    #[serde(default = "default_test_ratio")]
    pub test_ratio: f64,
    /// Seed of the split shuffle
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Decimal places used by reporting helpers
    #[serde(default = "default_round_decimals")]
    pub round_decimals: u32,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            periods: default_periods(),
            seasonal_trends: default_trends(),
            test_ratio: default_test_ratio(),
            seed: default_seed(),
            round_decimals: default_round_decimals(),
        }
    }
}

impl ForecastConfig {
    /// Parse a TOML document; missing keys take their defaults
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the horizon
    pub fn with_periods(mut self, periods: i64) -> Self {
        self.periods = periods;
        self
    }

    /// Replace the trend vector
    pub fn with_seasonal_trends(mut self, trends: Vec<f64>) -> Self {
        self.seasonal_trends = trends;
        self
    }

    /// Set the decimal places of reported values
    pub fn with_round_decimals(mut self, decimals: u32) -> Self {
        self.round_decimals = decimals;
        self
    }

    /// Check every setting, surfacing the first problem as a typed error
    pub fn validate(&self) -> Result<()> {
        self.forecaster()?;
        self.trend_vector()?;
        if !(self.test_ratio > 0.0 && self.test_ratio < 1.0) {
            return Err(ForecastError::InvalidParameter(format!(
                "test_ratio must be between 0 and 1 (exclusive), got {}",
                self.test_ratio
            )));
        }
        Ok(())
    }

    /// Build the forecaster for the configured horizon
    pub fn forecaster(&self) -> Result<RecursiveForecaster> {
        RecursiveForecaster::new(self.periods)
    }

    /// Build the validated trend vector
    pub fn trend_vector(&self) -> Result<SeasonalTrendVector> {
        SeasonalTrendVector::new(self.seasonal_trends.clone())
    }

    /// Build the seasonal adjuster
    pub fn adjuster(&self) -> Result<SeasonalAdjuster> {
        Ok(SeasonalAdjuster::new(self.trend_vector()?))
    }

    /// Split settings for training
    pub fn split(&self) -> SplitOptions {
        SplitOptions {
            test_ratio: self.test_ratio,
            seed: self.seed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ForecastConfig::default();
        assert_eq!(config.periods, 52);
        assert_eq!(config.seasonal_trends, vec![1.05, 1.05, 1.00, 1.00, 0.95, 0.95]);
        assert_eq!(config.split(), SplitOptions::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = ForecastConfig::from_toml_str("periods = 12\nseed = 7\n").unwrap();
        assert_eq!(config.periods, 12);
        assert_eq!(config.seed, 7);
        assert_eq!(config.test_ratio, 0.2);
        assert_eq!(config.seasonal_trends.len(), 6);
        assert_eq!(config.round_decimals, 2);

        let config = ForecastConfig::from_toml_str("round_decimals = 0").unwrap();
        assert_eq!(config.round_decimals, 0);
    }

    #[test]
    fn test_invalid_toml_values() {
        assert!(matches!(
            ForecastConfig::from_toml_str("periods = 0"),
            Err(ForecastError::InvalidHorizon(0))
        ));
        assert!(matches!(
            ForecastConfig::from_toml_str("periods = 9223372036854775807"),
            Err(ForecastError::InvalidHorizon(i64::MAX))
        ));
        assert!(matches!(
            ForecastConfig::from_toml_str("seasonal_trends = []"),
            Err(ForecastError::InvalidTrend(_))
        ));
        assert!(matches!(
            ForecastConfig::from_toml_str("test_ratio = 1.5"),
            Err(ForecastError::InvalidParameter(_))
        ));
        assert!(matches!(
            ForecastConfig::from_toml_str("periods = \"many\""),
            Err(ForecastError::ConfigError(_))
        ));
    }
}
