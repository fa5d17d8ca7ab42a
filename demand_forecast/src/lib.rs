//! # Demand Forecast
//!
//! Recursive single-step forecasting of product demand with multiplicative
//! seasonal adjustment.
//!
//! ## Features
//!
//! - Validated time series of `(date, value)` observations, loadable from
//!   `{"sales": [...]}` JSON or `date,units_sold` CSV
//! - Lag-1 feature rows (previous value in, next value out)
//! - Pluggable regressors: gradient-boosted trees (default) and least squares
//! - Seeded train/evaluate split with an evaluation MSE report
//! - Recursive multi-period forecasting from the last observation
//! - Seasonal trend vectors tiled cyclically from period 0
//!
//! ## Known limitation
//!
//! The recursive forecaster feeds each prediction back in as the next lag
//! with no correction term, so error compounds and long horizons can drift.
//!
//! ## Quick Start
//!
//! ```rust
//! use demand_forecast::data::DataLoader;
//! use demand_forecast::models::GradientBoostedLag;
//! use demand_forecast::{ForecastConfig, ForecastPipeline};
//!
//! # fn main() -> demand_forecast::error::Result<()> {
//! let json = r#"{"sales": [
//!     {"date": "2023-01-02", "units_sold": 120},
//!     {"date": "2023-01-09", "units_sold": 135},
//!     {"date": "2023-01-16", "units_sold": 128},
//!     {"date": "2023-01-23", "units_sold": 150},
//!     {"date": "2023-01-30", "units_sold": 160},
//!     {"date": "2023-02-06", "units_sold": 155}
//! ]}"#;
//! let series = DataLoader::from_json_str("fertilizer", json)?;
//!
//! let pipeline = ForecastPipeline::new(ForecastConfig::default().with_periods(12))?;
//! let forecast = pipeline.run(&series, &GradientBoostedLag::default())?;
//!
//! assert_eq!(forecast.adjusted().len(), 12);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod data;
pub mod error;
pub mod features;
pub mod forecaster;
pub mod models;
pub mod pipeline;
pub mod seasonal;
pub mod training;
pub mod utils;

// Re-export commonly used types
pub use crate::config::ForecastConfig;
pub use crate::data::{DataLoader, Observation, TimeSeries};
pub use crate::error::ForecastError;
pub use crate::features::{FeatureRow, LagFeatureBuilder};
pub use crate::forecaster::{ForecastPoint, RecursiveForecaster};
pub use crate::models::{Regressor, SingleStepPredictor};
pub use crate::pipeline::{ForecastPipeline, ProductForecast};
pub use crate::seasonal::{SeasonalAdjuster, SeasonalTrendVector};
pub use crate::training::{SplitOptions, TrainedPredictor, TrainingReport};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
