//! Explicit state for one process or request
//!
//! An [`AgroContext`] owns the forecasting configuration, the product
//! series and the facility list. Nothing is global: callers build a
//! context, pass it around, and every forecast call starts from fresh
//! intermediate state.

use crate::cache::PredictorCache;
use crate::error::{AgroError, Result};
use demand_forecast::{
    DataLoader, ForecastConfig, ForecastPipeline, ProductForecast, Regressor, TimeSeries,
};
use std::path::Path;
use supply_ledger::{FacilityRecord, SupplyAggregation, SupplyAggregator, WarehouseSnapshot};
use tracing::info;

/// Forecasting and supply inputs for one run
#[derive(Debug, Clone, Default)]
pub struct AgroContext {
    pipeline: ForecastPipeline,
    products: Vec<TimeSeries>,
    facilities: Vec<FacilityRecord>,
    snapshot: Option<WarehouseSnapshot>,
}

impl AgroContext {
    /// Create an empty context; the configuration is validated here
    pub fn new(config: ForecastConfig) -> Result<Self> {
        Ok(Self {
            pipeline: ForecastPipeline::new(config)?,
            ..Self::default()
        })
    }

    /// Register a product series, replacing one with the same name
    pub fn with_product(mut self, series: TimeSeries) -> Self {
        match self.products.iter_mut().find(|s| s.name() == series.name()) {
            Some(existing) => *existing = series,
            None => self.products.push(series),
        }
        self
    }

    /// Load `<product>_sales.json` from `dir` and register it
    pub fn load_product<P: AsRef<Path>>(self, dir: P, product: &str) -> Result<Self> {
        let series = DataLoader::from_product_dir(dir, product)?;
        Ok(self.with_product(series))
    }

    /// Append facility records
    pub fn with_facilities(mut self, facilities: Vec<FacilityRecord>) -> Self {
        self.facilities.extend(facilities);
        self
    }

    /// Attach a warehouse snapshot; its nearby facilities are appended
    pub fn with_snapshot(mut self, snapshot: WarehouseSnapshot) -> Self {
        self.facilities.extend(snapshot.facilities.iter().cloned());
        self.snapshot = Some(snapshot);
        self
    }

    /// Read a warehouse snapshot file and attach it
    pub fn load_snapshot<P: AsRef<Path>>(self, path: P) -> Result<Self> {
        let snapshot = WarehouseSnapshot::from_json_file(path)?;
        Ok(self.with_snapshot(snapshot))
    }

    /// Get the forecasting configuration
    pub fn config(&self) -> &ForecastConfig {
        self.pipeline.config()
    }

    /// Registered product names in registration order
    pub fn product_names(&self) -> Vec<&str> {
        self.products.iter().map(|s| s.name()).collect()
    }

    /// Series of one product
    pub fn series(&self, product: &str) -> Option<&TimeSeries> {
        self.products.iter().find(|s| s.name() == product)
    }

    /// Facility records in input order
    pub fn facilities(&self) -> &[FacilityRecord] {
        &self.facilities
    }

    /// Attached snapshot, if any
    pub fn snapshot(&self) -> Option<&WarehouseSnapshot> {
        self.snapshot.as_ref()
    }

    fn require_series(&self, product: &str) -> Result<&TimeSeries> {
        self.series(product)
            .ok_or_else(|| AgroError::UnknownProduct(product.to_string()))
    }

    /// Train on one product's history and forecast it
    pub fn forecast_product<R: Regressor>(
        &self,
        product: &str,
        regressor: &R,
    ) -> Result<ProductForecast> {
        let series = self.require_series(product)?;
        Ok(self.pipeline.run(series, regressor)?)
    }

    /// Like [`Self::forecast_product`], reusing a cached predictor when the
    /// product's history and the regressor are unchanged
    pub fn forecast_product_cached<R: Regressor>(
        &self,
        product: &str,
        regressor: &R,
        cache: &mut PredictorCache<R::Fitted>,
    ) -> Result<ProductForecast> {
        let series = self.require_series(product)?;
        let trained = cache.get_or_train(&self.pipeline, series, regressor)?;
        Ok(self
            .pipeline
            .forecast_with(series, trained.predictor(), trained.report().clone())?)
    }

    /// Forecast every registered product, stopping at the first failure
    pub fn forecast_all<R: Regressor>(&self, regressor: &R) -> Result<Vec<ProductForecast>> {
        let forecasts = self
            .products
            .iter()
            .map(|series| self.pipeline.run(series, regressor))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        info!(products = forecasts.len(), "forecast all products");
        Ok(forecasts)
    }

    /// Normalize the facility records into a supply table
    pub fn supply(&self) -> SupplyAggregation {
        SupplyAggregator::new().aggregate(&self.facilities)
    }

    /// Monthly sales of one material from the snapshot, as a series
    /// dated on the first of each month
    pub fn series_from_monthly_sales(&self, material: &str) -> Result<TimeSeries> {
        let snapshot = self.snapshot.as_ref().ok_or(AgroError::MissingSnapshot)?;
        let history = snapshot.monthly_history(material);
        if history.is_empty() {
            return Err(AgroError::NoSalesHistory(material.to_string()));
        }

        let (dates, units): (Vec<_>, Vec<_>) = history.into_iter().unzip();
        Ok(TimeSeries::from_pairs(material, dates, units)?)
    }
}
