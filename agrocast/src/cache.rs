//! Opt-in cache of trained predictors
//!
//! Entries are keyed by product name and tagged with a SHA-256 fingerprint
//! of the series contents and the regressor configuration. A lookup only
//! hits when the fingerprint still matches, so a product whose history
//! changed is retrained instead of served stale.

use demand_forecast::{
    ForecastPipeline, Regressor, SingleStepPredictor, TimeSeries, TrainedPredictor,
};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use tracing::debug;

/// Hex SHA-256 over the series dates and values plus the regressor key
pub fn fingerprint(series: &TimeSeries, regressor_key: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(regressor_key.as_bytes());
    for obs in series.observations() {
        hasher.update(obs.timestamp.to_string().as_bytes());
        hasher.update(obs.value.to_le_bytes());
    }
    hex::encode(hasher.finalize())
}

/// Key identifying a regressor's configuration, parameters included
pub fn regressor_key<R: Regressor>(regressor: &R) -> String {
    format!("{:?}", regressor)
}

#[derive(Debug, Clone)]
struct Entry<P> {
    fingerprint: String,
    trained: TrainedPredictor<P>,
}

/// Trained predictors by product name
#[derive(Debug, Clone)]
pub struct PredictorCache<P> {
    entries: HashMap<String, Entry<P>>,
}

impl<P> Default for PredictorCache<P> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<P: SingleStepPredictor> PredictorCache<P> {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached predictor for `series`, if it was trained on identical data
    /// with an identically configured regressor
    pub fn get<R>(&self, series: &TimeSeries, regressor: &R) -> Option<&TrainedPredictor<P>>
    where
        R: Regressor<Fitted = P>,
    {
        let fp = fingerprint(series, &regressor_key(regressor));
        self.entries
            .get(series.name())
            .filter(|e| e.fingerprint == fp)
            .map(|e| &e.trained)
    }

    /// Store a predictor for `series`, returning whatever was stored for
    /// the same product before
    pub fn insert<R>(
        &mut self,
        series: &TimeSeries,
        regressor: &R,
        trained: TrainedPredictor<P>,
    ) -> Option<TrainedPredictor<P>>
    where
        R: Regressor<Fitted = P>,
    {
        let entry = Entry {
            fingerprint: fingerprint(series, &regressor_key(regressor)),
            trained,
        };
        self.entries
            .insert(series.name().to_string(), entry)
            .map(|old| old.trained)
    }

    /// Return the cached predictor or train, store and return a new one
    pub fn get_or_train<R>(
        &mut self,
        pipeline: &ForecastPipeline,
        series: &TimeSeries,
        regressor: &R,
    ) -> demand_forecast::error::Result<&TrainedPredictor<P>>
    where
        R: Regressor<Fitted = P>,
    {
        let fp = fingerprint(series, &regressor_key(regressor));
        let fresh = matches!(self.entries.get(series.name()), Some(e) if e.fingerprint == fp);

        if fresh {
            debug!(product = series.name(), "predictor cache hit");
        } else {
            debug!(product = series.name(), "predictor cache miss");
            let trained = pipeline.train(series, regressor)?;
            self.entries.insert(
                series.name().to_string(),
                Entry {
                    fingerprint: fp,
                    trained,
                },
            );
        }

        self.entries
            .get(series.name())
            .map(|e| &e.trained)
            .ok_or_else(|| {
                demand_forecast::ForecastError::Training(format!(
                    "no cached predictor for '{}'",
                    series.name()
                ))
            })
    }

    /// Drop the entry for `product`; true if there was one
    pub fn invalidate(&mut self, product: &str) -> bool {
        self.entries.remove(product).is_some()
    }

    /// Drop every entry
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of cached products
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
