//! Time series data handling for forecasting

use crate::error::{ForecastError, Result};
use crate::utils::parse_date;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// One observed value at a point in time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Date of the observation
    pub timestamp: NaiveDate,
    /// Observed value (units sold for demand series)
    pub value: f64,
}

impl Observation {
    /// Create a new observation
    pub fn new(timestamp: NaiveDate, value: f64) -> Self {
        Self { timestamp, value }
    }
}

/// Ordered historical observations for one product.
///
/// Timestamps are unique and strictly increasing and every value is finite.
/// The series is immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSeries {
    /// Product the series belongs to
    name: String,
    /// Observations in timestamp order
    observations: Vec<Observation>,
}

impl TimeSeries {
    /// Create a new TimeSeries, validating ordering and values
    pub fn new(name: impl Into<String>, observations: Vec<Observation>) -> Result<Self> {
        for (i, obs) in observations.iter().enumerate() {
            if !obs.value.is_finite() {
                return Err(ForecastError::DataError(format!(
                    "Non-finite value at position {} ({})",
                    i, obs.timestamp
                )));
            }
        }

        if let Some(pair) = observations
            .windows(2)
            .find(|w| w[0].timestamp >= w[1].timestamp)
        {
            return Err(ForecastError::DataError(format!(
                "Timestamps must be strictly increasing: {} is followed by {}",
                pair[0].timestamp, pair[1].timestamp
            )));
        }

        Ok(Self {
            name: name.into(),
            observations,
        })
    }

    /// Create a new TimeSeries from parallel date and value vectors
    pub fn from_pairs(
        name: impl Into<String>,
        dates: Vec<NaiveDate>,
        values: Vec<f64>,
    ) -> Result<Self> {
        if dates.len() != values.len() {
            return Err(ForecastError::DataError(format!(
                "Dates length ({}) doesn't match values length ({})",
                dates.len(),
                values.len()
            )));
        }

        let observations = dates
            .into_iter()
            .zip(values)
            .map(|(d, v)| Observation::new(d, v))
            .collect();
        Self::new(name, observations)
    }

    /// Get the product name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the observations
    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    /// Get the observed values in order
    pub fn values(&self) -> Vec<f64> {
        self.observations.iter().map(|o| o.value).collect()
    }

    /// Get the timestamps in order
    pub fn timestamps(&self) -> Vec<NaiveDate> {
        self.observations.iter().map(|o| o.timestamp).collect()
    }

    /// Last observed value, the seed of a recursive forecast
    pub fn last_value(&self) -> Option<f64> {
        self.observations.last().map(|o| o.value)
    }

    /// Check if the series is empty
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Get the number of observations
    pub fn len(&self) -> usize {
        self.observations.len()
    }
}

#[derive(Debug, Deserialize)]
struct SalesEntry {
    date: String,
    units_sold: f64,
}

#[derive(Debug, Deserialize)]
struct SalesFile {
    sales: Vec<SalesEntry>,
}

/// Data loader for product sales histories.
///
/// Loaders fail closed: a missing field, an unparsable date, a non-finite
/// value or an out-of-order timestamp is an error, never a default.
#[derive(Debug)]
pub struct DataLoader;

impl DataLoader {
    /// Conventional file name of a product's sales history
    pub fn sales_file_name(product: &str) -> String {
        format!("{}_sales.json", product.to_lowercase())
    }

    /// Load `<dir>/<product>_sales.json`
    pub fn from_product_dir<P: AsRef<Path>>(dir: P, product: &str) -> Result<TimeSeries> {
        let path: PathBuf = dir.as_ref().join(Self::sales_file_name(product));
        let mut text = String::new();
        File::open(&path)?.read_to_string(&mut text)?;
        Self::from_json_str(product, &text)
    }

    /// Load a `{"sales": [{"date": ..., "units_sold": ...}]}` document from a file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<TimeSeries> {
        let path = path.as_ref();
        let mut text = String::new();
        File::open(path)?.read_to_string(&mut text)?;
        Self::from_json_str(&Self::product_from_path(path), &text)
    }

    /// Decode a `{"sales": [...]}` document
    pub fn from_json_str(name: &str, text: &str) -> Result<TimeSeries> {
        let file: SalesFile = serde_json::from_str(text)?;
        Self::from_entries(name, file.sales)
    }

    /// Load a `date,units_sold` CSV file
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<TimeSeries> {
        let path = path.as_ref();
        let file = File::open(path)?;
        Self::from_csv_reader(&Self::product_from_path(path), file)
    }

    /// Decode `date,units_sold` CSV from any reader
    pub fn from_csv_reader<R: Read>(name: &str, reader: R) -> Result<TimeSeries> {
        let mut rdr = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);
        let mut entries = Vec::new();
        for record in rdr.deserialize::<SalesEntry>() {
            entries.push(record?);
        }
        Self::from_entries(name, entries)
    }

    fn from_entries(name: &str, entries: Vec<SalesEntry>) -> Result<TimeSeries> {
        let observations = entries
            .into_iter()
            .map(|e| Ok(Observation::new(parse_date(&e.date)?, e.units_sold)))
            .collect::<Result<Vec<_>>>()?;
        TimeSeries::new(name, observations)
    }

    fn product_from_path(path: &Path) -> String {
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        stem.strip_suffix("_sales")
            .map(str::to_string)
            .unwrap_or(stem)
    }
}
