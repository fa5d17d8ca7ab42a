//! Utility functions for the demand_forecast crate

use crate::error::{ForecastError, Result};
use chrono::{NaiveDate, NaiveDateTime};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Parse a calendar date, accepting plain dates and date-times (time is dropped)
pub fn parse_date(text: &str) -> Result<NaiveDate> {
    let text = text.trim();
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Ok(date);
    }

    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
            return Ok(dt.date());
        }
    }

    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(text) {
        return Ok(dt.date_naive());
    }

    Err(ForecastError::DataError(format!(
        "Unrecognised date: {:?}",
        text
    )))
}

/// Split items into shuffled training and evaluation sets.
///
/// The shuffle is seeded so the same input, ratio and seed always produce
/// the same split. The evaluation set holds `ceil(len * test_ratio)` items
/// and the training set holds the remainder.
pub fn train_test_split<T: Clone>(items: &[T], test_ratio: f64, seed: u64) -> Result<(Vec<T>, Vec<T>)> {
    if !(test_ratio > 0.0 && test_ratio < 1.0) {
        return Err(ForecastError::InvalidParameter(format!(
            "test_ratio must be between 0 and 1 (exclusive), got {}",
            test_ratio
        )));
    }

    let mut indices: Vec<usize> = (0..items.len()).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let test_size = ((items.len() as f64) * test_ratio).ceil() as usize;
    let (test_idx, train_idx) = indices.split_at(test_size.min(items.len()));

    let train = train_idx.iter().map(|&i| items[i].clone()).collect();
    let test = test_idx.iter().map(|&i| items[i].clone()).collect();

    Ok((train, test))
}

/// Round a value to a fixed number of decimal places
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}
