//! # Agrocast workspace
//!
//! Umbrella crate re-exporting the workspace members under one roof.
//!
//! ```
//! use agrocast_workspace::supply::{facilities_from_json_str, SupplyAggregator};
//!
//! let facilities = facilities_from_json_str(r#"[
//!     {"plant_id": "PL-1", "location": "Nagpur", "distance_km": 80,
//!      "production_capacity_per_month": {"Urea": 1000}}
//! ]"#).unwrap();
//! let table = SupplyAggregator::new().aggregate(&facilities);
//! assert_eq!(table.records[0].facility_name, "PL-1");
//! ```

pub use agrocast::*;

/// Demand forecasting
pub use demand_forecast as forecast;

/// Numeric primitives behind the predictors
pub use lag_math as math;

/// Facility decoding and supply aggregation
pub use supply_ledger as supply;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reexports_resolve() {
        let ctx = AgroContext::default();
        assert!(ctx.product_names().is_empty());
        assert_eq!(forecast::forecaster::DEFAULT_PERIODS, 52);
        assert!(math::LeastSquares::fit(&[1.0, 2.0], &[2.0, 4.0]).is_ok());
        assert!(supply::SupplyAggregator::new().aggregate(&[]).is_clean());
    }
}
