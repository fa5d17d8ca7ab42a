//! # Agrocast
//!
//! Facade over [`demand_forecast`] and [`supply_ledger`] for an
//! agricultural input distributor: forecast weekly demand per product and
//! line it up against stock and capacity held by nearby facilities.
//!
//! ## Example
//!
//! ```
//! use agrocast::{AgroContext, ForecastConfig};
//! use demand_forecast::models::LinearLag;
//! use demand_forecast::DataLoader;
//!
//! # fn main() -> agrocast::Result<()> {
//! let urea = DataLoader::from_json_str("urea", r#"{"sales": [
//!     {"date": "2024-01-01", "units_sold": 40},
//!     {"date": "2024-01-08", "units_sold": 44},
//!     {"date": "2024-01-15", "units_sold": 47},
//!     {"date": "2024-01-22", "units_sold": 52}
//! ]}"#)?;
//!
//! let ctx = AgroContext::new(ForecastConfig::default().with_periods(6))?.with_product(urea);
//! let forecast = ctx.forecast_product("urea", &LinearLag::new())?;
//! assert_eq!(forecast.horizon(), 6);
//! assert!(ctx.supply().records.is_empty());
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod context;
pub mod error;
pub mod logging;

pub use crate::cache::{fingerprint, PredictorCache};
pub use crate::context::AgroContext;
pub use crate::error::{AgroError, Result};
pub use crate::logging::init_tracing;

pub use demand_forecast::{ForecastConfig, ProductForecast};
pub use supply_ledger::{QuantityKind, SupplyAggregation, SupplyRecord};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
