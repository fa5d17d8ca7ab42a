//! # Supply Ledger
//!
//! Reconciles two differently-shaped facility sources into one comparable
//! supply table.
//!
//! - **Held-inventory facilities** report, per material, an actual and/or a
//!   forecasted quantity.
//! - **Production facilities** report a monthly capacity per material.
//!
//! [`SupplyAggregator`] emits one [`SupplyRecord`] per
//! (facility, material, quantity kind) present in the source, preserving
//! facility order and material order. Malformed facilities are skipped and
//! reported, never fatal.
//!
//! ```rust
//! use supply_ledger::{facilities_from_json_str, QuantityKind, SupplyAggregator};
//!
//! let facilities = facilities_from_json_str(r#"[
//!     {"name": "Depot", "location": "Pune", "distance_km": 12,
//!      "inventory": {"chemicalA": {"Actual Quantity delivered": 5, "Forecasted Quantity": 6}}},
//!     {"name": "Plant", "location": "Nagpur", "distance_km": 80,
//!      "production_capacity_per_month": {"chemicalA": 1000}}
//! ]"#).unwrap();
//!
//! let table = SupplyAggregator::new().aggregate(&facilities);
//! assert_eq!(table.records.len(), 3);
//! assert_eq!(table.records[2].quantity_kind, QuantityKind::Capacity);
//! ```

pub mod aggregator;
pub mod error;
pub mod facility;
pub mod warehouse;

pub use crate::aggregator::{
    MalformedFacility, QuantityKind, SupplyAggregation, SupplyAggregator, SupplyRecord,
};
pub use crate::error::SupplyError;
pub use crate::facility::{
    decode_facility, facilities_from_json_str, FacilityInfo, FacilityRecord, InventoryFacility,
    InventoryLevel, MalformedReason, OrderedMap, ProductionFacility,
};
pub use crate::warehouse::{InventoryLine, MonthlySale, WarehouseSnapshot};
