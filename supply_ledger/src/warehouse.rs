//! Warehouse snapshot documents
//!
//! A snapshot bundles the home warehouse's own stock, its monthly sales by
//! material and the list of nearby facilities:
//!
//! ```json
//! {"warehouse": {
//!     "inventory": [{"material_name": "Urea", "quantity": 120}],
//!     "sales_data": {"2023": {"January": {"Urea": 40}}},
//!     "nearby_inventories": [ ... facility entries ... ]
//! }}
//! ```
//!
//! Other sections (shippers and the like) are ignored.

use crate::error::{Result, SupplyError};
use crate::facility::{decode_facilities, FacilityRecord, OrderedMap};
use chrono::{Month, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;
use std::fs;
use std::path::Path;

/// One line of the home warehouse's own inventory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryLine {
    /// Material held
    pub material_name: String,
    /// Quantity held
    pub quantity: f64,
}

/// Units of one material sold in one month
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlySale {
    /// First day of the month
    pub month: NaiveDate,
    /// Material sold
    pub material: String,
    /// Units sold
    pub units: f64,
}

#[derive(Debug, Deserialize)]
struct RawWarehouse {
    #[serde(default)]
    inventory: Vec<InventoryLine>,
    #[serde(default)]
    sales_data: OrderedMap<OrderedMap<OrderedMap<f64>>>,
    #[serde(default)]
    nearby_inventories: Vec<Box<RawValue>>,
}

#[derive(Debug, Deserialize)]
struct RawSnapshot {
    warehouse: RawWarehouse,
}

/// Decoded warehouse snapshot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WarehouseSnapshot {
    /// Home warehouse stock
    pub inventory: Vec<InventoryLine>,
    /// Monthly sales sorted by month; same-month entries keep document order
    pub monthly_sales: Vec<MonthlySale>,
    /// Nearby facilities in document order
    pub facilities: Vec<FacilityRecord>,
}

impl WarehouseSnapshot {
    /// Decode a snapshot document.
    ///
    /// The sales section must be well formed (a bad year or month name is
    /// an error). Facility entries are decoded one by one, so a malformed
    /// facility is kept as [`FacilityRecord::Malformed`] rather than
    /// failing the document.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let raw: RawSnapshot = serde_json::from_str(text)?;
        let monthly_sales = flatten_sales(&raw.warehouse.sales_data)?;

        Ok(Self {
            inventory: raw.warehouse.inventory,
            monthly_sales,
            facilities: decode_facilities(&raw.warehouse.nearby_inventories),
        })
    }

    /// Read and decode a snapshot file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Distinct materials with sales, in first-seen order
    pub fn sold_materials(&self) -> Vec<&str> {
        let mut materials: Vec<&str> = Vec::new();
        for sale in &self.monthly_sales {
            if !materials.contains(&sale.material.as_str()) {
                materials.push(&sale.material);
            }
        }
        materials
    }

    /// `(month, units)` history of one material in month order
    pub fn monthly_history(&self, material: &str) -> Vec<(NaiveDate, f64)> {
        self.monthly_sales
            .iter()
            .filter(|s| s.material == material)
            .map(|s| (s.month, s.units))
            .collect()
    }
}

fn month_start(year: &str, month: &str) -> Result<NaiveDate> {
    let year: i32 = year
        .trim()
        .parse()
        .map_err(|_| SupplyError::InvalidRecord(format!("bad sales year {:?}", year)))?;
    let month: Month = month
        .trim()
        .parse()
        .map_err(|_| SupplyError::InvalidRecord(format!("bad sales month {:?}", month)))?;

    NaiveDate::from_ymd_opt(year, month.number_from_month(), 1).ok_or_else(|| {
        SupplyError::InvalidRecord(format!("sales month {:?} {} out of range", month, year))
    })
}

fn flatten_sales(sales: &OrderedMap<OrderedMap<OrderedMap<f64>>>) -> Result<Vec<MonthlySale>> {
    let mut flat = Vec::new();
    for (year, months) in sales.iter() {
        for (month, materials) in months.iter() {
            let start = month_start(year, month)?;
            for (material, &units) in materials.iter() {
                flat.push(MonthlySale {
                    month: start,
                    material: material.to_string(),
                    units,
                });
            }
        }
    }
    // Stable: materials within a month stay in document order
    flat.sort_by_key(|s| s.month);
    Ok(flat)
}
