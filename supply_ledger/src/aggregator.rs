//! Normalization of facility records into one supply table

use crate::facility::{FacilityInfo, FacilityRecord, MalformedReason};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

/// Which quantity a supply record carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuantityKind {
    /// Stock actually delivered and held
    Actual,
    /// Stock forecast to be held
    Forecasted,
    /// Monthly production capacity
    Capacity,
}

impl fmt::Display for QuantityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuantityKind::Actual => write!(f, "Actual"),
            QuantityKind::Forecasted => write!(f, "Forecasted"),
            QuantityKind::Capacity => write!(f, "Capacity"),
        }
    }
}

/// One normalized (facility, material, quantity kind) row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplyRecord {
    /// Name of the source facility
    pub facility_name: String,
    /// Location of the source facility
    pub location: String,
    /// Material the quantity refers to
    pub material: String,
    /// Kind of quantity
    pub quantity_kind: QuantityKind,
    /// The quantity itself
    pub quantity: f64,
    /// Distance of the source facility
    pub distance_km: f64,
}

/// A facility that was skipped during aggregation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MalformedFacility {
    /// 0-based position in the input list
    pub position: usize,
    /// Best-effort facility name
    pub name: String,
    /// What was wrong with it
    pub reason: MalformedReason,
}

/// Output of one aggregation: the supply table plus non-fatal warnings
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SupplyAggregation {
    /// Records in facility order, then material order
    pub records: Vec<SupplyRecord>,
    /// Facilities that contributed nothing
    pub warnings: Vec<MalformedFacility>,
}

impl SupplyAggregation {
    /// Records of one quantity kind, in table order
    pub fn records_of_kind(&self, kind: QuantityKind) -> impl Iterator<Item = &SupplyRecord> {
        self.records.iter().filter(move |r| r.quantity_kind == kind)
    }

    /// Total quantity of one kind per material, materials in first-seen order
    pub fn totals_by_material(&self, kind: QuantityKind) -> Vec<(String, f64)> {
        let mut totals: Vec<(String, f64)> = Vec::new();
        for record in self.records_of_kind(kind) {
            match totals.iter_mut().find(|(m, _)| *m == record.material) {
                Some((_, total)) => *total += record.quantity,
                None => totals.push((record.material.clone(), record.quantity)),
            }
        }
        totals
    }

    /// Closest record carrying `material`; the earliest wins a tie
    pub fn nearest_source(&self, material: &str) -> Option<&SupplyRecord> {
        self.records
            .iter()
            .filter(|r| r.material == material)
            .fold(None, |best: Option<&SupplyRecord>, r| match best {
                Some(b) if b.distance_km <= r.distance_km => Some(b),
                _ => Some(r),
            })
    }

    /// Check whether every facility was usable
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Flattens facility records into [`SupplyRecord`]s.
///
/// Output depends only on the input: the same list always yields the same
/// records in the same order.
#[derive(Debug, Clone, Copy, Default)]
pub struct SupplyAggregator;

impl SupplyAggregator {
    /// Create a new aggregator
    pub fn new() -> Self {
        Self
    }

    /// Normalize `facilities`, skipping (and reporting) malformed ones
    pub fn aggregate(&self, facilities: &[FacilityRecord]) -> SupplyAggregation {
        let mut out = SupplyAggregation::default();

        for (position, facility) in facilities.iter().enumerate() {
            match facility {
                FacilityRecord::Inventory(f) => {
                    for (material, level) in f.inventory.iter() {
                        let present = [
                            (QuantityKind::Actual, level.actual),
                            (QuantityKind::Forecasted, level.forecasted),
                        ];
                        for (kind, quantity) in present {
                            if let Some(quantity) = quantity {
                                out.records.push(record(&f.info, material, kind, quantity));
                            }
                        }
                    }
                }
                FacilityRecord::Production(f) => {
                    for (material, &capacity) in f.capacity.iter() {
                        out.records.push(record(
                            &f.info,
                            material,
                            QuantityKind::Capacity,
                            capacity,
                        ));
                    }
                }
                FacilityRecord::Malformed { name, reason } => {
                    warn!(position, facility = %name, %reason, "skipping malformed facility");
                    out.warnings.push(MalformedFacility {
                        position,
                        name: name.clone(),
                        reason: reason.clone(),
                    });
                }
            }
        }

        debug!(
            facilities = facilities.len(),
            records = out.records.len(),
            skipped = out.warnings.len(),
            "aggregated supply"
        );
        out
    }
}

fn record(info: &FacilityInfo, material: &str, kind: QuantityKind, quantity: f64) -> SupplyRecord {
    SupplyRecord {
        facility_name: info.name.clone(),
        location: info.location.clone(),
        material: material.to_string(),
        quantity_kind: kind,
        quantity,
        distance_km: info.distance_km,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facility::InventoryLevel;
    use pretty_assertions::assert_eq;

    fn depot() -> FacilityRecord {
        FacilityRecord::inventory(
            "Depot",
            "Pune",
            10.0,
            vec![(
                "chemicalA".to_string(),
                InventoryLevel {
                    actual: Some(5.0),
                    forecasted: Some(6.0),
                },
            )],
        )
        .unwrap()
    }

    #[test]
    fn test_inventory_emits_actual_then_forecasted() {
        let out = SupplyAggregator::new().aggregate(&[depot()]);
        assert_eq!(
            out.records,
            vec![
                SupplyRecord {
                    facility_name: "Depot".to_string(),
                    location: "Pune".to_string(),
                    material: "chemicalA".to_string(),
                    quantity_kind: QuantityKind::Actual,
                    quantity: 5.0,
                    distance_km: 10.0,
                },
                SupplyRecord {
                    facility_name: "Depot".to_string(),
                    location: "Pune".to_string(),
                    material: "chemicalA".to_string(),
                    quantity_kind: QuantityKind::Forecasted,
                    quantity: 6.0,
                    distance_km: 10.0,
                },
            ]
        );
        assert!(out.is_clean());
    }

    #[test]
    fn test_missing_side_is_not_emitted() {
        let facility = FacilityRecord::inventory(
            "Depot",
            "Pune",
            10.0,
            vec![
                (
                    "onlyForecast".to_string(),
                    InventoryLevel {
                        actual: None,
                        forecasted: Some(2.0),
                    },
                ),
                ("nothing".to_string(), InventoryLevel::default()),
            ],
        )
        .unwrap();
        let out = SupplyAggregator::new().aggregate(&[facility]);
        assert_eq!(out.records.len(), 1);
        assert_eq!(out.records[0].quantity_kind, QuantityKind::Forecasted);
    }

    #[test]
    fn test_malformed_is_skipped_with_warning() {
        let facilities = vec![
            FacilityRecord::Malformed {
                name: "Ghost".to_string(),
                reason: MalformedReason::MissingPayload,
            },
            depot(),
        ];
        let out = SupplyAggregator::new().aggregate(&facilities);
        assert_eq!(out.records.len(), 2);
        assert_eq!(out.warnings.len(), 1);
        assert_eq!(out.warnings[0].position, 0);
        assert_eq!(out.warnings[0].name, "Ghost");
    }
}
