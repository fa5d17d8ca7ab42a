//! Facility records: held-inventory warehouses and production plants
//!
//! Raw facility documents come in two shapes. Decoding turns each one into
//! a [`FacilityRecord`] variant; anything that fits neither shape becomes
//! [`FacilityRecord::Malformed`] so that one bad entry never sinks the rest
//! of a list.

use crate::error::{Result, SupplyError};
use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;
use std::fmt;
use std::marker::PhantomData;

/// String-keyed entries in document order. Duplicate keys are rejected.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedMap<T>(Vec<(String, T)>);

impl<T> OrderedMap<T> {
    /// Build from entries; fails on a repeated key
    pub fn from_entries(entries: Vec<(String, T)>) -> Result<Self> {
        for (i, (key, _)) in entries.iter().enumerate() {
            if entries[..i].iter().any(|(k, _)| k == key) {
                return Err(SupplyError::InvalidRecord(format!(
                    "duplicate key {:?}",
                    key
                )));
            }
        }
        Ok(Self(entries))
    }

    /// Iterate entries in document order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Look up one entry
    pub fn get(&self, key: &str) -> Option<&T> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if there are no entries
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<T> Default for OrderedMap<T> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<T: Serialize> Serialize for OrderedMap<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (k, v) in &self.0 {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for OrderedMap<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct OrderedMapVisitor<T>(PhantomData<T>);

        impl<'de, T: Deserialize<'de>> Visitor<'de> for OrderedMapVisitor<T> {
            type Value = OrderedMap<T>;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map with string keys")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<Self::Value, A::Error> {
                let mut entries: Vec<(String, T)> = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((key, value)) = access.next_entry::<String, T>()? {
                    if entries.iter().any(|(k, _)| *k == key) {
                        return Err(de::Error::custom(format!("duplicate key {:?}", key)));
                    }
                    entries.push((key, value));
                }
                Ok(OrderedMap(entries))
            }
        }

        deserializer.deserialize_map(OrderedMapVisitor(PhantomData))
    }
}

/// Held and expected quantity of one material at a warehouse.
/// Either side may be missing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InventoryLevel {
    /// Quantity actually delivered and held
    #[serde(
        rename = "Actual Quantity delivered",
        alias = "actual_quantity",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub actual: Option<f64>,
    /// Quantity forecast to be held
    #[serde(
        rename = "Forecasted Quantity",
        alias = "forecasted_quantity",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub forecasted: Option<f64>,
}

/// Identity fields shared by both facility shapes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacilityInfo {
    /// Display name
    pub name: String,
    /// Free-form location
    pub location: String,
    /// Distance from the home warehouse
    pub distance_km: f64,
}

/// A third-party warehouse holding stock
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InventoryFacility {
    /// Identity
    pub info: FacilityInfo,
    /// Quantities per material
    pub inventory: OrderedMap<InventoryLevel>,
}

/// A plant with monthly manufacturing capacity
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductionFacility {
    /// Identity
    pub info: FacilityInfo,
    /// Monthly capacity per material
    pub capacity: OrderedMap<f64>,
}

/// Why a facility could not be classified
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum MalformedReason {
    /// Neither an inventory nor a capacity payload
    MissingPayload,
    /// Both payloads at once. The whole facility is dropped; neither
    /// payload takes precedence.
    ConflictingPayloads,
    /// Entry did not decode (bad field type, missing location, ...)
    Invalid(String),
}

impl fmt::Display for MalformedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MalformedReason::MissingPayload => {
                write!(f, "facility has neither inventory nor capacity")
            }
            MalformedReason::ConflictingPayloads => {
                write!(f, "facility has both inventory and capacity")
            }
            MalformedReason::Invalid(msg) => write!(f, "facility did not decode: {}", msg),
        }
    }
}

/// One facility, dispatched by payload shape
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum FacilityRecord {
    /// Held-inventory warehouse
    Inventory(InventoryFacility),
    /// Production plant
    Production(ProductionFacility),
    /// Entry that fits neither shape; skipped by aggregation
    Malformed {
        /// Best-effort name for reporting
        name: String,
        /// What was wrong
        reason: MalformedReason,
    },
}

impl FacilityRecord {
    /// Build a held-inventory facility
    pub fn inventory(
        name: impl Into<String>,
        location: impl Into<String>,
        distance_km: f64,
        inventory: Vec<(String, InventoryLevel)>,
    ) -> Result<Self> {
        Ok(FacilityRecord::Inventory(InventoryFacility {
            info: FacilityInfo {
                name: name.into(),
                location: location.into(),
                distance_km,
            },
            inventory: OrderedMap::from_entries(inventory)?,
        }))
    }

    /// Build a production facility
    pub fn production(
        name: impl Into<String>,
        location: impl Into<String>,
        distance_km: f64,
        capacity: Vec<(String, f64)>,
    ) -> Result<Self> {
        Ok(FacilityRecord::Production(ProductionFacility {
            info: FacilityInfo {
                name: name.into(),
                location: location.into(),
                distance_km,
            },
            capacity: OrderedMap::from_entries(capacity)?,
        }))
    }

    /// Name of the facility, whatever its shape
    pub fn name(&self) -> &str {
        match self {
            FacilityRecord::Inventory(f) => &f.info.name,
            FacilityRecord::Production(f) => &f.info.name,
            FacilityRecord::Malformed { name, .. } => name,
        }
    }
}

/// Facility entry as it appears in a warehouse document
#[derive(Debug, Deserialize)]
struct RawFacility {
    name: Option<String>,
    warehouse_id: Option<String>,
    plant_id: Option<String>,
    location: String,
    distance_km: f64,
    inventory: Option<OrderedMap<InventoryLevel>>,
    #[serde(alias = "capacity")]
    production_capacity_per_month: Option<OrderedMap<f64>>,
}

const UNKNOWN_NAME: &str = "Unknown";

#[derive(Debug, Default, Deserialize)]
struct NameHint {
    name: Option<String>,
    warehouse_id: Option<String>,
    plant_id: Option<String>,
}

impl NameHint {
    fn resolve(self) -> String {
        self.name
            .or(self.warehouse_id)
            .or(self.plant_id)
            .unwrap_or_else(|| UNKNOWN_NAME.to_string())
    }
}

impl From<RawFacility> for FacilityRecord {
    fn from(raw: RawFacility) -> Self {
        let name = NameHint {
            name: raw.name,
            warehouse_id: raw.warehouse_id,
            plant_id: raw.plant_id,
        }
        .resolve();
        let info = FacilityInfo {
            name,
            location: raw.location,
            distance_km: raw.distance_km,
        };

        match (raw.inventory, raw.production_capacity_per_month) {
            (Some(inventory), None) => {
                FacilityRecord::Inventory(InventoryFacility { info, inventory })
            }
            (None, Some(capacity)) => {
                FacilityRecord::Production(ProductionFacility { info, capacity })
            }
            (None, None) => FacilityRecord::Malformed {
                name: info.name,
                reason: MalformedReason::MissingPayload,
            },
            (Some(_), Some(_)) => FacilityRecord::Malformed {
                name: info.name,
                reason: MalformedReason::ConflictingPayloads,
            },
        }
    }
}

/// Decode one facility entry from its JSON text.
///
/// Never fails: malformed input becomes [`FacilityRecord::Malformed`].
/// Decoding works on the raw text so material order and duplicate keys
/// are seen exactly as written.
pub fn decode_facility(text: &str) -> FacilityRecord {
    match serde_json::from_str::<RawFacility>(text) {
        Ok(raw) => raw.into(),
        Err(e) => FacilityRecord::Malformed {
            name: serde_json::from_str::<NameHint>(text)
                .unwrap_or_default()
                .resolve(),
            reason: MalformedReason::Invalid(e.to_string()),
        },
    }
}

/// Decode a list of raw facility entries, isolating failures per entry
pub fn decode_facilities(entries: &[Box<RawValue>]) -> Vec<FacilityRecord> {
    entries.iter().map(|raw| decode_facility(raw.get())).collect()
}

/// Decode a JSON array of facility entries. Only a document that is not an
/// array at all is an error.
pub fn facilities_from_json_str(text: &str) -> Result<Vec<FacilityRecord>> {
    let entries: Vec<Box<RawValue>> = serde_json::from_str(text)?;
    Ok(decode_facilities(&entries))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_inventory_facility() {
        let record = decode_facility(
            r#"{
                "name": "Agro Depot",
                "location": "Pune",
                "distance_km": 12.5,
                "inventory": {
                    "Urea": {"Actual Quantity delivered": 5, "Forecasted Quantity": 6},
                    "Potash": {"Forecasted Quantity": 3}
                }
            }"#,
        );

        match record {
            FacilityRecord::Inventory(f) => {
                assert_eq!(f.info.name, "Agro Depot");
                let materials: Vec<&str> = f.inventory.iter().map(|(m, _)| m).collect();
                assert_eq!(materials, vec!["Urea", "Potash"]);
                assert_eq!(f.inventory.get("Potash").unwrap().actual, None);
            }
            other => panic!("expected inventory facility, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_production_facility_with_id_fallback() {
        let record = decode_facility(
            r#"{
                "plant_id": "PLANT-7",
                "location": "Nagpur",
                "distance_km": 80,
                "production_capacity_per_month": {"Urea": 1000, "DAP": 400}
            }"#,
        );

        match record {
            FacilityRecord::Production(f) => {
                assert_eq!(f.info.name, "PLANT-7");
                assert_eq!(f.capacity.get("DAP"), Some(&400.0));
                let materials: Vec<&str> = f.capacity.iter().map(|(m, _)| m).collect();
                assert_eq!(materials, vec!["Urea", "DAP"]);
            }
            other => panic!("expected production facility, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_capacity_alias() {
        let record = decode_facility(
            r#"{"name": "Plant", "location": "X", "distance_km": 1, "capacity": {"Urea": 10}}"#,
        );
        assert!(matches!(record, FacilityRecord::Production(_)));
    }

    #[test]
    fn test_missing_and_conflicting_payloads() {
        let neither = decode_facility(r#"{"location": "X", "distance_km": 1}"#);
        assert_eq!(
            neither,
            FacilityRecord::Malformed {
                name: "Unknown".to_string(),
                reason: MalformedReason::MissingPayload
            }
        );

        let both = decode_facility(
            r#"{"name": "Both", "location": "X", "distance_km": 1,
                "inventory": {}, "production_capacity_per_month": {}}"#,
        );
        assert!(matches!(
            both,
            FacilityRecord::Malformed {
                reason: MalformedReason::ConflictingPayloads,
                ..
            }
        ));
    }

    #[test]
    fn test_bad_field_types_fail_closed() {
        let record = decode_facility(
            r#"{"warehouse_id": "WH-2", "location": "X", "distance_km": "far", "inventory": {}}"#,
        );
        match record {
            FacilityRecord::Malformed {
                name,
                reason: MalformedReason::Invalid(_),
            } => assert_eq!(name, "WH-2"),
            other => panic!("expected malformed facility, got {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_materials_are_rejected() {
        let text = r#"[{"name": "D", "location": "X", "distance_km": 1,
                        "production_capacity_per_month": {"Urea": 1, "Urea": 2}}]"#;
        let records = facilities_from_json_str(text).unwrap();
        assert!(matches!(records[0], FacilityRecord::Malformed { .. }));
        assert_eq!(records[0].name(), "D");

        assert!(OrderedMap::from_entries(vec![("a".to_string(), 1), ("a".to_string(), 2)]).is_err());
    }

    #[test]
    fn test_non_array_document_is_an_error() {
        assert!(matches!(
            facilities_from_json_str(r#"{"name": "x"}"#),
            Err(SupplyError::Json(_))
        ));
    }
}
