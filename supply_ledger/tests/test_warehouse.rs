use pretty_assertions::assert_eq;
use supply_ledger::{QuantityKind, SupplyAggregator, SupplyError, WarehouseSnapshot};

const SNAPSHOT: &str = r#"{
    "warehouse": {
        "inventory": [{"material_name": "chemicalA", "quantity": 40}],
        "sales_data": {
            "2023": {"February": {"chemicalA": 12}, "January": {"chemicalA": 10}}
        },
        "nearby_inventories": [
            {"name": "North Depot", "location": "Pune", "distance_km": 15,
             "inventory": {"chemicalA": {"Actual Quantity delivered": 5, "Forecasted Quantity": 6}}},
            {"name": "Broken", "location": "Nowhere", "distance_km": 3,
             "inventory": {}, "production_capacity_per_month": {}},
            {"plant_id": "PL-9", "location": "Nagpur", "distance_km": 90,
             "production_capacity_per_month": {"chemicalA": 500}}
        ],
        "shippers": []
    }
}"#;

#[test]
fn test_snapshot_feeds_the_aggregator() {
    let snapshot = WarehouseSnapshot::from_json_str(SNAPSHOT).unwrap();
    let table = SupplyAggregator::new().aggregate(&snapshot.facilities);

    let kinds: Vec<(String, QuantityKind, f64)> = table
        .records
        .iter()
        .map(|r| (r.facility_name.clone(), r.quantity_kind, r.quantity))
        .collect();
    assert_eq!(
        kinds,
        vec![
            ("North Depot".to_string(), QuantityKind::Actual, 5.0),
            ("North Depot".to_string(), QuantityKind::Forecasted, 6.0),
            ("PL-9".to_string(), QuantityKind::Capacity, 500.0),
        ]
    );
    assert_eq!(table.warnings.len(), 1);
    assert_eq!(table.warnings[0].name, "Broken");
    assert_eq!(table.warnings[0].position, 1);
}

#[test]
fn test_snapshot_sales_history() {
    let snapshot = WarehouseSnapshot::from_json_str(SNAPSHOT).unwrap();
    let units: Vec<f64> = snapshot
        .monthly_history("chemicalA")
        .into_iter()
        .map(|(_, units)| units)
        .collect();
    assert_eq!(units, vec![10.0, 12.0]);
    assert_eq!(snapshot.inventory[0].quantity, 40.0);
}

#[test]
fn test_missing_snapshot_file() {
    let result = WarehouseSnapshot::from_json_file("/nonexistent/warehouse.json");
    assert!(matches!(result, Err(SupplyError::Io(_))));
}
