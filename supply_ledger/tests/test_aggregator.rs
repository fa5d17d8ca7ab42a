use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;
use supply_ledger::{
    facilities_from_json_str, FacilityRecord, InventoryLevel, MalformedReason, QuantityKind,
    SupplyAggregator, SupplyRecord,
};

const NEARBY: &str = r#"[
    {"name": "Green Valley Depot", "location": "Pune", "distance_km": 12.5,
     "inventory": {
        "chemicalA": {"Actual Quantity delivered": 5, "Forecasted Quantity": 6},
        "chemicalB": {"Forecasted Quantity": 9}
     }},
    {"warehouse_id": "WH-44", "location": "Satara", "distance_km": 40},
    {"plant_id": "PL-1", "location": "Nagpur", "distance_km": 80,
     "production_capacity_per_month": {"chemicalB": 1000, "chemicalA": 250}},
    {"name": "Riverside Stores", "location": "Nashik", "distance_km": 7,
     "inventory": {"chemicalA": {"Actual Quantity delivered": 2}}}
]"#;

fn row(
    facility: &str,
    location: &str,
    material: &str,
    kind: QuantityKind,
    quantity: f64,
    distance_km: f64,
) -> SupplyRecord {
    SupplyRecord {
        facility_name: facility.to_string(),
        location: location.to_string(),
        material: material.to_string(),
        quantity_kind: kind,
        quantity,
        distance_km,
    }
}

#[test]
fn test_mixed_facilities_are_normalized_in_order() {
    let facilities = facilities_from_json_str(NEARBY).unwrap();
    let table = SupplyAggregator::new().aggregate(&facilities);

    assert_eq!(
        table.records,
        vec![
            row("Green Valley Depot", "Pune", "chemicalA", QuantityKind::Actual, 5.0, 12.5),
            row("Green Valley Depot", "Pune", "chemicalA", QuantityKind::Forecasted, 6.0, 12.5),
            row("Green Valley Depot", "Pune", "chemicalB", QuantityKind::Forecasted, 9.0, 12.5),
            row("PL-1", "Nagpur", "chemicalB", QuantityKind::Capacity, 1000.0, 80.0),
            row("PL-1", "Nagpur", "chemicalA", QuantityKind::Capacity, 250.0, 80.0),
            row("Riverside Stores", "Nashik", "chemicalA", QuantityKind::Actual, 2.0, 7.0),
        ]
    );

    assert_eq!(table.warnings.len(), 1);
    assert_eq!(table.warnings[0].position, 1);
    assert_eq!(table.warnings[0].name, "WH-44");
    assert_eq!(table.warnings[0].reason, MalformedReason::MissingPayload);
}

#[test]
fn test_aggregation_is_idempotent() {
    let facilities = facilities_from_json_str(NEARBY).unwrap();
    let aggregator = SupplyAggregator::new();

    let first = aggregator.aggregate(&facilities);
    let second = aggregator.aggregate(&facilities);
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first.records).unwrap(),
        serde_json::to_string(&second.records).unwrap()
    );
}

#[test]
fn test_concurrent_aggregations_agree() {
    let facilities = facilities_from_json_str(NEARBY).unwrap();
    let aggregator = SupplyAggregator::new();
    let expected = aggregator.aggregate(&facilities);

    let results: Vec<_> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| s.spawn(|| aggregator.aggregate(&facilities)))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for result in results {
        assert_eq!(result, expected);
    }
}

#[test]
fn test_reporting_views() {
    let facilities = facilities_from_json_str(NEARBY).unwrap();
    let table = SupplyAggregator::new().aggregate(&facilities);

    assert_eq!(
        table.totals_by_material(QuantityKind::Actual),
        vec![("chemicalA".to_string(), 7.0)]
    );
    assert_eq!(
        table.totals_by_material(QuantityKind::Capacity),
        vec![("chemicalB".to_string(), 1000.0), ("chemicalA".to_string(), 250.0)]
    );

    let nearest = table.nearest_source("chemicalA").unwrap();
    assert_eq!(nearest.facility_name, "Riverside Stores");
    assert_eq!(table.nearest_source("chemicalB").unwrap().facility_name, "Green Valley Depot");
    assert!(table.nearest_source("chemicalZ").is_none());
}

#[rstest]
#[case(r#"{"location": "X", "distance_km": 1}"#)]
#[case(r#"{"name": "N", "location": "X", "distance_km": 1, "inventory": {}, "capacity": {}}"#)]
#[case(r#"{"name": "N", "distance_km": 1, "inventory": {}}"#)]
#[case(r#"{"name": "N", "location": "X", "distance_km": 1, "inventory": {"a": {"Actual Quantity delivered": "five"}}}"#)]
fn test_malformed_entries_do_not_stop_aggregation(#[case] bad: &str) {
    let text = format!(
        r#"[{}, {{"name": "Good", "location": "Y", "distance_km": 2,
                "production_capacity_per_month": {{"m": 3}}}}]"#,
        bad
    );
    let facilities = facilities_from_json_str(&text).unwrap();
    let table = SupplyAggregator::new().aggregate(&facilities);

    assert_eq!(table.warnings.len(), 1);
    assert_eq!(table.warnings[0].position, 0);
    assert_eq!(
        table.records,
        vec![row("Good", "Y", "m", QuantityKind::Capacity, 3.0, 2.0)]
    );
}

#[test]
fn test_empty_input() {
    let table = SupplyAggregator::new().aggregate(&[]);
    assert!(table.records.is_empty());
    assert!(table.is_clean());
}

fn arb_facility() -> impl Strategy<Value = FacilityRecord> {
    let level = (
        prop::option::of(0.0f64..1e4),
        prop::option::of(0.0f64..1e4),
    )
        .prop_map(|(actual, forecasted)| InventoryLevel { actual, forecasted });
    let materials = || prop::collection::btree_set("[a-z]{1,6}", 0..5);

    prop_oneof![
        (materials(), prop::collection::vec(level, 5), 0.0f64..500.0).prop_map(
            |(names, levels, distance)| {
                let entries = names.into_iter().zip(levels).collect();
                FacilityRecord::inventory("inv", "here", distance, entries).unwrap()
            }
        ),
        (materials(), prop::collection::vec(0.0f64..1e5, 5), 0.0f64..500.0).prop_map(
            |(names, caps, distance)| {
                let entries = names.into_iter().zip(caps).collect();
                FacilityRecord::production("plant", "there", distance, entries).unwrap()
            }
        ),
        Just(FacilityRecord::Malformed {
            name: "bad".to_string(),
            reason: MalformedReason::MissingPayload,
        }),
    ]
}

proptest! {
    #[test]
    fn prop_aggregation_is_deterministic(facilities in prop::collection::vec(arb_facility(), 0..12)) {
        let aggregator = SupplyAggregator::new();
        let first = aggregator.aggregate(&facilities);
        let second = aggregator.aggregate(&facilities);
        prop_assert_eq!(&first, &second);

        let malformed = facilities
            .iter()
            .filter(|f| matches!(f, FacilityRecord::Malformed { .. }))
            .count();
        prop_assert_eq!(first.warnings.len(), malformed);
    }

    #[test]
    fn prop_record_count_matches_present_quantities(facilities in prop::collection::vec(arb_facility(), 0..12)) {
        let expected: usize = facilities
            .iter()
            .map(|f| match f {
                FacilityRecord::Inventory(inv) => inv
                    .inventory
                    .iter()
                    .map(|(_, l)| l.actual.is_some() as usize + l.forecasted.is_some() as usize)
                    .sum(),
                FacilityRecord::Production(p) => p.capacity.len(),
                FacilityRecord::Malformed { .. } => 0,
            })
            .sum();
        prop_assert_eq!(SupplyAggregator::new().aggregate(&facilities).records.len(), expected);
    }
}
