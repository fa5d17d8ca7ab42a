use demand_forecast::data::DataLoader;
use demand_forecast::ForecastError;
use std::io::Write;
use tempfile::{tempdir, NamedTempFile};

#[test]
fn test_data_loader_from_csv() {
    // Create a temporary CSV file
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "date,units_sold").unwrap();
    writeln!(file, "2023-01-01,100").unwrap();
    writeln!(file, "2023-01-08,106.5").unwrap();
    writeln!(file, "2023-01-15,108").unwrap();

    let data = DataLoader::from_csv(file.path()).unwrap();

    assert_eq!(data.len(), 3);
    assert_eq!(data.values(), vec![100.0, 106.5, 108.0]);
    assert_eq!(data.last_value(), Some(108.0));
}

#[test]
fn test_data_loader_from_json() {
    let json = r#"{
        "sales": [
            {"date": "2023-01-01", "units_sold": 120},
            {"date": "2023-01-08", "units_sold": 135}
        ]
    }"#;

    let data = DataLoader::from_json_str("herbicide", json).unwrap();
    assert_eq!(data.name(), "herbicide");
    assert_eq!(data.values(), vec![120.0, 135.0]);
    assert_eq!(
        data.timestamps()[1],
        "2023-01-08".parse::<chrono::NaiveDate>().unwrap()
    );
}

#[test]
fn test_data_loader_from_product_dir() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("fertilizer_sales.json");
    std::fs::write(
        &path,
        r#"{"sales": [{"date": "2023-01-01", "units_sold": 5}, {"date": "2023-01-08", "units_sold": 6}]}"#,
    )
    .unwrap();

    let data = DataLoader::from_product_dir(dir.path(), "Fertilizer").unwrap();
    assert_eq!(data.name(), "Fertilizer");
    assert_eq!(data.len(), 2);

    let data = DataLoader::from_json_file(&path).unwrap();
    assert_eq!(data.name(), "fertilizer");
}

#[test]
fn test_data_loader_error_handling() {
    // Test with non-existent file
    let result = DataLoader::from_csv("nonexistent_file.csv");
    assert!(matches!(result, Err(ForecastError::IoError(_))));

    // Missing column
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "date,price").unwrap();
    writeln!(file, "2023-01-01,100").unwrap();
    let result = DataLoader::from_csv(file.path());
    assert!(matches!(result, Err(ForecastError::CsvError(_))));

    // Unparsable date
    let json = r#"{"sales": [{"date": "yesterday", "units_sold": 1}]}"#;
    assert!(matches!(
        DataLoader::from_json_str("x", json),
        Err(ForecastError::DataError(_))
    ));

    // Out-of-order timestamps
    let json = r#"{"sales": [
        {"date": "2023-02-01", "units_sold": 1},
        {"date": "2023-01-01", "units_sold": 2}
    ]}"#;
    assert!(matches!(
        DataLoader::from_json_str("x", json),
        Err(ForecastError::DataError(_))
    ));

    // Value that is not a number
    let json = r#"{"sales": [{"date": "2023-01-01", "units_sold": "lots"}]}"#;
    assert!(matches!(
        DataLoader::from_json_str("x", json),
        Err(ForecastError::JsonError(_))
    ));
}
