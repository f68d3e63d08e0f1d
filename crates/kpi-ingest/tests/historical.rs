use std::fs;
use std::path::PathBuf;

use kpi_ingest::{IngestError, read_historical_csv};
use tempfile::TempDir;

fn temp_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write file");
    path
}

#[test]
fn reads_rows_with_padded_headers() {
    let dir = TempDir::new().expect("temp dir");
    let path = temp_file(
        &dir,
        "hist.csv",
        "\u{feff}account_id, english_name ,year,month,monthly_value,extra\n\
         A001,Revenue,2024,1,100.5,x\n\
         A001,Cost,2024,2,-3,y\n",
    );

    let records = read_historical_csv(&path).expect("read historical");
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].account_id, "A001");
    assert_eq!(records[0].english_name, "Revenue");
    assert_eq!(records[0].year, 2024);
    assert_eq!(records[0].month, 1);
    assert_eq!(records[0].monthly_value, 100.5);
    assert_eq!(records[1].monthly_value, -3.0);
}

#[test]
fn keeps_leading_zeros_in_account_ids() {
    let dir = TempDir::new().expect("temp dir");
    let path = temp_file(
        &dir,
        "hist.csv",
        "account_id,english_name,year,month,monthly_value\n007,Revenue,2024,3,1\n",
    );
    let records = read_historical_csv(&path).expect("read historical");
    assert_eq!(records[0].account_id, "007");
}

#[test]
fn header_only_file_yields_no_rows() {
    let dir = TempDir::new().expect("temp dir");
    let path = temp_file(
        &dir,
        "hist.csv",
        "account_id,english_name,year,month,monthly_value\n",
    );
    let records = read_historical_csv(&path).expect("read historical");
    assert!(records.is_empty());
}

#[test]
fn missing_file_is_reported() {
    let dir = TempDir::new().expect("temp dir");
    let err = read_historical_csv(&dir.path().join("absent.csv")).unwrap_err();
    assert!(matches!(err, IngestError::NotFound { .. }));
}

#[test]
fn missing_column_is_reported() {
    let dir = TempDir::new().expect("temp dir");
    let path = temp_file(
        &dir,
        "hist.csv",
        "account_id,english_name,year,month\nA,B,2024,1\n",
    );
    let err = read_historical_csv(&path).unwrap_err();
    match err {
        IngestError::MissingColumn { column, .. } => assert_eq!(column, "monthly_value"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn non_numeric_value_fails_to_parse() {
    let dir = TempDir::new().expect("temp dir");
    let path = temp_file(
        &dir,
        "hist.csv",
        "account_id,english_name,year,month,monthly_value\nA,B,2024,1,abc\n",
    );
    let err = read_historical_csv(&path).unwrap_err();
    assert!(matches!(err, IngestError::Csv { .. }));
}

#[test]
fn out_of_range_month_is_rejected() {
    let dir = TempDir::new().expect("temp dir");
    let path = temp_file(
        &dir,
        "hist.csv",
        "account_id,english_name,year,month,monthly_value\nA,B,2024,1,1\nA,B,2024,13,2\n",
    );
    let err = read_historical_csv(&path).unwrap_err();
    match err {
        IngestError::InvalidValue {
            line, column, value, ..
        } => {
            assert_eq!(line, 3);
            assert_eq!(column, "month");
            assert_eq!(value, "13");
        }
        other => panic!("unexpected error: {other}"),
    }
}
