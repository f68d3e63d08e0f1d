use kpi_correlate::{CorrelateError, run_correlation};
use kpi_model::{CombinedRecord, CorrelationOptions, KpiError, RecordKind};

fn row(
    name: &str,
    year: i32,
    month: u32,
    value: Option<f64>,
    kind: Option<RecordKind>,
) -> CombinedRecord {
    CombinedRecord {
        account_id: "1001".to_string(),
        english_name: name.to_string(),
        year,
        month,
        monthly_value: value,
        kind,
    }
}

fn historical(name: &str, month: u32, value: f64) -> CombinedRecord {
    row(name, 2024, month, Some(value), Some(RecordKind::Historical))
}

fn three_kpis() -> Vec<CombinedRecord> {
    let mut rows = Vec::new();
    for month in 1..=6u32 {
        let m = f64::from(month);
        rows.push(historical("Revenue", month, 10.0 * m));
        rows.push(historical("Cost", month, 100.0 - 3.0 * m));
        rows.push(historical("Headcount", month, (m * 7.0) % 5.0));
    }
    rows
}

#[test]
fn matrix_is_symmetric_with_unit_diagonal() {
    let outcome =
        run_correlation(&three_kpis(), true, &CorrelationOptions::default()).expect("correlate");
    let matrix = &outcome.matrix;
    assert_eq!(matrix.labels(), ["Cost", "Headcount", "Revenue"]);

    for i in 0..matrix.len() {
        let diagonal = matrix.get(i, i).expect("nonzero variance");
        assert!((diagonal - 1.0).abs() < 1e-12);
        for j in 0..matrix.len() {
            assert_eq!(matrix.get(i, j), matrix.get(j, i));
        }
    }
    let cost_revenue = matrix.get(0, 2).expect("defined");
    assert!((cost_revenue + 1.0).abs() < 1e-12);
}

#[test]
fn long_table_has_no_self_pairs() {
    let outcome =
        run_correlation(&three_kpis(), true, &CorrelationOptions::default()).expect("correlate");
    assert_eq!(outcome.entries.len(), 6);
    assert!(outcome.entries.iter().all(|entry| entry.kpi1 != entry.kpi2));
    assert_eq!(outcome.entries[0].kpi1, "Cost");
    assert_eq!(outcome.entries[0].kpi2, "Headcount");
}

#[test]
fn forecast_rows_are_excluded_by_default() {
    let mut rows = three_kpis();
    // A wildly off forecast would flip the Cost/Revenue sign if included.
    rows.push(row("Revenue", 2025, 1, Some(-1e6), Some(RecordKind::Forecast)));
    rows.push(row("Cost", 2025, 1, Some(-1e6), Some(RecordKind::Forecast)));

    let historical_only =
        run_correlation(&rows, true, &CorrelationOptions::default()).expect("correlate");
    assert_eq!(historical_only.rows_used, 18);
    assert_eq!(historical_only.pivot.periods().len(), 6);
    assert!(historical_only.matrix.get(0, 2).expect("defined") < 0.0);

    let everything = run_correlation(
        &rows,
        true,
        &CorrelationOptions::default().with_historical_only(false),
    )
    .expect("correlate");
    assert_eq!(everything.rows_used, 20);
    assert_eq!(everything.pivot.periods().len(), 7);
    assert!(everything.matrix.get(0, 2).expect("defined") > 0.0);
}

#[test]
fn untyped_rows_are_dropped_only_when_a_type_column_exists() {
    let rows: Vec<CombinedRecord> = three_kpis()
        .into_iter()
        .map(|mut record| {
            record.kind = None;
            record
        })
        .collect();
    let outcome =
        run_correlation(&rows, false, &CorrelationOptions::default()).expect("correlate");
    assert_eq!(outcome.rows_used, 18);

    let filtered = run_correlation(&rows, true, &CorrelationOptions::default()).expect("correlate");
    assert_eq!(filtered.rows_used, 0);
    assert!(filtered.matrix.is_empty());
    assert!(filtered.entries.is_empty());
}

#[test]
fn pairwise_deletion_and_all_missing_columns() {
    let mut rows = vec![
        historical("A", 1, 1.0),
        historical("A", 2, 2.0),
        historical("A", 3, 3.0),
        historical("B", 1, 2.0),
        historical("B", 2, 4.0),
        historical("B", 4, 9.0),
    ];
    for month in 1..=4 {
        rows.push(row("Empty", 2024, month, None, Some(RecordKind::Historical)));
    }
    let outcome =
        run_correlation(&rows, true, &CorrelationOptions::default()).expect("correlate");
    let matrix = &outcome.matrix;
    assert_eq!(matrix.labels(), ["A", "B", "Empty"]);

    // Only months 1 and 2 overlap for A and B.
    assert!((matrix.get(0, 1).expect("defined") - 1.0).abs() < 1e-12);
    for i in 0..3 {
        assert_eq!(matrix.get(i, 2), None);
        assert_eq!(matrix.get(2, i), None);
    }
    assert_eq!(outcome.undefined_pairs, 2);
    assert!(
        outcome
            .entries
            .iter()
            .filter(|entry| entry.kpi1 == "Empty" || entry.kpi2 == "Empty")
            .all(|entry| entry.correlation.is_none())
    );
}

#[test]
fn min_periods_leaves_thin_pairs_undefined() {
    let rows = vec![
        historical("A", 1, 1.0),
        historical("A", 2, 2.0),
        historical("B", 1, 3.0),
        historical("B", 2, 5.0),
    ];
    let outcome = run_correlation(
        &rows,
        true,
        &CorrelationOptions::default().with_min_periods(3),
    )
    .expect("correlate");
    assert_eq!(outcome.matrix.get(0, 1), None);
    assert_eq!(outcome.matrix.get(0, 0), None);
}

#[test]
fn duplicate_cells_are_summed_before_correlating() {
    let rows = vec![
        historical("A", 1, 1.0),
        historical("A", 2, 1.0),
        historical("A", 2, 1.0),
        historical("B", 1, 1.0),
        historical("B", 2, 2.0),
    ];
    let outcome =
        run_correlation(&rows, true, &CorrelationOptions::default()).expect("correlate");
    assert_eq!(outcome.pivot.get(1, 0), Some(2.0));
    assert!((outcome.matrix.get(0, 1).expect("defined") - 1.0).abs() < 1e-12);
}

#[test]
fn invalid_month_aborts() {
    let rows = vec![historical("A", 13, 1.0)];
    let err = run_correlation(&rows, true, &CorrelationOptions::default()).unwrap_err();
    assert!(matches!(
        err,
        CorrelateError::InvalidPeriod {
            source: KpiError::InvalidMonth { month: 13, .. },
            ..
        }
    ));
}

#[test]
fn zero_min_periods_is_rejected() {
    let err = run_correlation(&[], true, &CorrelationOptions::default().with_min_periods(0))
        .unwrap_err();
    assert!(matches!(err, CorrelateError::Model(KpiError::InvalidOptions(_))));
}
