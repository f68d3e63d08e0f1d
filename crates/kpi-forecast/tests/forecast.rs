use std::collections::HashSet;

use kpi_forecast::{ForecastError, merge, run_forecast, run_forecast_with_progress, train};
use kpi_model::{ForecastOptions, HistoricalRecord, KpiError, RecordKind};

fn history() -> Vec<HistoricalRecord> {
    let mut rows = Vec::new();
    for (account, base) in [("1001", 100.0), ("1002", 500.0)] {
        for (name, scale) in [("Revenue", 1.0), ("Cost", 0.4)] {
            for month in 1..=12u32 {
                rows.push(HistoricalRecord {
                    account_id: account.to_string(),
                    english_name: name.to_string(),
                    year: 2024,
                    month,
                    monthly_value: base * scale + f64::from(month),
                });
            }
        }
    }
    rows
}

fn quick_options() -> ForecastOptions {
    ForecastOptions::default().with_n_estimators(20)
}

#[test]
fn forecasts_three_months_for_every_observed_pair() {
    let history = history();
    assert_eq!(history.len(), 48);

    let outcome = run_forecast(&history, &quick_options()).expect("forecast");
    assert_eq!(outcome.forecasts.len(), 12);
    assert_eq!(outcome.combined.len(), 60);
    assert_eq!(outcome.accounts, 2);
    assert_eq!(outcome.kpis, 2);
    assert_eq!(outcome.metrics.test_rows, 10);
    assert_eq!(outcome.metrics.train_rows, 38);

    let observed: HashSet<(&str, &str)> = history
        .iter()
        .map(|r| (r.account_id.as_str(), r.english_name.as_str()))
        .collect();
    for forecast in &outcome.forecasts {
        assert!(observed.contains(&(forecast.account_id.as_str(), forecast.english_name.as_str())));
        assert_eq!(forecast.year, 2025);
        assert!((1..=3).contains(&forecast.month));
    }

    let months: Vec<u32> = outcome.forecasts.iter().take(3).map(|f| f.month).collect();
    assert_eq!(months, vec![1, 2, 3]);
    assert_eq!(outcome.forecasts[0].account_id, "1001");
    assert_eq!(outcome.forecasts[0].english_name, "Revenue");
    assert_eq!(outcome.forecasts[3].english_name, "Cost");
}

#[test]
fn combined_keeps_history_first_and_unmodified() {
    let history = history();
    let outcome = run_forecast(&history, &quick_options()).expect("forecast");

    for (combined, original) in outcome.combined.iter().zip(&history) {
        assert_eq!(combined.kind, Some(RecordKind::Historical));
        assert_eq!(combined.account_id, original.account_id);
        assert_eq!(combined.english_name, original.english_name);
        assert_eq!(combined.year, original.year);
        assert_eq!(combined.month, original.month);
        assert_eq!(combined.monthly_value, Some(original.monthly_value));
    }
    for (combined, forecast) in outcome.combined[48..].iter().zip(&outcome.forecasts) {
        assert_eq!(combined.kind, Some(RecordKind::Forecast));
        assert_eq!(combined.monthly_value, Some(forecast.predicted_monthly_value));
    }
}

#[test]
fn predictions_stay_within_the_training_range() {
    let history = history();
    let outcome = run_forecast(&history, &quick_options()).expect("forecast");
    let min = history.iter().map(|r| r.monthly_value).fold(f64::INFINITY, f64::min);
    let max = history
        .iter()
        .map(|r| r.monthly_value)
        .fold(f64::NEG_INFINITY, f64::max);
    for forecast in &outcome.forecasts {
        assert!(forecast.predicted_monthly_value >= min - 1e-9);
        assert!(forecast.predicted_monthly_value <= max + 1e-9);
    }
}

#[test]
fn runs_are_deterministic() {
    let history = history();
    let a = run_forecast(&history, &quick_options()).expect("forecast");
    let b = run_forecast(&history, &quick_options()).expect("forecast");
    assert_eq!(a.forecasts, b.forecasts);
    assert_eq!(a.metrics, b.metrics);
}

#[test]
fn disjoint_kpis_are_not_cross_joined() {
    let mut history = Vec::new();
    for month in 1..=6u32 {
        history.push(HistoricalRecord {
            account_id: "A".to_string(),
            english_name: "Revenue".to_string(),
            year: 2024,
            month,
            monthly_value: f64::from(month),
        });
        history.push(HistoricalRecord {
            account_id: "B".to_string(),
            english_name: "Cost".to_string(),
            year: 2024,
            month,
            monthly_value: -f64::from(month),
        });
    }
    let outcome = run_forecast(&history, &quick_options()).expect("forecast");
    assert_eq!(outcome.forecasts.len(), 6);
    assert!(
        outcome
            .forecasts
            .iter()
            .all(|f| (f.account_id == "A") == (f.english_name == "Revenue"))
    );
}

#[test]
fn unknown_category_is_reported_by_field() {
    let history = history();
    let trained = train(&history, &quick_options(), |_| {}).expect("train");

    match trained.predict("9999", "Revenue", 2025, 1) {
        Err(ForecastError::UnknownCategory { field, value }) => {
            assert_eq!(field, "account_id");
            assert_eq!(value, "9999");
        }
        other => panic!("unexpected result: {other:?}"),
    }
    match trained.predict("1001", "Margin", 2025, 1) {
        Err(ForecastError::UnknownCategory { field, .. }) => assert_eq!(field, "english_name"),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn progress_callback_sees_every_tree() {
    let history = history();
    let mut last = 0;
    run_forecast_with_progress(&history, &quick_options(), |done| last = done).expect("forecast");
    assert_eq!(last, 20);
}

#[test]
fn invalid_options_fail_before_training() {
    let history = history();
    let options = quick_options().with_future_months(vec![0, 13]);
    assert!(matches!(
        run_forecast(&history, &options),
        Err(ForecastError::Model(KpiError::InvalidOptions(_)))
    ));
}

#[test]
fn single_row_cannot_be_split() {
    let history = vec![HistoricalRecord {
        account_id: "A".to_string(),
        english_name: "Revenue".to_string(),
        year: 2024,
        month: 1,
        monthly_value: 1.0,
    }];
    assert!(matches!(
        run_forecast(&history, &quick_options()),
        Err(ForecastError::InsufficientData { rows: 1 })
    ));
}

#[test]
fn merge_with_no_forecasts_is_history_only() {
    let history = history();
    let combined = merge(&history, &[]);
    assert_eq!(combined.len(), history.len());
    assert!(combined.iter().all(|row| row.is_historical()));
}
