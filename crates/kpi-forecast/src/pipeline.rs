//! Forecast stages: encode, train and evaluate, expand, predict, merge.

use std::time::Instant;

use tracing::{debug, info, info_span};

use kpi_model::{CombinedRecord, ForecastOptions, ForecastRecord, HistoricalRecord};

use crate::error::Result;
use crate::expand::expand_future;
use crate::features::{EncodedRecord, FeatureEncoder, FeatureRow};
use crate::forest::{ForestParams, RandomForestRegressor};
use crate::metrics::EvaluationMetrics;
use crate::split::train_test_split;
use crate::tree::TreeParams;

/// Encoders and ensemble fitted on the training partition.
#[derive(Debug, Clone)]
pub struct TrainedForecaster {
    encoder: FeatureEncoder,
    model: RandomForestRegressor,
    metrics: EvaluationMetrics,
}

impl TrainedForecaster {
    pub fn encoder(&self) -> &FeatureEncoder {
        &self.encoder
    }

    pub fn model(&self) -> &RandomForestRegressor {
        &self.model
    }

    pub fn metrics(&self) -> &EvaluationMetrics {
        &self.metrics
    }

    pub fn predict(
        &self,
        account_id: &str,
        english_name: &str,
        year: i32,
        month: u32,
    ) -> Result<f64> {
        let row = self
            .encoder
            .features_for(account_id, english_name, year, month)?;
        Ok(self.model.predict_one(&row))
    }

    /// Predict every future row for the pairs observed in `history`.
    pub fn forecast(
        &self,
        history: &[HistoricalRecord],
        options: &ForecastOptions,
    ) -> Result<Vec<ForecastRecord>> {
        let start = Instant::now();
        let future = expand_future(history, options.future_year, &options.future_months);
        let forecasts = future
            .into_iter()
            .map(|row| {
                let predicted =
                    self.predict(&row.account_id, &row.english_name, row.year, row.month)?;
                Ok(ForecastRecord {
                    account_id: row.account_id,
                    english_name: row.english_name,
                    year: row.year,
                    month: row.month,
                    predicted_monthly_value: predicted,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        info!(
            rows = forecasts.len(),
            year = options.future_year,
            duration_ms = start.elapsed().as_millis(),
            "future rows predicted"
        );
        Ok(forecasts)
    }
}

/// Fit encoders on all of `history`, split, train on the training rows and
/// score the held-out rows. `on_tree` observes training progress.
pub fn train<P>(
    history: &[HistoricalRecord],
    options: &ForecastOptions,
    on_tree: P,
) -> Result<TrainedForecaster>
where
    P: FnMut(usize),
{
    options.validate()?;

    let encoder = info_span!("encode").in_scope(|| FeatureEncoder::fit(history));
    debug!(
        accounts = encoder.accounts().len(),
        kpis = encoder.names().len(),
        "encoders fitted"
    );
    let encoded = encoder.encode_all(history)?;
    let features: Vec<FeatureRow> = encoded.iter().map(EncodedRecord::features).collect();
    let targets: Vec<f64> = encoded
        .iter()
        .map(|row| row.record.monthly_value)
        .collect();

    let split = train_test_split(features.len(), options.test_ratio, options.seed)?;
    let x_train: Vec<FeatureRow> = split.train.iter().map(|&i| features[i]).collect();
    let y_train: Vec<f64> = split.train.iter().map(|&i| targets[i]).collect();
    let x_test: Vec<FeatureRow> = split.test.iter().map(|&i| features[i]).collect();
    let y_test: Vec<f64> = split.test.iter().map(|&i| targets[i]).collect();

    let params = ForestParams {
        n_estimators: options.n_estimators,
        tree: TreeParams {
            max_depth: options.max_depth,
            ..TreeParams::default()
        },
        seed: options.seed,
    };
    let model = info_span!("train", trees = params.n_estimators).in_scope(|| -> Result<_> {
        let start = Instant::now();
        let model = RandomForestRegressor::fit_with_progress(&x_train, &y_train, &params, on_tree)?;
        info!(
            trees = model.n_trees(),
            train_rows = x_train.len(),
            duration_ms = start.elapsed().as_millis(),
            "model trained"
        );
        Ok(model)
    })?;

    let predictions = model.predict(&x_test);
    let metrics = EvaluationMetrics::compute(&y_test, &predictions, x_train.len());
    info!(
        r2 = metrics.r2,
        mae = metrics.mae,
        rmse = metrics.rmse,
        test_rows = metrics.test_rows,
        "model evaluated"
    );

    Ok(TrainedForecaster {
        encoder,
        model,
        metrics,
    })
}

/// Historical rows first, tagged `historical`, then forecast rows tagged
/// `forecast`.
pub fn merge(history: &[HistoricalRecord], forecasts: &[ForecastRecord]) -> Vec<CombinedRecord> {
    history
        .iter()
        .map(CombinedRecord::historical)
        .chain(forecasts.iter().map(CombinedRecord::forecast))
        .collect()
}

/// Everything the forecast pipeline produces.
#[derive(Debug, Clone)]
pub struct ForecastOutcome {
    pub metrics: EvaluationMetrics,
    pub accounts: usize,
    pub kpis: usize,
    pub forecasts: Vec<ForecastRecord>,
    pub combined: Vec<CombinedRecord>,
}

pub fn run_forecast(
    history: &[HistoricalRecord],
    options: &ForecastOptions,
) -> Result<ForecastOutcome> {
    run_forecast_with_progress(history, options, |_| {})
}

pub fn run_forecast_with_progress<P>(
    history: &[HistoricalRecord],
    options: &ForecastOptions,
    on_tree: P,
) -> Result<ForecastOutcome>
where
    P: FnMut(usize),
{
    let span = info_span!("forecast", rows = history.len());
    let _guard = span.enter();
    let start = Instant::now();

    let trained = train(history, options, on_tree)?;
    let forecasts = info_span!("predict").in_scope(|| trained.forecast(history, options))?;
    let combined = merge(history, &forecasts);

    info!(
        historical_rows = history.len(),
        forecast_rows = forecasts.len(),
        combined_rows = combined.len(),
        duration_ms = start.elapsed().as_millis(),
        "forecast complete"
    );

    Ok(ForecastOutcome {
        metrics: *trained.metrics(),
        accounts: trained.encoder().accounts().len(),
        kpis: trained.encoder().names().len(),
        forecasts,
        combined,
    })
}
