//! Regression metrics for the held-out partition.

use serde::{Deserialize, Serialize};

/// Coefficient of determination.
///
/// When the targets have zero variance the score is 1.0 for a perfect fit
/// and 0.0 otherwise.
pub fn r_squared(y_true: &[f64], y_pred: &[f64]) -> f64 {
    debug_assert_eq!(y_true.len(), y_pred.len());
    if y_true.is_empty() {
        return 0.0;
    }
    let mean = y_true.iter().sum::<f64>() / y_true.len() as f64;
    let ss_res: f64 = y_true
        .iter()
        .zip(y_pred)
        .map(|(t, p)| (t - p).powi(2))
        .sum();
    let ss_tot: f64 = y_true.iter().map(|t| (t - mean).powi(2)).sum();
    if ss_tot == 0.0 {
        return if ss_res == 0.0 { 1.0 } else { 0.0 };
    }
    1.0 - ss_res / ss_tot
}

pub fn mean_absolute_error(y_true: &[f64], y_pred: &[f64]) -> f64 {
    debug_assert_eq!(y_true.len(), y_pred.len());
    if y_true.is_empty() {
        return 0.0;
    }
    let total: f64 = y_true.iter().zip(y_pred).map(|(t, p)| (t - p).abs()).sum();
    total / y_true.len() as f64
}

pub fn root_mean_squared_error(y_true: &[f64], y_pred: &[f64]) -> f64 {
    debug_assert_eq!(y_true.len(), y_pred.len());
    if y_true.is_empty() {
        return 0.0;
    }
    let total: f64 = y_true
        .iter()
        .zip(y_pred)
        .map(|(t, p)| (t - p).powi(2))
        .sum();
    (total / y_true.len() as f64).sqrt()
}

/// Scores of the fitted model on the test partition. Informational only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvaluationMetrics {
    pub r2: f64,
    pub mae: f64,
    pub rmse: f64,
    pub train_rows: usize,
    pub test_rows: usize,
}

impl EvaluationMetrics {
    pub fn compute(y_true: &[f64], y_pred: &[f64], train_rows: usize) -> Self {
        Self {
            r2: r_squared(y_true, y_pred),
            mae: mean_absolute_error(y_true, y_pred),
            rmse: root_mean_squared_error(y_true, y_pred),
            train_rows,
            test_rows: y_true.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perfect_predictions() {
        let y = [1.0, 2.0, 3.0];
        assert_eq!(r_squared(&y, &y), 1.0);
        assert_eq!(mean_absolute_error(&y, &y), 0.0);
        assert_eq!(root_mean_squared_error(&y, &y), 0.0);
    }

    #[test]
    fn known_values() {
        let y_true = [3.0, -0.5, 2.0, 7.0];
        let y_pred = [2.5, 0.0, 2.0, 8.0];
        assert!((r_squared(&y_true, &y_pred) - 0.948_608_137_044_967_9).abs() < 1e-12);
        assert_eq!(mean_absolute_error(&y_true, &y_pred), 0.5);
        assert!((root_mean_squared_error(&y_true, &y_pred) - 0.375_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn constant_targets() {
        assert_eq!(r_squared(&[2.0, 2.0], &[2.0, 2.0]), 1.0);
        assert_eq!(r_squared(&[2.0, 2.0], &[2.0, 3.0]), 0.0);
    }
}
