//! Pairwise-complete Pearson correlation.

use kpi_model::CorrelationMatrix;

use crate::pivot::KpiMatrix;

/// Pearson coefficient over the positions where both series have a value.
///
/// Returns `None` when fewer than `min_periods` positions overlap or when
/// either overlapping series has zero variance. The result is clamped to
/// `[-1, 1]`.
pub fn pearson(x: &[Option<f64>], y: &[Option<f64>], min_periods: usize) -> Option<f64> {
    let pairs: Vec<(f64, f64)> = x
        .iter()
        .zip(y)
        .filter_map(|(a, b)| Some(((*a)?, (*b)?)))
        .collect();
    let n = pairs.len();
    if n == 0 || n < min_periods {
        return None;
    }

    let x_mean = pairs.iter().map(|(a, _)| a).sum::<f64>() / n as f64;
    let y_mean = pairs.iter().map(|(_, b)| b).sum::<f64>() / n as f64;

    let mut cov_sum = 0.0;
    let mut x_var_sum = 0.0;
    let mut y_var_sum = 0.0;
    for &(xi, yi) in &pairs {
        let x_diff = xi - x_mean;
        let y_diff = yi - y_mean;
        cov_sum += x_diff * y_diff;
        x_var_sum += x_diff * x_diff;
        y_var_sum += y_diff * y_diff;
    }

    let divisor = (x_var_sum * y_var_sum).sqrt();
    if divisor == 0.0 || !divisor.is_finite() {
        return None;
    }
    Some((cov_sum / divisor).clamp(-1.0, 1.0))
}

/// Correlate every pair of KPI columns, diagonal included.
///
/// The result is symmetric and labelled in the matrix's KPI order.
pub fn correlate(matrix: &KpiMatrix, min_periods: usize) -> CorrelationMatrix {
    let kpis = matrix.kpis();
    let n = kpis.len();
    let columns: Vec<Vec<Option<f64>>> = (0..n).map(|kpi| matrix.column(kpi)).collect();

    let mut values = vec![None; n * n];
    for i in 0..n {
        for j in i..n {
            let value = pearson(&columns[i], &columns[j], min_periods);
            values[i * n + j] = value;
            values[j * n + i] = value;
        }
    }

    CorrelationMatrix::from_fn(kpis.to_vec(), |row, col| values[row * n + col])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn some(values: &[f64]) -> Vec<Option<f64>> {
        values.iter().copied().map(Some).collect()
    }

    #[test]
    fn perfectly_linear_series() {
        let x = some(&[1.0, 2.0, 3.0, 4.0]);
        let y = some(&[2.0, 4.0, 6.0, 8.0]);
        let z = some(&[4.0, 3.0, 2.0, 1.0]);
        assert!((pearson(&x, &y, 1).expect("defined") - 1.0).abs() < 1e-12);
        assert!((pearson(&x, &z, 1).expect("defined") + 1.0).abs() < 1e-12);
    }

    #[test]
    fn known_coefficient() {
        let x = some(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let y = some(&[2.0, 4.0, 5.0, 4.0, 5.0]);
        let r = pearson(&x, &y, 1).expect("defined");
        assert!((r - 0.774_596_669_241_483_4).abs() < 1e-12);
    }

    #[test]
    fn uses_only_overlapping_rows() {
        let x = vec![Some(1.0), Some(2.0), None, Some(4.0), Some(100.0)];
        let y = vec![Some(1.0), Some(2.0), Some(50.0), Some(4.0), None];
        let r = pearson(&x, &y, 1).expect("defined");
        assert!((r - 1.0).abs() < 1e-12);
    }

    #[test]
    fn undefined_cases() {
        let constant = some(&[3.0, 3.0, 3.0]);
        let varying = some(&[1.0, 2.0, 3.0]);
        assert_eq!(pearson(&constant, &varying, 1), None);
        assert_eq!(pearson(&[Some(1.0)], &[Some(2.0)], 1), None);
        assert_eq!(pearson(&[None, Some(1.0)], &[Some(1.0), None], 1), None);
        assert_eq!(pearson(&varying, &varying, 4), None);
    }
}
