//! Correlation stages: filter, pivot, correlate, reshape.

use std::time::Instant;

use tracing::{debug, info, info_span, warn};

use kpi_model::{CombinedRecord, CorrelationEntry, CorrelationMatrix, CorrelationOptions};

use crate::error::Result;
use crate::filter::select_rows;
use crate::pearson::correlate;
use crate::pivot::KpiMatrix;
use crate::reshape::to_long;

/// Everything the correlation pipeline produces.
#[derive(Debug, Clone)]
pub struct CorrelationOutcome {
    /// Rows that survived the type filter.
    pub rows_used: usize,
    pub pivot: KpiMatrix,
    pub matrix: CorrelationMatrix,
    pub entries: Vec<CorrelationEntry>,
    /// Off-diagonal pairs (counted once) without a defined coefficient.
    pub undefined_pairs: usize,
}

pub fn run_correlation(
    records: &[CombinedRecord],
    has_type_column: bool,
    options: &CorrelationOptions,
) -> Result<CorrelationOutcome> {
    options.validate()?;
    let span = info_span!("correlate", rows = records.len());
    let _guard = span.enter();
    let start = Instant::now();

    let selected = select_rows(records, has_type_column, options.historical_only);
    debug!(
        selected = selected.len(),
        dropped = records.len() - selected.len(),
        historical_only = options.historical_only,
        has_type_column,
        "rows filtered"
    );
    let rows_used = selected.len();

    let pivot = info_span!("pivot").in_scope(|| KpiMatrix::pivot(selected))?;
    debug!(
        periods = pivot.periods().len(),
        kpis = pivot.kpis().len(),
        filled = pivot.filled(),
        "pivot built"
    );
    if pivot.is_empty() {
        warn!("no KPI values to correlate");
    }

    let matrix = correlate(&pivot, options.min_periods);
    let n = matrix.len();
    let undefined_pairs = (0..n)
        .flat_map(|row| (row + 1..n).map(move |col| (row, col)))
        .filter(|&(row, col)| matrix.get(row, col).is_none())
        .count();
    if undefined_pairs > 0 {
        warn!(
            pairs = undefined_pairs,
            min_periods = options.min_periods,
            "correlations undefined (too little overlap or zero variance)"
        );
    }
    for (idx, kpi) in matrix.labels().iter().enumerate() {
        if matrix.get(idx, idx).is_none() {
            debug!(kpi = %kpi, "KPI has no variance");
        }
    }

    let entries = to_long(&matrix);
    info!(
        kpis = n,
        periods = pivot.periods().len(),
        pairs = entries.len(),
        duration_ms = start.elapsed().as_millis(),
        "correlation complete"
    );

    Ok(CorrelationOutcome {
        rows_used,
        pivot,
        matrix,
        entries,
        undefined_pairs,
    })
}
