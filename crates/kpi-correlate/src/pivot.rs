//! Long rows to a month × KPI matrix.

use std::collections::{BTreeMap, BTreeSet};

use kpi_model::{CombinedRecord, YearMonth};

use crate::error::{CorrelateError, Result};

/// Wide matrix: one row per month (chronological), one column per KPI
/// (lexicographic). A cell holds the sum of every value recorded for that
/// month and KPI, or `None` when nothing was recorded.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct KpiMatrix {
    periods: Vec<YearMonth>,
    kpis: Vec<String>,
    values: Vec<Option<f64>>,
}

impl KpiMatrix {
    /// Pivot `rows` into a matrix.
    ///
    /// Rows with an empty KPI name are ignored. A row whose value is missing
    /// still registers its month and KPI but adds nothing to the cell.
    ///
    /// # Errors
    ///
    /// [`CorrelateError::InvalidPeriod`] when a row's month is outside 1–12.
    pub fn pivot<'a, I>(rows: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a CombinedRecord>,
    {
        let mut periods = BTreeSet::new();
        let mut kpis = BTreeSet::new();
        let mut cells: BTreeMap<(YearMonth, &str), f64> = BTreeMap::new();

        for row in rows {
            if row.english_name.is_empty() {
                continue;
            }
            let period =
                YearMonth::new(row.year, row.month).map_err(|source| CorrelateError::InvalidPeriod {
                    kpi: row.english_name.clone(),
                    source,
                })?;
            periods.insert(period);
            kpis.insert(row.english_name.as_str());
            if let Some(value) = row.monthly_value {
                *cells.entry((period, row.english_name.as_str())).or_insert(0.0) += value;
            }
        }

        let periods: Vec<YearMonth> = periods.into_iter().collect();
        let kpis: Vec<String> = kpis.into_iter().map(str::to_string).collect();
        let mut values = Vec::with_capacity(periods.len() * kpis.len());
        for &period in &periods {
            for kpi in &kpis {
                values.push(cells.get(&(period, kpi.as_str())).copied());
            }
        }

        Ok(Self {
            periods,
            kpis,
            values,
        })
    }

    pub fn periods(&self) -> &[YearMonth] {
        &self.periods
    }

    pub fn kpis(&self) -> &[String] {
        &self.kpis
    }

    pub fn get(&self, period: usize, kpi: usize) -> Option<f64> {
        if period >= self.periods.len() || kpi >= self.kpis.len() {
            return None;
        }
        self.values[period * self.kpis.len() + kpi]
    }

    /// Cells of one KPI column in period order.
    pub fn column(&self, kpi: usize) -> Vec<Option<f64>> {
        (0..self.periods.len())
            .map(|period| self.get(period, kpi))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.kpis.is_empty()
    }

    /// Number of present cells.
    pub fn filled(&self) -> usize {
        self.values.iter().filter(|cell| cell.is_some()).count()
    }
}
