//! Numeric feature rows built from encoded records.

use kpi_model::HistoricalRecord;

use crate::encoder::CategoricalEncoder;
use crate::error::Result;

pub const N_FEATURES: usize = 4;

/// Feature order of every row handed to the model.
pub const FEATURE_NAMES: [&str; N_FEATURES] = ["account_code", "name_code", "year", "month"];

pub type FeatureRow = [f64; N_FEATURES];

/// A historical record with its categorical codes attached.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedRecord {
    pub record: HistoricalRecord,
    pub account_code: usize,
    pub name_code: usize,
}

impl EncodedRecord {
    pub fn features(&self) -> FeatureRow {
        feature_row(
            self.account_code,
            self.name_code,
            self.record.year,
            self.record.month,
        )
    }
}

pub fn feature_row(account_code: usize, name_code: usize, year: i32, month: u32) -> FeatureRow {
    [
        account_code as f64,
        name_code as f64,
        f64::from(year),
        f64::from(month),
    ]
}

/// Account and KPI encoders fitted once on the full historical set.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureEncoder {
    accounts: CategoricalEncoder,
    names: CategoricalEncoder,
}

impl FeatureEncoder {
    pub fn fit(records: &[HistoricalRecord]) -> Self {
        Self {
            accounts: CategoricalEncoder::fit(
                "account_id",
                records.iter().map(|record| record.account_id.as_str()),
            ),
            names: CategoricalEncoder::fit(
                "english_name",
                records.iter().map(|record| record.english_name.as_str()),
            ),
        }
    }

    pub fn accounts(&self) -> &CategoricalEncoder {
        &self.accounts
    }

    pub fn names(&self) -> &CategoricalEncoder {
        &self.names
    }

    pub fn encode(&self, record: &HistoricalRecord) -> Result<EncodedRecord> {
        Ok(EncodedRecord {
            account_code: self.accounts.encode(&record.account_id)?,
            name_code: self.names.encode(&record.english_name)?,
            record: record.clone(),
        })
    }

    pub fn encode_all(&self, records: &[HistoricalRecord]) -> Result<Vec<EncodedRecord>> {
        records.iter().map(|record| self.encode(record)).collect()
    }

    /// Feature row for an arbitrary (account, KPI, period) key.
    pub fn features_for(
        &self,
        account_id: &str,
        english_name: &str,
        year: i32,
        month: u32,
    ) -> Result<FeatureRow> {
        Ok(feature_row(
            self.accounts.encode(account_id)?,
            self.names.encode(english_name)?,
            year,
            month,
        ))
    }
}
