use std::collections::{HashMap, HashSet};

use kpi_model::HistoricalRecord;

/// A future (account, KPI, period) key awaiting a prediction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FutureRow {
    pub account_id: String,
    pub english_name: String,
    pub year: i32,
    pub month: u32,
}

/// (account, KPI) pairs that co-occur in `records`.
///
/// Accounts come in order of first appearance, and each account's KPIs in
/// their order of first appearance for that account.
pub fn observed_pairs(records: &[HistoricalRecord]) -> Vec<(String, String)> {
    let mut accounts: Vec<(&str, Vec<&str>)> = Vec::new();
    let mut account_index: HashMap<&str, usize> = HashMap::new();
    let mut seen: HashSet<(&str, &str)> = HashSet::new();

    for record in records {
        let account = record.account_id.as_str();
        let name = record.english_name.as_str();
        let slot = *account_index.entry(account).or_insert_with(|| {
            accounts.push((account, Vec::new()));
            accounts.len() - 1
        });
        if seen.insert((account, name)) {
            accounts[slot].1.push(name);
        }
    }

    accounts
        .into_iter()
        .flat_map(|(account, names)| {
            names
                .into_iter()
                .map(move |name| (account.to_string(), name.to_string()))
        })
        .collect()
}

/// One row per observed pair per future month, months in the given order.
pub fn expand_future(records: &[HistoricalRecord], year: i32, months: &[u32]) -> Vec<FutureRow> {
    observed_pairs(records)
        .into_iter()
        .flat_map(|(account_id, english_name)| {
            months.iter().map(move |&month| FutureRow {
                account_id: account_id.clone(),
                english_name: english_name.clone(),
                year,
                month,
            })
        })
        .collect()
}
