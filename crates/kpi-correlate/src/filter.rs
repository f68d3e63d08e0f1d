use kpi_model::CombinedRecord;

/// Rows that feed the pivot.
///
/// With `historical_only` set and a `type` column present, only rows typed
/// `historical` survive (rows with a blank or unrecognized type are
/// dropped). Without a `type` column every row is kept.
pub fn select_rows(
    records: &[CombinedRecord],
    has_type_column: bool,
    historical_only: bool,
) -> Vec<&CombinedRecord> {
    if historical_only && has_type_column {
        records.iter().filter(|record| record.is_historical()).collect()
    } else {
        records.iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use kpi_model::RecordKind;

    use super::*;

    fn row(kind: Option<RecordKind>) -> CombinedRecord {
        CombinedRecord {
            account_id: "A".to_string(),
            english_name: "Revenue".to_string(),
            year: 2024,
            month: 1,
            monthly_value: Some(1.0),
            kind,
        }
    }

    #[test]
    fn keeps_only_historical_rows_when_typed() {
        let rows = [
            row(Some(RecordKind::Historical)),
            row(Some(RecordKind::Forecast)),
            row(None),
        ];
        assert_eq!(select_rows(&rows, true, true).len(), 1);
        assert_eq!(select_rows(&rows, true, false).len(), 3);
    }

    #[test]
    fn untyped_input_is_not_filtered() {
        let rows = [row(None), row(None)];
        assert_eq!(select_rows(&rows, false, true).len(), 2);
    }
}
