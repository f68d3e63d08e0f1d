use kpi_correlate::{KpiMatrix, correlate, to_long};
use kpi_model::{CombinedRecord, RecordKind};
use proptest::prelude::*;

fn record(name: String, month: u32, value: Option<f64>) -> CombinedRecord {
    CombinedRecord {
        account_id: "A".to_string(),
        english_name: name,
        year: 2024,
        month,
        monthly_value: value,
        kind: Some(RecordKind::Historical),
    }
}

fn rows_strategy() -> impl Strategy<Value = Vec<CombinedRecord>> {
    prop::collection::vec(
        (
            "[A-E]",
            1u32..=12,
            prop::option::weighted(0.8, -1000.0f64..1000.0),
        ),
        0..60,
    )
    .prop_map(|cells| {
        cells
            .into_iter()
            .map(|(name, month, value)| record(name, month, value))
            .collect()
    })
}

proptest! {
    #[test]
    fn correlations_are_symmetric_and_bounded(rows in rows_strategy()) {
        let pivot = KpiMatrix::pivot(&rows).expect("valid months");
        let matrix = correlate(&pivot, 1);
        for i in 0..matrix.len() {
            if let Some(diagonal) = matrix.get(i, i) {
                prop_assert!((diagonal - 1.0).abs() < 1e-9);
            }
            for j in 0..matrix.len() {
                prop_assert_eq!(matrix.get(i, j), matrix.get(j, i));
                if let Some(value) = matrix.get(i, j) {
                    prop_assert!((-1.0..=1.0).contains(&value));
                }
            }
        }
    }

    #[test]
    fn long_table_covers_every_ordered_pair_once(rows in rows_strategy()) {
        let pivot = KpiMatrix::pivot(&rows).expect("valid months");
        let matrix = correlate(&pivot, 1);
        let entries = to_long(&matrix);
        let n = matrix.len();
        prop_assert_eq!(entries.len(), n * n.saturating_sub(1));
        prop_assert!(entries.iter().all(|entry| entry.kpi1 != entry.kpi2));
    }
}
