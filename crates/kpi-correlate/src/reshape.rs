use kpi_model::{CorrelationEntry, CorrelationMatrix};

/// Flatten the square matrix row by row, skipping the diagonal.
///
/// Both orientations of every pair are emitted; undefined coefficients stay
/// `None`.
pub fn to_long(matrix: &CorrelationMatrix) -> Vec<CorrelationEntry> {
    let labels = matrix.labels();
    let mut entries = Vec::with_capacity(labels.len() * labels.len().saturating_sub(1));
    for (row, kpi1) in labels.iter().enumerate() {
        for (col, kpi2) in labels.iter().enumerate() {
            if row == col {
                continue;
            }
            entries.push(CorrelationEntry {
                kpi1: kpi1.clone(),
                kpi2: kpi2.clone(),
                correlation: matrix.get(row, col),
            });
        }
    }
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_major_without_diagonal() {
        let labels = vec!["A".to_string(), "B".to_string(), "C".to_string()];
        let matrix = CorrelationMatrix::from_fn(labels, |row, col| {
            (row != 2 && col != 2).then_some(if row == col { 1.0 } else { 0.5 })
        });
        let entries = to_long(&matrix);
        let pairs: Vec<(&str, &str)> = entries
            .iter()
            .map(|entry| (entry.kpi1.as_str(), entry.kpi2.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("A", "B"),
                ("A", "C"),
                ("B", "A"),
                ("B", "C"),
                ("C", "A"),
                ("C", "B"),
            ]
        );
        assert_eq!(entries[0].correlation, Some(0.5));
        assert_eq!(entries[1].correlation, None);
    }

    #[test]
    fn single_kpi_has_no_pairs() {
        let matrix = CorrelationMatrix::from_fn(vec!["A".to_string()], |_, _| Some(1.0));
        assert!(to_long(&matrix).is_empty());
    }
}
