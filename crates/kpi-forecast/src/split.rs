use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use kpi_model::KpiError;

use crate::error::{ForecastError, Result};

/// Row indices of the two partitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainTestSplit {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

/// Shuffle `0..n_rows` with a seeded RNG and hold out `ceil(n_rows * test_ratio)`
/// rows for testing. The same inputs always produce the same partition.
pub fn train_test_split(n_rows: usize, test_ratio: f64, seed: u64) -> Result<TrainTestSplit> {
    if !(test_ratio > 0.0 && test_ratio < 1.0) {
        return Err(ForecastError::Model(KpiError::InvalidOptions(format!(
            "test ratio must be between 0 and 1 (exclusive), got {test_ratio}"
        ))));
    }
    if n_rows < 2 {
        return Err(ForecastError::InsufficientData { rows: n_rows });
    }

    let n_test = (n_rows as f64 * test_ratio).ceil() as usize;
    let n_train = n_rows.saturating_sub(n_test);
    if n_test == 0 || n_train == 0 {
        return Err(ForecastError::EmptyPartition {
            train: n_train,
            test: n_test,
        });
    }

    let mut indices: Vec<usize> = (0..n_rows).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let train = indices.split_off(n_test);
    Ok(TrainTestSplit {
        train,
        test: indices,
    })
}
