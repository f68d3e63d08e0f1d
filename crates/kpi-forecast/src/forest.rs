use rand::SeedableRng;
use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use tracing::debug;

use crate::error::{ForecastError, Result};
use crate::tree::{RegressionTree, TreeParams};

/// Hyper-parameters of the ensemble.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForestParams {
    pub n_estimators: usize,
    pub tree: TreeParams,
    /// Tree `i` draws its bootstrap sample from `seed + i`.
    pub seed: u64,
}

impl Default for ForestParams {
    fn default() -> Self {
        Self {
            n_estimators: 200,
            tree: TreeParams::default(),
            seed: 42,
        }
    }
}

/// Bagged regression trees; predictions are the mean over all trees.
#[derive(Debug, Clone, PartialEq)]
pub struct RandomForestRegressor {
    trees: Vec<RegressionTree>,
}

impl RandomForestRegressor {
    pub fn fit<const F: usize>(x: &[[f64; F]], y: &[f64], params: &ForestParams) -> Result<Self> {
        Self::fit_with_progress(x, y, params, |_| {})
    }

    /// Like [`fit`](Self::fit), calling `on_tree` with the number of trees
    /// fitted so far after each one completes.
    pub fn fit_with_progress<const F: usize, P>(
        x: &[[f64; F]],
        y: &[f64],
        params: &ForestParams,
        mut on_tree: P,
    ) -> Result<Self>
    where
        P: FnMut(usize),
    {
        if x.is_empty() || x.len() != y.len() {
            return Err(ForecastError::InsufficientData { rows: x.len() });
        }

        let mut trees = Vec::with_capacity(params.n_estimators);
        for index in 0..params.n_estimators {
            let samples = bootstrap_sample(x.len(), params.seed.wrapping_add(index as u64));
            let tree = RegressionTree::fit(x, y, &samples, &params.tree);
            debug!(
                tree = index,
                depth = tree.depth(),
                leaves = tree.n_leaves(),
                "tree fitted"
            );
            trees.push(tree);
            on_tree(index + 1);
        }
        Ok(Self { trees })
    }

    pub fn predict_one(&self, row: &[f64]) -> f64 {
        if self.trees.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.trees.iter().map(|tree| tree.predict_one(row)).sum();
        sum / self.trees.len() as f64
    }

    pub fn predict<const F: usize>(&self, rows: &[[f64; F]]) -> Vec<f64> {
        rows.iter().map(|row| self.predict_one(row)).collect()
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    pub fn trees(&self) -> &[RegressionTree] {
        &self.trees
    }
}

/// Draw `n_samples` indices with replacement.
fn bootstrap_sample(n_samples: usize, seed: u64) -> Vec<usize> {
    let dist = Uniform::from(0..n_samples);
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n_samples).map(|_| dist.sample(&mut rng)).collect()
}
