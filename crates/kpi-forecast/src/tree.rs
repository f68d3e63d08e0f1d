//! CART regression trees minimizing squared error.

/// Growth limits for a single tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeParams {
    /// Depth limit; `None` grows until leaves are pure.
    pub max_depth: Option<usize>,
    /// Minimum samples a node needs before it may be split.
    pub min_samples_split: usize,
    /// Minimum samples on each side of a split.
    pub min_samples_leaf: usize,
}

impl Default for TreeParams {
    fn default() -> Self {
        Self {
            max_depth: None,
            min_samples_split: 2,
            min_samples_leaf: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Leaf {
    /// Mean target of the training samples that reached this leaf.
    pub value: f64,
    pub n_samples: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SplitNode {
    pub feature: usize,
    /// Samples with `x[feature] <= threshold` go left.
    pub threshold: f64,
    pub left: Box<TreeNode>,
    pub right: Box<TreeNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TreeNode {
    Split(SplitNode),
    Leaf(Leaf),
}

impl TreeNode {
    pub fn depth(&self) -> usize {
        match self {
            TreeNode::Leaf(_) => 0,
            TreeNode::Split(node) => 1 + node.left.depth().max(node.right.depth()),
        }
    }

    pub fn n_leaves(&self) -> usize {
        match self {
            TreeNode::Leaf(_) => 1,
            TreeNode::Split(node) => node.left.n_leaves() + node.right.n_leaves(),
        }
    }
}

/// A fitted regression tree.
#[derive(Debug, Clone, PartialEq)]
pub struct RegressionTree {
    root: TreeNode,
}

struct BestSplit {
    feature: usize,
    threshold: f64,
    score: f64,
}

impl RegressionTree {
    /// Fit on the rows of `x` named by `samples`.
    ///
    /// `samples` may repeat indices (bootstrap draws); each occurrence
    /// counts as one sample.
    pub fn fit<const F: usize>(
        x: &[[f64; F]],
        y: &[f64],
        samples: &[usize],
        params: &TreeParams,
    ) -> Self {
        let mut samples = samples.to_vec();
        let root = build_node(x, y, &mut samples, 0, params);
        Self { root }
    }

    pub fn predict_one(&self, row: &[f64]) -> f64 {
        let mut node = &self.root;
        loop {
            match node {
                TreeNode::Leaf(leaf) => return leaf.value,
                TreeNode::Split(split) => {
                    node = if row[split.feature] <= split.threshold {
                        &split.left
                    } else {
                        &split.right
                    };
                }
            }
        }
    }

    pub fn root(&self) -> &TreeNode {
        &self.root
    }

    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    pub fn n_leaves(&self) -> usize {
        self.root.n_leaves()
    }
}

fn make_leaf(y: &[f64], samples: &[usize]) -> TreeNode {
    let n = samples.len();
    let sum: f64 = samples.iter().map(|&i| y[i]).sum();
    TreeNode::Leaf(Leaf {
        // An empty node only arises from an empty fit; predict zero.
        value: if n == 0 { 0.0 } else { sum / n as f64 },
        n_samples: n,
    })
}

/// Mean squared deviation of the targets in `samples`.
fn impurity(y: &[f64], samples: &[usize]) -> f64 {
    let n = samples.len() as f64;
    let mean = samples.iter().map(|&i| y[i]).sum::<f64>() / n;
    samples.iter().map(|&i| (y[i] - mean).powi(2)).sum::<f64>() / n
}

fn build_node<const F: usize>(
    x: &[[f64; F]],
    y: &[f64],
    samples: &mut [usize],
    depth: usize,
    params: &TreeParams,
) -> TreeNode {
    let n = samples.len();
    if n < params.min_samples_split.max(2)
        || n < 2 * params.min_samples_leaf.max(1)
        || params.max_depth.is_some_and(|max| depth >= max)
        || impurity(y, samples) <= f64::EPSILON
    {
        return make_leaf(y, samples);
    }

    let Some(best) = find_best_split(x, y, samples, params.min_samples_leaf.max(1)) else {
        return make_leaf(y, samples);
    };

    // Partition in place: left block first.
    let mut boundary = 0;
    for i in 0..n {
        if x[samples[i]][best.feature] <= best.threshold {
            samples.swap(i, boundary);
            boundary += 1;
        }
    }
    let (left_samples, right_samples) = samples.split_at_mut(boundary);

    let left = build_node(x, y, left_samples, depth + 1, params);
    let right = build_node(x, y, right_samples, depth + 1, params);
    TreeNode::Split(SplitNode {
        feature: best.feature,
        threshold: best.threshold,
        left: Box::new(left),
        right: Box::new(right),
    })
}

/// Scan every feature for the threshold maximizing `sum_l²/n_l + sum_r²/n_r`,
/// which is equivalent to minimizing the children's summed squared error.
/// Thresholds sit halfway between adjacent distinct values.
fn find_best_split<const F: usize>(
    x: &[[f64; F]],
    y: &[f64],
    samples: &[usize],
    min_samples_leaf: usize,
) -> Option<BestSplit> {
    let n = samples.len();
    let total: f64 = samples.iter().map(|&i| y[i]).sum();
    let mut order: Vec<usize> = samples.to_vec();
    let mut best: Option<BestSplit> = None;

    for feature in 0..F {
        order.sort_by(|&a, &b| x[a][feature].total_cmp(&x[b][feature]));

        let mut left_sum = 0.0;
        for pos in 0..n - 1 {
            left_sum += y[order[pos]];
            let n_left = pos + 1;
            let n_right = n - n_left;
            if n_left < min_samples_leaf || n_right < min_samples_leaf {
                continue;
            }
            let lo = x[order[pos]][feature];
            let hi = x[order[pos + 1]][feature];
            if lo >= hi {
                continue;
            }

            let right_sum = total - left_sum;
            let score =
                left_sum * left_sum / n_left as f64 + right_sum * right_sum / n_right as f64;
            if best.as_ref().is_none_or(|current| score > current.score) {
                let mut threshold = lo + (hi - lo) / 2.0;
                if threshold >= hi {
                    threshold = lo;
                }
                best = Some(BestSplit {
                    feature,
                    threshold,
                    score,
                });
            }
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all(n: usize) -> Vec<usize> {
        (0..n).collect()
    }

    #[test]
    fn constant_target_is_a_single_leaf() {
        let x = [[1.0], [2.0], [3.0]];
        let y = [5.0, 5.0, 5.0];
        let tree = RegressionTree::fit(&x, &y, &all(3), &TreeParams::default());
        assert_eq!(tree.depth(), 0);
        assert_eq!(tree.predict_one(&[10.0]), 5.0);
    }

    #[test]
    fn unlimited_depth_interpolates_training_data() {
        let x = [[1.0, 0.0], [2.0, 0.0], [3.0, 1.0], [4.0, 1.0]];
        let y = [1.0, 4.0, 9.0, 16.0];
        let tree = RegressionTree::fit(&x, &y, &all(4), &TreeParams::default());
        for (row, target) in x.iter().zip(y) {
            assert_eq!(tree.predict_one(row), target);
        }
        assert_eq!(tree.n_leaves(), 4);
    }

    #[test]
    fn split_threshold_is_the_midpoint() {
        let x = [[0.0], [10.0]];
        let y = [1.0, 3.0];
        let tree = RegressionTree::fit(&x, &y, &all(2), &TreeParams::default());
        match tree.root() {
            TreeNode::Split(split) => {
                assert_eq!(split.feature, 0);
                assert_eq!(split.threshold, 5.0);
            }
            TreeNode::Leaf(_) => panic!("expected a split"),
        }
    }

    #[test]
    fn depth_limit_is_respected() {
        let x = [[1.0], [2.0], [3.0], [4.0]];
        let y = [1.0, 2.0, 3.0, 4.0];
        let params = TreeParams {
            max_depth: Some(1),
            ..TreeParams::default()
        };
        let tree = RegressionTree::fit(&x, &y, &all(4), &params);
        assert_eq!(tree.depth(), 1);
        assert_eq!(tree.predict_one(&[1.0]), 1.5);
        assert_eq!(tree.predict_one(&[4.0]), 3.5);
    }

    #[test]
    fn duplicate_samples_weigh_the_leaf_mean() {
        let x = [[1.0], [1.0]];
        let y = [2.0, 8.0];
        // Identical features cannot be split; the leaf averages all draws.
        let tree = RegressionTree::fit(&x, &y, &[0, 0, 1], &TreeParams::default());
        assert_eq!(tree.predict_one(&[1.0]), 4.0);
    }
}
