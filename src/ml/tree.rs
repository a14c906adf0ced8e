// ============================================================
// Layer 6 — Regression Tree
// ============================================================
// A binary tree grown top-down: at each node, pick the
// (feature, threshold) pair that minimises the summed squared
// error of the two children, recurse until the depth cap or a
// too-small sample set, and store the mean target as the leaf
// value.
//
// Split search per feature sorts the node's samples once and
// scans all candidate thresholds with running prefix sums, so
// evaluating every split of one feature costs O(n log n).

use std::cmp::Ordering;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

/// Growth limits for one tree.
#[derive(Debug, Clone, Copy)]
pub struct TreeParams {
    pub max_depth:         usize,
    pub min_samples_split: usize,
    /// Number of randomly chosen features considered per split.
    pub feature_subset:    usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
enum Node {
    Leaf {
        value: f64,
    },
    Split {
        feature:   usize,
        threshold: f64,
        left:      Box<Node>,
        right:     Box<Node>,
    },
}

/// A fitted regression tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionTree {
    root: Node,
}

impl RegressionTree {
    /// Grow a tree over the samples selected by `indices`
    /// (duplicates allowed — that's how bootstrap resampling
    /// arrives here).
    pub fn fit(
        rows:    &[Vec<f64>],
        targets: &[f64],
        indices: &[usize],
        params:  TreeParams,
        rng:     &mut StdRng,
    ) -> Self {
        Self {
            root: grow(rows, targets, indices, 0, params, rng),
        }
    }

    /// Walk the tree for one feature row.
    pub fn predict(&self, features: &[f64]) -> f64 {
        let mut node = &self.root;
        loop {
            match node {
                Node::Leaf { value } => return *value,
                Node::Split { feature, threshold, left, right } => {
                    let v = features.get(*feature).copied().unwrap_or(0.0);
                    node = if v <= *threshold { left } else { right };
                }
            }
        }
    }
}

fn grow(
    rows:    &[Vec<f64>],
    targets: &[f64],
    indices: &[usize],
    depth:   usize,
    params:  TreeParams,
    rng:     &mut StdRng,
) -> Node {
    let leaf_value = mean(targets, indices);

    if depth >= params.max_depth || indices.len() < params.min_samples_split {
        return Node::Leaf { value: leaf_value };
    }

    let Some((feature, threshold)) = best_split(rows, targets, indices, params, rng) else {
        // No feature separates these samples
        return Node::Leaf { value: leaf_value };
    };

    let (left_idx, right_idx): (Vec<usize>, Vec<usize>) = indices
        .iter()
        .copied()
        .partition(|&i| rows[i][feature] <= threshold);

    Node::Split {
        feature,
        threshold,
        left:  Box::new(grow(rows, targets, &left_idx, depth + 1, params, rng)),
        right: Box::new(grow(rows, targets, &right_idx, depth + 1, params, rng)),
    }
}

/// Find the (feature, threshold) minimising child SSE over a
/// random subset of features. None when every candidate feature
/// is constant within this node.
fn best_split(
    rows:    &[Vec<f64>],
    targets: &[f64],
    indices: &[usize],
    params:  TreeParams,
    rng:     &mut StdRng,
) -> Option<(usize, f64)> {
    let n_features = rows.first().map_or(0, Vec::len);
    if n_features == 0 {
        return None;
    }

    // Sample the feature subset for this split
    let mut features: Vec<usize> = (0..n_features).collect();
    features.shuffle(rng);
    features.truncate(params.feature_subset.clamp(1, n_features));

    let mut best: Option<(usize, f64)> = None;
    let mut best_sse = f64::INFINITY;

    for &feature in &features {
        // Sort this node's samples by feature value once, then
        // scan every threshold with running sums.
        let mut pairs: Vec<(f64, f64)> = indices
            .iter()
            .map(|&i| (rows[i][feature], targets[i]))
            .collect();
        pairs.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));

        let n = pairs.len() as f64;
        let total_sum: f64 = pairs.iter().map(|p| p.1).sum();
        let total_sq:  f64 = pairs.iter().map(|p| p.1 * p.1).sum();

        let mut left_sum = 0.0;
        let mut left_sq  = 0.0;

        for k in 0..pairs.len().saturating_sub(1) {
            left_sum += pairs[k].1;
            left_sq  += pairs[k].1 * pairs[k].1;

            // Only split between distinct feature values
            if pairs[k].0 == pairs[k + 1].0 {
                continue;
            }

            let n_left  = (k + 1) as f64;
            let n_right = n - n_left;
            let right_sum = total_sum - left_sum;
            let right_sq  = total_sq - left_sq;

            // SSE = Σy² - (Σy)²/n, per child
            let sse = (left_sq - left_sum * left_sum / n_left)
                + (right_sq - right_sum * right_sum / n_right);

            if sse < best_sse {
                best_sse = sse;
                best     = Some((feature, (pairs[k].0 + pairs[k + 1].0) / 2.0));
            }
        }
    }

    best
}

fn mean(targets: &[f64], indices: &[usize]) -> f64 {
    if indices.is_empty() {
        return 0.0;
    }
    indices.iter().map(|&i| targets[i]).sum::<f64>() / indices.len() as f64
}
