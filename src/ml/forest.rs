// ============================================================
// Layer 6 — Forest Regressor
// ============================================================
// Bootstrap aggregation over regression trees: every tree fits
// a with-replacement resample of the training set and considers
// a random third of the features at each split; the forest
// prediction is the mean of the tree predictions.
//
// Reproducibility is a hard requirement: ALL randomness
// (bootstrap draws and per-split feature subsets) flows from
// one StdRng seeded with the configured value, so identical
// input data + seed yields an identical model. Feature
// building, by contrast, must never touch this RNG.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::domain::error::PredictorError;
use crate::features::builder::FeatureTable;
use crate::ml::tree::{RegressionTree, TreeParams};

/// Hyperparameters for one training run.
#[derive(Debug, Clone, Copy)]
pub struct ForestConfig {
    pub n_trees:           usize,
    pub max_depth:         usize,
    pub min_samples_split: usize,
    pub seed:              u64,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            n_trees:           100,
            max_depth:         16,
            min_samples_split: 2,
            seed:              42,
        }
    }
}

/// A fitted forest. Immutable after fit; carries the schema
/// fingerprint of the feature table it was trained against so
/// loading can refuse a mismatched vocabulary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForestModel {
    trees:              Vec<RegressionTree>,
    n_features:         usize,
    schema_fingerprint: String,
}

impl ForestModel {
    /// Fit a forest against a feature table and its targets.
    ///
    /// Fails with [`PredictorError::InvalidTrainingSet`] when
    /// the table is empty, the targets don't line up, or the
    /// configuration asks for zero trees.
    pub fn fit(
        config:             &ForestConfig,
        table:              &FeatureTable,
        targets:            &[f64],
        schema_fingerprint: String,
    ) -> Result<Self, PredictorError> {
        if table.rows.is_empty() {
            return Err(PredictorError::InvalidTrainingSet {
                reason: "no training rows".to_string(),
            });
        }
        if table.rows.len() != targets.len() {
            return Err(PredictorError::InvalidTrainingSet {
                reason: format!(
                    "{} feature rows but {} targets",
                    table.rows.len(),
                    targets.len()
                ),
            });
        }
        if config.n_trees == 0 {
            return Err(PredictorError::InvalidTrainingSet {
                reason: "n_trees must be at least 1".to_string(),
            });
        }

        let n_samples  = table.rows.len();
        let n_features = table.columns.len();
        let params = TreeParams {
            max_depth:         config.max_depth,
            min_samples_split: config.min_samples_split,
            // Regression convention: a third of the features per split
            feature_subset:    (n_features / 3).max(1),
        };

        let mut rng   = StdRng::seed_from_u64(config.seed);
        let mut trees = Vec::with_capacity(config.n_trees);

        for _ in 0..config.n_trees {
            // Bootstrap: n draws with replacement
            let indices: Vec<usize> =
                (0..n_samples).map(|_| rng.gen_range(0..n_samples)).collect();
            trees.push(RegressionTree::fit(
                &table.rows,
                targets,
                &indices,
                params,
                &mut rng,
            ));
        }

        tracing::info!(
            "Forest fitted: {} trees over {} samples x {} features (seed {})",
            trees.len(),
            n_samples,
            n_features,
            config.seed
        );

        Ok(Self { trees, n_features, schema_fingerprint })
    }

    /// Mean prediction over all trees.
    pub fn predict(&self, features: &[f64]) -> f64 {
        let sum: f64 = self.trees.iter().map(|t| t.predict(features)).sum();
        sum / self.trees.len() as f64
    }

    /// Mean squared error of this model over a feature table.
    pub fn mean_squared_error(&self, table: &FeatureTable, targets: &[f64]) -> f64 {
        if table.rows.is_empty() {
            return 0.0;
        }
        let sse: f64 = table
            .rows
            .iter()
            .zip(targets)
            .map(|(row, &y)| {
                let e = self.predict(row) - y;
                e * e
            })
            .sum();
        sse / table.rows.len() as f64
    }

    /// Fingerprint of the column schema this model expects.
    pub fn schema_fingerprint(&self) -> &str {
        &self.schema_fingerprint
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }
}
