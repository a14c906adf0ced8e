// ============================================================
// Layer 2 — Train Use Case
// ============================================================
// Orchestrates the full training pipeline in order:
//
//   Step 1: Load the catalog CSV        (Layer 4 - data)
//   Step 2: Fit features + schema       (Layer 5 - features)
//   Step 3: Fit the seeded forest       (Layer 6 - ml)
//   Step 4: Measure training MSE        (Layer 6 - ml)
//   Step 5: Persist the matched pair    (Layer 7 - infra)
//   Step 6: Log the metrics row         (Layer 7 - infra)
//
// Training is a one-shot batch job with no partial-failure
// recovery: if any step fails, the whole run aborts and the
// artifact store's write ordering guarantees no loadable but
// unmatched pair is left behind.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::data::catalog_store::CatalogStore;
use crate::domain::error::PredictorError;
use crate::domain::traits::RecordSource;
use crate::features::builder::{FeatureBuilder, DEFAULT_MAX_VOCABULARY};
use crate::infra::artifact_store::ArtifactStore;
use crate::infra::metrics::{MetricsLogger, RunMetrics};
use crate::ml::forest::{ForestConfig, ForestModel};

// ─── Training Configuration ──────────────────────────────────────────────────
// All knobs for a training run. Serialisable so a run's exact
// configuration can be recorded alongside its artifacts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainConfig {
    pub catalog_path:   String,
    pub artifacts_dir:  String,
    pub max_vocabulary: usize,
    pub trees:          usize,
    pub max_depth:      usize,
    pub seed:           u64,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            catalog_path:   "data/catalog.csv".to_string(),
            artifacts_dir:  "artifacts".to_string(),
            max_vocabulary: DEFAULT_MAX_VOCABULARY,
            trees:          100,
            max_depth:      16,
            seed:           42,
        }
    }
}

// ─── TrainUseCase ─────────────────────────────────────────────────────────────
// Owns the config and runs the full training pipeline.
pub struct TrainUseCase {
    config: TrainConfig,
}

impl TrainUseCase {
    pub fn new(config: TrainConfig) -> Self {
        Self { config }
    }

    /// Execute the full training pipeline end to end.
    pub fn execute(&self) -> Result<()> {
        let cfg = &self.config;

        // ── Step 1: Load the catalog ──────────────────────────────────────────
        tracing::info!("Loading catalog from '{}'", cfg.catalog_path);
        let store   = CatalogStore::new(&cfg.catalog_path);
        let records = store.load_all()?;

        if records.is_empty() {
            return Err(PredictorError::InvalidTrainingSet {
                reason: format!("catalog '{}' contains no records", cfg.catalog_path),
            }
            .into());
        }
        tracing::info!("Loaded {} records", records.len());

        // ── Step 2: Fit features and freeze the schema ────────────────────────
        let builder = FeatureBuilder::new(cfg.max_vocabulary);
        let (table, vocab) = builder.fit_transform(&records)?;

        // ── Step 3: Fit the forest against the observed prices ────────────────
        let targets: Vec<f64> = records.iter().map(|r| r.price).collect();
        let forest_cfg = ForestConfig {
            n_trees:           cfg.trees,
            max_depth:         cfg.max_depth,
            min_samples_split: 2,
            seed:              cfg.seed,
        };
        let model = ForestModel::fit(&forest_cfg, &table, &targets, vocab.fingerprint())?;

        // ── Step 4: Training-set error, for the metrics log ───────────────────
        let train_mse = model.mean_squared_error(&table, &targets);
        tracing::info!("Training MSE: {:.4}", train_mse);

        // ── Step 5: Persist model + vocabulary as a matched pair ──────────────
        let artifacts = ArtifactStore::new(&cfg.artifacts_dir);
        artifacts.save_pair(&vocab, &model)?;

        // ── Step 6: Append the metrics row ────────────────────────────────────
        let logger = MetricsLogger::new(&cfg.artifacts_dir)?;
        logger.log(&RunMetrics {
            records:  records.len(),
            features: vocab.schema().len(),
            trees:    model.n_trees(),
            train_mse,
        })?;

        Ok(())
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::record::CatalogRecord;
    use std::io::Write;

    fn write_catalog(dir: &std::path::Path, records: &[CatalogRecord]) -> String {
        let path  = dir.join("catalog.csv");
        let store = CatalogStore::new(&path);
        store.save_all(records).unwrap();
        path.to_string_lossy().into_owned()
    }

    fn test_config(dir: &std::path::Path, catalog_path: String) -> TrainConfig {
        TrainConfig {
            catalog_path,
            artifacts_dir: dir.join("artifacts").to_string_lossy().into_owned(),
            trees: 10,
            ..TrainConfig::default()
        }
    }

    fn two_record_catalog() -> Vec<CatalogRecord> {
        vec![
            CatalogRecord::new("A Great Book", 50.0, 5.0),
            CatalogRecord::new("Plain Notes", 10.0, 2.0),
        ]
    }

    #[test]
    fn test_training_writes_the_artifact_pair() {
        let dir     = tempfile::tempdir().unwrap();
        let catalog = write_catalog(dir.path(), &two_record_catalog());

        TrainUseCase::new(test_config(dir.path(), catalog))
            .execute()
            .unwrap();

        let artifacts = dir.path().join("artifacts");
        assert!(artifacts.join("vocabulary.json").exists());
        assert!(artifacts.join("model.json").exists());
        assert!(artifacts.join("metrics.csv").exists());
    }

    #[test]
    fn test_empty_catalog_is_invalid_training_set() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.csv");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(f, "title,price,rating").unwrap();

        let err = TrainUseCase::new(test_config(
            dir.path(),
            path.to_string_lossy().into_owned(),
        ))
        .execute()
        .unwrap_err();

        let err = err.downcast::<PredictorError>().unwrap();
        assert!(matches!(err, PredictorError::InvalidTrainingSet { .. }));
    }

    #[test]
    fn test_identical_runs_produce_identical_artifacts() {
        // Same data + same seed ⇒ byte-identical artifacts.
        // Nothing in the pipeline may depend on hidden state.
        let dir_a = tempfile::tempdir().unwrap();
        let dir_b = tempfile::tempdir().unwrap();

        for dir in [&dir_a, &dir_b] {
            let catalog = write_catalog(dir.path(), &two_record_catalog());
            TrainUseCase::new(test_config(dir.path(), catalog))
                .execute()
                .unwrap();
        }

        for name in ["vocabulary.json", "model.json"] {
            let a = std::fs::read(dir_a.path().join("artifacts").join(name)).unwrap();
            let b = std::fs::read(dir_b.path().join("artifacts").join(name)).unwrap();
            assert_eq!(a, b, "{name} differs between identical runs");
        }
    }

    #[test]
    fn test_missing_catalog_fails() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = test_config(dir.path(), "does/not/exist.csv".to_string());
        assert!(TrainUseCase::new(cfg).execute().is_err());
    }
}
