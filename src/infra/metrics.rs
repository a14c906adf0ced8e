// ============================================================
// Layer 7 — Metrics Logger
// ============================================================
// Records one CSV row per training run.
//
// Metrics recorded per run:
//   - records:   number of catalog records trained on
//   - features:  feature width (= schema length)
//   - trees:     number of trees in the fitted forest
//   - train_mse: mean squared error of the forest on its own
//                training table
//
// Output file: artifacts/metrics.csv
//
// Example CSV output:
//   records,features,trees,train_mse
//   1000,53,100,12.481205
//
// train_mse on the training set is an optimistic number — it
// tracks regressions between runs, it does not estimate
// accuracy on unseen titles.
//
// Reference: Rust Book §12 (I/O and File Handling)

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// One row of metrics data for a single training run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunMetrics {
    pub records:   usize,
    pub features:  usize,
    pub trees:     usize,
    pub train_mse: f64,
}

/// Appends run metrics to a CSV file for later analysis.
pub struct MetricsLogger {
    csv_path: PathBuf,
}

impl MetricsLogger {
    /// Create a new MetricsLogger.
    /// Writes the CSV header if the file doesn't exist yet.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;

        let csv_path = dir.join("metrics.csv");
        if !csv_path.exists() {
            let mut f = fs::File::create(&csv_path)?;
            writeln!(f, "records,features,trees,train_mse")?;
            tracing::debug!("Created metrics CSV: '{}'", csv_path.display());
        }

        Ok(Self { csv_path })
    }

    /// Append one run's metrics as a new row.
    pub fn log(&self, m: &RunMetrics) -> Result<()> {
        let mut f = OpenOptions::new().append(true).open(&self.csv_path)?;

        writeln!(
            f,
            "{},{},{},{:.6}",
            m.records, m.features, m.trees, m.train_mse,
        )?;

        tracing::debug!(
            "Logged run metrics: {} records, {} features, train_mse={:.4}",
            m.records,
            m.features,
            m.train_mse,
        );
        Ok(())
    }

    pub fn csv_path(&self) -> &PathBuf {
        &self.csv_path
    }
}
