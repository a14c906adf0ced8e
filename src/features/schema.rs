// ============================================================
// Layer 5 — Column Schema
// ============================================================
// The canonical, ordered list of feature column names, fixed
// once at training time. Kept as an explicit Vec — never an
// implicit map iteration order — so reindexing is deterministic
// across processes.
//
// Reindexing is the alignment step the whole pipeline hinges
// on: a batch's computed columns are matched to this schema,
// missing columns are zero-filled, extra columns are dropped,
// and the output order is exactly the schema order.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// The ordered feature column names established at training time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSchema {
    columns: Vec<String>,
}

impl ColumnSchema {
    pub fn new(columns: Vec<String>) -> Self {
        Self { columns }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Feature width — every vector fed to the model has
    /// exactly this many entries.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// SHA-256 over the ordered column names, hex-encoded.
    /// Both persisted artifacts embed this value; loading
    /// refuses a model/vocabulary pair whose fingerprints
    /// disagree.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        for column in &self.columns {
            hasher.update(column.as_bytes());
            // Unit separator keeps ["ab","c"] distinct from ["a","bc"]
            hasher.update([0x1f]);
        }
        hex::encode(hasher.finalize())
    }

    /// Align a batch's computed columns to this schema.
    ///
    /// `columns` and `values` are parallel. Any schema column
    /// absent from the batch becomes 0.0; any batch column not
    /// in the schema is dropped. Output order is schema order.
    pub fn reindex(&self, columns: &[String], values: &[f64]) -> Vec<f64> {
        let by_name: HashMap<&str, f64> = columns
            .iter()
            .map(String::as_str)
            .zip(values.iter().copied())
            .collect();

        self.columns
            .iter()
            .map(|column| by_name.get(column.as_str()).copied().unwrap_or(0.0))
            .collect()
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn schema(names: &[&str]) -> ColumnSchema {
        ColumnSchema::new(names.iter().map(|n| n.to_string()).collect())
    }

    #[test]
    fn test_reindex_zero_fills_missing_columns() {
        let s = schema(&["rating", "price_tier_normal", "book"]);
        let out = s.reindex(&["rating".to_string()], &[4.0]);
        assert_eq!(out, [4.0, 0.0, 0.0]);
    }

    #[test]
    fn test_reindex_drops_extra_columns() {
        let s = schema(&["rating"]);
        let out = s.reindex(
            &["stray".to_string(), "rating".to_string()],
            &[9.9, 2.0],
        );
        assert_eq!(out, [2.0]);
    }

    #[test]
    fn test_reindex_output_follows_schema_order() {
        let s = schema(&["b", "a"]);
        let out = s.reindex(&["a".to_string(), "b".to_string()], &[1.0, 2.0]);
        assert_eq!(out, [2.0, 1.0]);
    }

    #[test]
    fn test_fingerprint_is_stable_and_order_sensitive() {
        let a = schema(&["rating", "book"]);
        let b = schema(&["rating", "book"]);
        let c = schema(&["book", "rating"]);
        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_ne!(a.fingerprint(), c.fingerprint());
    }

    #[test]
    fn test_fingerprint_resists_boundary_shifts() {
        let a = schema(&["ab", "c"]);
        let b = schema(&["a", "bc"]);
        assert_ne!(a.fingerprint(), b.fingerprint());
    }
}
