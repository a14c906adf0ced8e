// ============================================================
// Layer 4 — Catalog Store
// ============================================================
// Reads and writes the scraped catalog as a CSV file with a
// `title,price,rating` header.
//
// Reading is deliberately lenient: every field comes in as
// text, and malformed numeric values are corrected at this
// edge (price → 0.0, rating → the 3.0 sentinel) rather than
// raised as errors. A structurally broken row is skipped with
// a warning — one bad line must not sink a thousand good ones.
//
// Reference: Rust Book §9 (Error Handling)
//            csv crate documentation

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use csv::{ReaderBuilder, WriterBuilder};
use serde::Deserialize;

use crate::domain::record::{normalize_rating, CatalogRecord};
use crate::domain::traits::RecordSource;

/// One raw CSV row before normalization. Numeric fields are
/// read as optional text so bad values reach the leniency
/// rules instead of failing serde deserialization.
#[derive(Debug, Deserialize)]
struct CsvRow {
    title:  String,
    price:  Option<String>,
    rating: Option<String>,
}

/// The catalog CSV on disk. Implements [`RecordSource`] so the
/// training orchestrator never sees CSV details.
pub struct CatalogStore {
    path: PathBuf,
}

impl CatalogStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the full catalog, replacing any existing file.
    /// The header row comes from the CatalogRecord field names.
    pub fn save_all(&self, records: &[CatalogRecord]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Cannot create '{}'", parent.display()))?;
            }
        }

        let mut writer = WriterBuilder::new()
            .from_path(&self.path)
            .with_context(|| format!("Cannot write catalog '{}'", self.path.display()))?;

        for record in records {
            writer.serialize(record)?;
        }
        writer.flush()?;

        tracing::info!("Saved {} records to '{}'", records.len(), self.path.display());
        Ok(())
    }
}

impl RecordSource for CatalogStore {
    fn load_all(&self) -> Result<Vec<CatalogRecord>> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .from_path(&self.path)
            .with_context(|| {
                format!(
                    "Cannot read catalog '{}'. Have you run `scrape` first?",
                    self.path.display()
                )
            })?;

        let mut records = Vec::new();
        for row in reader.deserialize::<CsvRow>() {
            match row {
                Ok(row) => records.push(normalize_row(row)),
                // Skip structurally broken rows, keep the rest
                Err(e) => tracing::warn!("Skipping malformed catalog row: {e}"),
            }
        }

        tracing::info!("Loaded {} records from '{}'", records.len(), self.path.display());
        Ok(records)
    }
}

/// Apply the field-level leniency rules to one raw row.
fn normalize_row(row: CsvRow) -> CatalogRecord {
    let price = row
        .price
        .as_deref()
        .and_then(|p| p.trim().parse::<f64>().ok())
        .filter(|p| p.is_finite())
        .unwrap_or(0.0);

    CatalogRecord::new(row.title, price, normalize_rating(row.rating.as_deref()))
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::record::RATING_SENTINEL;
    use std::io::Write;

    #[test]
    fn test_round_trip_preserves_records() {
        let dir   = tempfile::tempdir().unwrap();
        let store = CatalogStore::new(dir.path().join("catalog.csv"));

        let records = vec![
            CatalogRecord::new("A Great Book", 50.0, 5.0),
            CatalogRecord::new("Plain Notes", 10.0, 2.0),
        ];
        store.save_all(&records).unwrap();

        let loaded = store.load_all().unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].title, "A Great Book");
        assert_eq!(loaded[0].price, 50.0);
        assert_eq!(loaded[1].rating, 2.0);
    }

    #[test]
    fn test_bad_rating_normalizes_to_sentinel() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.csv");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(f, "title,price,rating").unwrap();
        writeln!(f, "Odd Book,12.5,five stars").unwrap();
        writeln!(f, "No Rating,3.0,").unwrap();

        let loaded = CatalogStore::new(&path).load_all().unwrap();
        assert_eq!(loaded[0].rating, RATING_SENTINEL);
        assert_eq!(loaded[1].rating, RATING_SENTINEL);
    }

    #[test]
    fn test_bad_price_normalizes_to_zero() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.csv");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(f, "title,price,rating").unwrap();
        writeln!(f, "Odd Book,£12.50,4").unwrap();

        let loaded = CatalogStore::new(&path).load_all().unwrap();
        assert_eq!(loaded[0].price, 0.0);
        assert_eq!(loaded[0].rating, 4.0);
    }

    #[test]
    fn test_missing_catalog_is_an_error() {
        let dir   = tempfile::tempdir().unwrap();
        let store = CatalogStore::new(dir.path().join("nope.csv"));
        assert!(store.load_all().is_err());
    }

    #[test]
    fn test_titles_with_commas_round_trip() {
        let dir   = tempfile::tempdir().unwrap();
        let store = CatalogStore::new(dir.path().join("catalog.csv"));

        let records = vec![CatalogRecord::new("Magic, Myth, and More", 20.0, 4.0)];
        store.save_all(&records).unwrap();

        let loaded = store.load_all().unwrap();
        assert_eq!(loaded[0].title, "Magic, Myth, and More");
    }
}
