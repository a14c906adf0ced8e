// ============================================================
// Layer 2 — Scrape Use Case
// ============================================================
// Acquires the training corpus: walks the catalog site and
// writes every product record to the catalog CSV. Training
// never touches the network — it reads the file this use case
// produces.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::data::catalog_store::CatalogStore;
use crate::data::scraper::{CatalogScraper, DEFAULT_BASE_URL};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeConfig {
    pub base_url:    String,
    pub output_path: String,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            base_url:    DEFAULT_BASE_URL.to_string(),
            output_path: "data/catalog.csv".to_string(),
        }
    }
}

pub struct ScrapeUseCase {
    config: ScrapeConfig,
}

impl ScrapeUseCase {
    pub fn new(config: ScrapeConfig) -> Self {
        Self { config }
    }

    /// Walk the catalog and persist whatever was found.
    /// Returns the number of records written.
    pub fn execute(&self) -> Result<usize> {
        let cfg = &self.config;

        tracing::info!("Scraping catalog from '{}'", cfg.base_url);
        let scraper = CatalogScraper::new(&cfg.base_url);
        let records = scraper.scrape_all()?;

        if records.is_empty() {
            tracing::warn!("No records extracted — nothing written");
            return Ok(0);
        }

        let store = CatalogStore::new(&cfg.output_path);
        store.save_all(&records)?;

        Ok(records.len())
    }
}
