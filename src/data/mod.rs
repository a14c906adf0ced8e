// ============================================================
// Layer 4 — Data Layer
// ============================================================
// Everything between the outside world and the feature
// pipeline. This layer knows about HTTP, HTML, and CSV; the
// layers above it only ever see CatalogRecord values.
//
// The pipeline flows in this order:
//
//   catalog pages (HTTP)
//       │
//       ▼
//   CatalogScraper    → walks pages, extracts records
//       │
//       ▼
//   CatalogStore      → persists/loads the catalog CSV
//       │
//       ▼
//   CatalogRecord     → consumed by the feature builder
//
// Site-structure knowledge lives ONLY in scraper.rs and
// html.rs. Swapping the catalog source means touching exactly
// those two files.

/// Reads and writes the scraped catalog CSV
pub mod catalog_store;

/// Walks the paginated catalog and extracts records
pub mod scraper;

/// Naive, site-tailored HTML string helpers
pub mod html;
