// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// By programming against traits instead of concrete types,
// we can swap implementations without changing the code
// that uses them. For example:
//   - CatalogStore implements RecordSource
//   - A future SqliteStore could also implement RecordSource
//   - The application layer only sees RecordSource
//     and works with both without any changes
//
// This is the Dependency Inversion Principle from SOLID,
// applied using Rust's trait system.
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)
//            Rust Book §17 (Object Oriented Patterns)

use anyhow::Result;

use crate::domain::error::PredictorError;
use crate::domain::record::{CatalogRecord, RawRecord};

// ─── RecordSource ─────────────────────────────────────────────────────────────
/// Any component that can supply training records.
///
/// Implementations:
///   - CatalogStore    → loads from the scraped catalog CSV
///   - (future) SqliteStore → loads from a local database
pub trait RecordSource {
    /// Load all available records from this source.
    fn load_all(&self) -> Result<Vec<CatalogRecord>>;
}

// ─── PricePredictor ───────────────────────────────────────────────────────────
/// Any component that can turn a raw record into a price.
///
/// Implementations:
///   - PredictUseCase → runs the fitted feature pipeline + forest
pub trait PricePredictor {
    /// Predict a price for one record. Fails with
    /// [`PredictorError::ModelNotReady`] when no trained
    /// artifacts exist.
    fn predict(&self, record: &RawRecord) -> Result<f64, PredictorError>;
}
