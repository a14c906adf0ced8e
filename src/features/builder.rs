// ============================================================
// Layer 5 — Feature Builder
// ============================================================
// The engine. Maps batches of raw records into numeric feature
// tables, in one of two modes:
//
//   fit_transform — training mode. Fits a fresh vectorizer over
//                   the corpus, derives categoricals with the
//                   price-based tier rule, and FREEZES the
//                   resulting column list as the canonical
//                   schema. Runs exactly once per training run.
//
//   transform     — inference mode. Applies the already-fitted
//                   vocabulary state to a single record with
//                   the rating-proxy tier rule, then reindexes
//                   the result against the frozen schema.
//
// Row layout in both modes:
//
//   [rating] ++ one-hot dummies ++ TF-IDF text features
//
// Invariant: every vector that reaches the model has exactly
// schema.len() entries in exactly schema order, no matter which
// categorical levels or vocabulary terms the current batch
// happens to contain.

use serde::{Deserialize, Serialize};

use crate::domain::error::PredictorError;
use crate::domain::record::{CatalogRecord, RawRecord};
use crate::features::categorical::{encode_one_hot, DerivedLabels};
use crate::features::schema::ColumnSchema;
use crate::features::vectorizer::TfidfVectorizer;

/// Name of the numeric rating column, always first in the layout.
pub const RATING_COLUMN: &str = "rating";

/// Default vocabulary cap, matching the catalog's scale.
pub const DEFAULT_MAX_VOCABULARY: usize = 50;

/// The fitted vectorizer plus the canonical column schema.
/// Created exactly once during training, persisted, and then
/// only ever read — inference never mutates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VocabularyState {
    vectorizer: TfidfVectorizer,
    schema:     ColumnSchema,
}

impl VocabularyState {
    pub fn schema(&self) -> &ColumnSchema {
        &self.schema
    }

    pub fn vectorizer(&self) -> &TfidfVectorizer {
        &self.vectorizer
    }

    /// Fingerprint of the frozen schema — the pairing token
    /// shared with the model artifact.
    pub fn fingerprint(&self) -> String {
        self.schema.fingerprint()
    }
}

/// A batch of feature rows with their column names.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureTable {
    pub columns: Vec<String>,
    pub rows:    Vec<Vec<f64>>,
}

/// Pure, deterministic feature construction. Holds only the
/// vocabulary cap; all fitted state lives in VocabularyState.
#[derive(Debug)]
pub struct FeatureBuilder {
    max_vocabulary: usize,
}

impl FeatureBuilder {
    pub fn new(max_vocabulary: usize) -> Self {
        Self { max_vocabulary }
    }

    /// Training mode: fit the vocabulary state from the corpus
    /// and produce the full training table.
    ///
    /// Fails with [`PredictorError::EmptyCorpus`] when `records`
    /// is empty — a vectorizer cannot be fit on zero documents.
    pub fn fit_transform(
        &self,
        records: &[CatalogRecord],
    ) -> Result<(FeatureTable, VocabularyState), PredictorError> {
        if records.is_empty() {
            return Err(PredictorError::EmptyCorpus);
        }

        // ── Fit the text vectorizer over all titles ───────────────────────────
        let titles: Vec<String> = records.iter().map(|r| r.title.clone()).collect();
        let vectorizer = TfidfVectorizer::fit(&titles, self.max_vocabulary)?;

        // ── Derive categoricals (training rule) and encode ────────────────────
        let labels: Vec<DerivedLabels> =
            records.iter().map(DerivedLabels::for_training).collect();
        let (dummy_columns, dummy_rows) = encode_one_hot(&labels);

        // ── Assemble the table and freeze the schema ──────────────────────────
        let mut columns = vec![RATING_COLUMN.to_string()];
        columns.extend(dummy_columns);
        columns.extend(vectorizer.vocabulary().iter().cloned());

        let rows: Vec<Vec<f64>> = records
            .iter()
            .zip(&dummy_rows)
            .map(|(record, dummies)| {
                assemble_row(record.rating, dummies, &vectorizer.transform(&record.title))
            })
            .collect();

        let schema = ColumnSchema::new(columns.clone());
        tracing::info!(
            "Feature schema frozen: {} columns ({} text terms)",
            schema.len(),
            vectorizer.len()
        );

        Ok((
            FeatureTable { columns, rows },
            VocabularyState { vectorizer, schema },
        ))
    }

    /// Inference mode: transform one record against a fitted
    /// vocabulary state and reindex to the frozen schema.
    ///
    /// Infallible: unknown terms contribute zero, and whatever
    /// dummy columns the single-record batch fails to produce
    /// are zero-filled by the reindex step.
    pub fn transform(&self, record: &RawRecord, vocab: &VocabularyState) -> Vec<f64> {
        // Derive categoricals (inference rule) for this one-record batch
        let labels = [DerivedLabels::for_inference(record)];
        let (dummy_columns, mut dummy_rows) = encode_one_hot(&labels);
        let dummies = dummy_rows.pop().unwrap_or_default();

        // Same layout as training: rating, dummies, text terms
        let mut columns = vec![RATING_COLUMN.to_string()];
        columns.extend(dummy_columns);
        columns.extend(vocab.vectorizer().vocabulary().iter().cloned());

        let values = assemble_row(
            record.rating,
            &dummies,
            &vocab.vectorizer().transform(&record.title),
        );

        vocab.schema().reindex(&columns, &values)
    }
}

impl Default for FeatureBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_VOCABULARY)
    }
}

/// Concatenate one row: [rating] ++ dummies ++ text features.
fn assemble_row(rating: f64, dummies: &[f64], text: &[f64]) -> Vec<f64> {
    let mut row = Vec::with_capacity(1 + dummies.len() + text.len());
    row.push(rating);
    row.extend_from_slice(dummies);
    row.extend_from_slice(text);
    row
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn training_corpus() -> Vec<CatalogRecord> {
        vec![
            CatalogRecord::new("A Great Book", 50.0, 5.0),
            CatalogRecord::new("Plain Notes", 10.0, 2.0),
            CatalogRecord::new("Great Plain Stories", 25.0, 4.0),
        ]
    }

    #[test]
    fn test_empty_corpus_fails() {
        let err = FeatureBuilder::default().fit_transform(&[]).unwrap_err();
        assert!(matches!(err, PredictorError::EmptyCorpus));
    }

    #[test]
    fn test_training_layout_rating_dummies_then_terms() {
        let (table, vocab) = FeatureBuilder::default()
            .fit_transform(&training_corpus())
            .unwrap();

        assert_eq!(table.columns[0], RATING_COLUMN);
        // Both tiers and both bands appear in this corpus, so one
        // dummy survives drop-first for each nominal.
        assert_eq!(table.columns[1], "price_tier_normal");
        assert_eq!(table.columns[2], "rating_band_good");

        // Text columns follow, in alphabetical vocabulary order
        let terms = &table.columns[3..];
        let mut sorted = terms.to_vec();
        sorted.sort();
        assert_eq!(terms, sorted.as_slice());

        assert_eq!(vocab.schema().columns(), table.columns.as_slice());
    }

    #[test]
    fn test_every_training_row_is_schema_width() {
        let (table, vocab) = FeatureBuilder::default()
            .fit_transform(&training_corpus())
            .unwrap();
        for row in &table.rows {
            assert_eq!(row.len(), vocab.schema().len());
        }
    }

    #[test]
    fn test_schema_stability_for_single_record() {
        let builder = FeatureBuilder::default();
        let (_, vocab) = builder.fit_transform(&training_corpus()).unwrap();

        // Whatever levels this one record triggers, the output
        // width is the schema width.
        for rating in [0.0, 2.0, 5.0] {
            let out = builder.transform(&RawRecord::new("A Great Book", rating), &vocab);
            assert_eq!(out.len(), vocab.schema().len());
        }
    }

    #[test]
    fn test_inference_dummies_are_zero_filled() {
        let builder = FeatureBuilder::default();
        let (_, vocab) = builder.fit_transform(&training_corpus()).unwrap();

        // A one-record batch yields no dummy columns at all, so
        // the schema's dummy slots must come back zero-filled.
        let out  = builder.transform(&RawRecord::new("A Great Book", 2.0), &vocab);
        let cols = vocab.schema().columns();
        let tier = cols.iter().position(|c| c == "price_tier_normal").unwrap();
        let band = cols.iter().position(|c| c == "rating_band_good").unwrap();
        assert_eq!(out[tier], 0.0);
        assert_eq!(out[band], 0.0);
    }

    #[test]
    fn test_transform_is_deterministic() {
        let builder = FeatureBuilder::default();
        let (_, vocab) = builder.fit_transform(&training_corpus()).unwrap();
        let record = RawRecord::new("Great Stories", 4.0);
        assert_eq!(
            builder.transform(&record, &vocab),
            builder.transform(&record, &vocab)
        );
    }

    #[test]
    fn test_unknown_title_still_fills_full_width() {
        let builder = FeatureBuilder::default();
        let (_, vocab) = builder.fit_transform(&training_corpus()).unwrap();

        let out = builder.transform(
            &RawRecord::new("zzz qqq completely unseen", 3.0),
            &vocab,
        );
        assert_eq!(out.len(), vocab.schema().len());
        // Rating passes through; every text column is zero
        assert_eq!(out[0], 3.0);
        assert!(out[3..].iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_rating_column_carries_the_raw_rating() {
        let builder = FeatureBuilder::default();
        let (table, _) = builder.fit_transform(&training_corpus()).unwrap();
        assert_eq!(table.rows[0][0], 5.0);
        assert_eq!(table.rows[1][0], 2.0);
    }
}
