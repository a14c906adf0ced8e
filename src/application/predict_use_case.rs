// ============================================================
// Layer 2 — Predict Use Case
// ============================================================
// The inference orchestrator. Everything stateful happens in
// new(): the model + vocabulary pair is loaded from disk
// exactly once and held read-only for the lifetime of the use
// case. Initialization fails fast — a missing pair surfaces as
// ModelNotReady at construction, never lazily per request.
//
// After construction, predict() is pure computation over
// immutable state, so one PredictUseCase can serve any number
// of calls.

use crate::domain::error::PredictorError;
use crate::domain::record::RawRecord;
use crate::domain::traits::PricePredictor;
use crate::features::builder::{FeatureBuilder, VocabularyState};
use crate::infra::artifact_store::ArtifactStore;
use crate::ml::forest::ForestModel;

#[derive(Debug)]
pub struct PredictUseCase {
    vocab:   VocabularyState,
    model:   ForestModel,
    builder: FeatureBuilder,
}

impl PredictUseCase {
    /// Load the trained pair and build the predictor.
    ///
    /// An absent pair means the system was never trained —
    /// that is reported as [`PredictorError::ModelNotReady`].
    /// A corrupt or mismatched pair keeps its own error so the
    /// operator can tell the difference.
    pub fn new(artifacts_dir: &str) -> Result<Self, PredictorError> {
        let store = ArtifactStore::new(artifacts_dir);
        let (vocab, model) = store.load_pair().map_err(|e| match e {
            PredictorError::ArtifactUnavailable { .. } => PredictorError::ModelNotReady,
            other => other,
        })?;

        tracing::info!(
            "Predictor ready: {} trees, {} feature columns",
            model.n_trees(),
            vocab.schema().len()
        );

        Ok(Self {
            vocab,
            model,
            builder: FeatureBuilder::default(),
        })
    }
}

impl PricePredictor for PredictUseCase {
    /// Transform one record against the frozen schema and run
    /// the forest over it.
    fn predict(&self, record: &RawRecord) -> Result<f64, PredictorError> {
        let features = self.builder.transform(record, &self.vocab);
        debug_assert_eq!(features.len(), self.vocab.schema().len());

        let price = self.model.predict(&features);
        tracing::debug!("Predicted {:.2} for '{}'", price, record.title);
        Ok(price)
    }
}
