// ============================================================
// Layer 3 — Error Taxonomy
// ============================================================
// Every failure the core can produce, as one typed enum.
// All of these are terminal for the operation in progress —
// they are deterministic data/state conditions, not transient
// faults, so nothing is ever retried.
//
// The split between ArtifactUnavailable and ArtifactCorrupt
// matters: callers must be able to tell "never trained" apart
// from "trained but unreadable".
//
// Reference: Rust Book §9 (Error Handling)
//            thiserror crate documentation

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Error type for feature building, model fitting, and artifact
/// persistence failures.
#[derive(Debug, Error)]
pub enum PredictorError {
    /// The vectorizer cannot be fit on zero documents.
    #[error("cannot fit a vocabulary on an empty corpus")]
    EmptyCorpus,

    /// The training inputs are unusable as a whole
    /// (empty catalog, mismatched feature/target lengths).
    #[error("invalid training set: {reason}")]
    InvalidTrainingSet { reason: String },

    /// A persisted artifact does not exist — the model has
    /// never been trained (or the artifacts were deleted).
    #[error("artifact '{}' not found — run `train` first", .path.display())]
    ArtifactUnavailable { path: PathBuf },

    /// A persisted artifact exists but cannot be decoded.
    /// Distinct from ArtifactUnavailable so callers can tell
    /// "never trained" apart from "trained but unreadable".
    #[error("artifact '{}' is unreadable: {reason}", .path.display())]
    ArtifactCorrupt { path: PathBuf, reason: String },

    /// Inference was requested before a trained model and
    /// vocabulary pair was available.
    #[error("model artifacts are not ready — run `train` before `predict`")]
    ModelNotReady,

    /// The loaded model and vocabulary were not produced by the
    /// same training run. Using them together is undefined, so
    /// loading refuses the pair outright.
    #[error("model/vocabulary mismatch: model expects schema {expected}, vocabulary has {found}")]
    SchemaMismatch { expected: String, found: String },

    #[error(transparent)]
    Io(#[from] io::Error),
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_unavailable_message_points_at_train() {
        let e = PredictorError::ArtifactUnavailable {
            path: Path::new("artifacts/model.json").to_path_buf(),
        };
        let msg = e.to_string();
        assert!(msg.contains("artifacts/model.json"));
        assert!(msg.contains("train"));
    }

    #[test]
    fn test_unavailable_and_corrupt_are_distinct() {
        let missing = PredictorError::ArtifactUnavailable {
            path: PathBuf::from("x.json"),
        };
        let corrupt = PredictorError::ArtifactCorrupt {
            path:   PathBuf::from("x.json"),
            reason: "not json".to_string(),
        };
        assert!(matches!(missing, PredictorError::ArtifactUnavailable { .. }));
        assert!(matches!(corrupt, PredictorError::ArtifactCorrupt { .. }));
    }
}
