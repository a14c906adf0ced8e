// ============================================================
// Layer 7 — Artifact Store
// ============================================================
// Saves and restores the two artifacts a trained system
// consists of:
//
//   vocabulary.json — the fitted vectorizer + column schema
//   model.json      — the fitted forest
//
// The two are a MATCHED PAIR: a model only makes sense against
// the exact vocabulary it was trained with. Both files embed
// the schema fingerprint, and load_pair refuses artifacts whose
// fingerprints disagree.
//
// Write discipline:
//   - each file goes to `<name>.tmp` first and is renamed into
//     place, so a crash mid-write never leaves a half-written
//     artifact under the real name
//   - the vocabulary is written before the model; until the
//     model file lands, load_pair keeps failing with
//     ArtifactUnavailable and no stale pair is observable
//
// Error contract on load:
//   file missing      → ArtifactUnavailable ("never trained")
//   file unreadable   → ArtifactCorrupt     ("trained but unreadable")
//   bad JSON          → ArtifactCorrupt
//   fingerprints differ → SchemaMismatch
//
// Reference: Rust Book §9 (Error Handling)
//            serde_json crate documentation

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::domain::error::PredictorError;
use crate::features::builder::VocabularyState;
use crate::ml::forest::ForestModel;

const VOCABULARY_FILE: &str = "vocabulary.json";
const MODEL_FILE:      &str = "model.json";

/// Manages the artifact directory. All files live directly in
/// the configured directory.
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Persist a freshly trained pair. All-or-nothing: any
    /// failure leaves no observable half-written state.
    pub fn save_pair(
        &self,
        vocab: &VocabularyState,
        model: &ForestModel,
    ) -> Result<(), PredictorError> {
        fs::create_dir_all(&self.dir)?;

        // Vocabulary first, model last — load_pair needs both,
        // so an interrupted run stays "not trained"
        self.write_atomic(VOCABULARY_FILE, vocab)?;
        self.write_atomic(MODEL_FILE, model)?;

        tracing::info!(
            "Saved model + vocabulary pair to '{}' (schema {})",
            self.dir.display(),
            &model.schema_fingerprint()[..12.min(model.schema_fingerprint().len())]
        );
        Ok(())
    }

    /// Load the matched pair back. See the module header for
    /// the error contract.
    pub fn load_pair(&self) -> Result<(VocabularyState, ForestModel), PredictorError> {
        let vocab: VocabularyState = self.read_json(VOCABULARY_FILE)?;
        let model: ForestModel     = self.read_json(MODEL_FILE)?;

        let expected = model.schema_fingerprint().to_string();
        let found    = vocab.fingerprint();
        if expected != found {
            return Err(PredictorError::SchemaMismatch { expected, found });
        }

        tracing::info!("Loaded model + vocabulary pair from '{}'", self.dir.display());
        Ok((vocab, model))
    }

    /// Serialize `value` to `<dir>/<name>.tmp`, then rename over
    /// `<dir>/<name>`. Rename within one directory is atomic on
    /// the platforms we care about.
    fn write_atomic<T: Serialize>(&self, name: &str, value: &T) -> Result<(), PredictorError> {
        let path = self.dir.join(name);
        let tmp  = self.dir.join(format!("{name}.tmp"));

        let json = serde_json::to_string_pretty(value).map_err(|e| {
            PredictorError::ArtifactCorrupt {
                path:   path.clone(),
                reason: format!("cannot serialize: {e}"),
            }
        })?;

        fs::write(&tmp, json)?;
        fs::rename(&tmp, &path)?;

        tracing::debug!("Wrote artifact '{}'", path.display());
        Ok(())
    }

    fn read_json<T: DeserializeOwned>(&self, name: &str) -> Result<T, PredictorError> {
        let path = self.dir.join(name);

        let json = match fs::read_to_string(&path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(PredictorError::ArtifactUnavailable { path });
            }
            Err(e) => {
                return Err(PredictorError::ArtifactCorrupt {
                    path,
                    reason: e.to_string(),
                });
            }
        };

        serde_json::from_str(&json).map_err(|e| PredictorError::ArtifactCorrupt {
            path,
            reason: e.to_string(),
        })
    }
}
