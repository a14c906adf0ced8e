// ============================================================
// Layer 7 — Infrastructure Layer
// ============================================================
// Cross-cutting concerns that don't belong to any business
// layer:
//
//   artifact_store.rs — Persistence of the trained pair.
//                       Saves/loads the VocabularyState and the
//                       ForestModel as matched JSON artifacts,
//                       written atomically, with a fingerprint
//                       check that refuses to load a model
//                       against a vocabulary it was not trained
//                       with.
//
//   metrics.rs        — Training-run metrics logging.
//                       Appends one CSV row per training run
//                       (records, feature width, trees, MSE)
//                       for later analysis.
//
// Reference: Rust Book §7 (Modules)
//            Rust Book §9 (Error Handling)

/// Matched-pair artifact persistence
pub mod artifact_store;

/// Training metrics CSV logger
pub mod metrics;
