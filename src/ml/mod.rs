// ============================================================
// Layer 6 — ML / Model Layer
// ============================================================
// The regression model and nothing else. No other layer knows
// how predictions are computed; this layer never sees CSV,
// HTML, or the feature pipeline's internals — it receives
// finished numeric rows and targets.
//
// What's in this layer:
//
//   tree.rs   — A single regression tree grown by recursive
//               variance-reduction splitting.
//
//   forest.rs — The bootstrap-aggregated ensemble: each tree
//               fits a resampled copy of the training set with
//               a random feature subset per split, and the
//               forest prediction is the mean of the trees.
//               All randomness flows from one seeded RNG, so
//               identical data + seed reproduces the identical
//               model.
//
// Reference: Breiman (2001) Random Forests
//            Rust Book §10 (Generic Types and Traits)

/// Single regression tree (variance-reduction splits)
pub mod tree;

/// Seeded bootstrap ensemble over regression trees
pub mod forest;
