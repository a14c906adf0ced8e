// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// This layer orchestrates all the other layers to accomplish
// a specific goal (scraping, training, or predicting).
//
// Rules for this layer:
//   - No feature math or model code here
//   - No UI or printing here (that's Layer 1)
//   - No direct file or network access (that's Layer 4 and 7)
//   - Only workflow coordination
//
// Think of this layer as the "director" — it tells other
// layers what to do but doesn't do the work itself.
//
// Reference: Clean Architecture pattern
//            Rust Book §7 (Module System)

// The catalog acquisition workflow
pub mod scrape_use_case;

// The training workflow
pub mod train_use_case;

// The prediction workflow
pub mod predict_use_case;
