// ============================================================
// Layer 5 — Derived Categoricals & One-Hot Encoding
// ============================================================
// Two nominal labels are derived from every record by fixed
// threshold rules, then one-hot encoded with the first level
// of each nominal dropped (reference-level encoding, which
// avoids collinearity with the intercept).
//
// The price-tier rule is NOT the same at training time and at
// inference time:
//   - training:  actual price  > 40        → "expensive"
//   - inference: rating * 10   > 40        → "expensive"
// At prediction time the price is exactly the unknown being
// predicted, so the rating stands in as a proxy against the
// same threshold. Both rules are kept side by side here so the
// divergence stays visible.
//
// Encoding mirrors batch-observed semantics: the level set of
// a nominal is whatever appears in THE CURRENT BATCH, sorted
// lexicographically, first level dropped. A single-record batch
// therefore observes one level per nominal and produces ZERO
// dummy columns — schema reindexing (see schema.rs) fills those
// columns with 0 downstream.

use std::collections::BTreeSet;

use crate::domain::record::{CatalogRecord, RawRecord};

pub const PRICE_TIER:  &str = "price_tier";
pub const RATING_BAND: &str = "rating_band";

pub const TIER_EXPENSIVE: &str = "expensive";
pub const TIER_NORMAL:    &str = "normal";
pub const BAND_GOOD:      &str = "good";
pub const BAND_AVERAGE:   &str = "average";

const PRICE_TIER_THRESHOLD:  f64 = 40.0;
const RATING_BAND_THRESHOLD: f64 = 3.0;

/// Training-time tier rule: thresholds the observed price.
pub fn price_tier_from_price(price: f64) -> &'static str {
    if price > PRICE_TIER_THRESHOLD {
        TIER_EXPENSIVE
    } else {
        TIER_NORMAL
    }
}

/// Inference-time tier rule: price is unknown, so rating * 10
/// is thresholded against the same cutoff as a proxy.
pub fn price_tier_from_rating(rating: f64) -> &'static str {
    if rating * 10.0 > PRICE_TIER_THRESHOLD {
        TIER_EXPENSIVE
    } else {
        TIER_NORMAL
    }
}

/// Band rule, identical at training and inference time.
pub fn rating_band(rating: f64) -> &'static str {
    if rating > RATING_BAND_THRESHOLD {
        BAND_GOOD
    } else {
        BAND_AVERAGE
    }
}

/// The derived nominal labels for one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DerivedLabels {
    pub price_tier:  &'static str,
    pub rating_band: &'static str,
}

impl DerivedLabels {
    /// Labels for a training record (price-based tier rule).
    pub fn for_training(record: &CatalogRecord) -> Self {
        Self {
            price_tier:  price_tier_from_price(record.price),
            rating_band: rating_band(record.rating),
        }
    }

    /// Labels for an inference record (rating-proxy tier rule).
    pub fn for_inference(record: &RawRecord) -> Self {
        Self {
            price_tier:  price_tier_from_rating(record.rating),
            rating_band: rating_band(record.rating),
        }
    }
}

/// One-hot encode a batch of derived labels with drop-first.
///
/// Returns the dummy column names (`{nominal}_{level}`) and one
/// 0.0/1.0 row per input label, parallel to the names. Levels
/// are the ones observed in `rows`, sorted, first dropped — so
/// the column set depends on the batch, which is exactly why
/// the schema reindexing step exists.
pub fn encode_one_hot(rows: &[DerivedLabels]) -> (Vec<String>, Vec<Vec<f64>>) {
    // Fixed nominal order: price_tier dummies first, then
    // rating_band dummies, matching the training layout.
    let nominals: [(&str, fn(&DerivedLabels) -> &'static str); 2] = [
        (PRICE_TIER, |l| l.price_tier),
        (RATING_BAND, |l| l.rating_band),
    ];

    let mut columns = Vec::new();
    let mut encoded: Vec<Vec<f64>> = vec![Vec::new(); rows.len()];

    for (name, level_of) in nominals {
        // BTreeSet iterates in sorted order; skip(1) drops the
        // reference level.
        let levels: BTreeSet<&str> = rows.iter().map(level_of).collect();

        for level in levels.into_iter().skip(1) {
            columns.push(format!("{name}_{level}"));
            for (row, labels) in encoded.iter_mut().zip(rows) {
                row.push(if level_of(labels) == level { 1.0 } else { 0.0 });
            }
        }
    }

    (columns, encoded)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_tier_thresholds() {
        assert_eq!(price_tier_from_price(50.0), TIER_EXPENSIVE);
        assert_eq!(price_tier_from_price(40.0), TIER_NORMAL);
        assert_eq!(price_tier_from_price(10.0), TIER_NORMAL);
    }

    #[test]
    fn test_rating_proxy_tier() {
        // rating * 10 > 40 — a 5-star book counts as expensive
        assert_eq!(price_tier_from_rating(5.0), TIER_EXPENSIVE);
        assert_eq!(price_tier_from_rating(4.0), TIER_NORMAL);
        assert_eq!(price_tier_from_rating(2.0), TIER_NORMAL);
    }

    #[test]
    fn test_rating_band_thresholds() {
        assert_eq!(rating_band(5.0), BAND_GOOD);
        assert_eq!(rating_band(3.0), BAND_AVERAGE);
        assert_eq!(rating_band(2.0), BAND_AVERAGE);
    }

    #[test]
    fn test_two_level_batch_keeps_one_dummy_per_nominal() {
        let rows = [
            DerivedLabels { price_tier: TIER_EXPENSIVE, rating_band: BAND_GOOD },
            DerivedLabels { price_tier: TIER_NORMAL,    rating_band: BAND_AVERAGE },
        ];
        let (columns, encoded) = encode_one_hot(&rows);

        // "expensive" < "normal" and "average" < "good", so the
        // first level of each nominal drops.
        assert_eq!(columns, ["price_tier_normal", "rating_band_good"]);
        assert_eq!(encoded[0], [0.0, 1.0]);
        assert_eq!(encoded[1], [1.0, 0.0]);
    }

    #[test]
    fn test_single_record_batch_produces_zero_dummies() {
        // One record observes one level per nominal; drop-first
        // removes it, leaving no dummy columns at all. This is
        // the common inference case.
        let rows = [DerivedLabels {
            price_tier:  TIER_NORMAL,
            rating_band: BAND_GOOD,
        }];
        let (columns, encoded) = encode_one_hot(&rows);
        assert!(columns.is_empty());
        assert_eq!(encoded, vec![Vec::<f64>::new()]);
    }

    #[test]
    fn test_empty_batch() {
        let (columns, encoded) = encode_one_hot(&[]);
        assert!(columns.is_empty());
        assert!(encoded.is_empty());
    }
}
