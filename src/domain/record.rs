// ============================================================
// Layer 3 — Record Domain Types
// ============================================================
// The two record shapes that flow through the system:
//
//   CatalogRecord — a scraped catalog row with an observed
//                   price. This is what training consumes.
//   RawRecord     — a title + rating pair with NO price.
//                   This is what inference consumes, because
//                   the price is exactly the unknown we are
//                   trying to predict.
//
// Reference: Rust Book §5 (Structs and Methods)

use serde::{Deserialize, Serialize};

/// The sentinel a missing or unparsable rating normalizes to.
/// A bad rating is corrected here, never raised as an error.
pub const RATING_SENTINEL: f64 = 3.0;

/// A title + rating pair submitted for prediction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawRecord {
    /// The product title, e.g. "A Light in the Attic"
    pub title: String,

    /// Star rating in 0.0–5.0. Already normalized — see
    /// [`normalize_rating`] for how bad input is handled.
    pub rating: f64,
}

impl RawRecord {
    /// Create a new RawRecord.
    /// Uses impl Into<String> so callers can pass &str or String.
    pub fn new(title: impl Into<String>, rating: f64) -> Self {
        Self {
            title:  title.into(),
            rating,
        }
    }

    /// Create a RawRecord from untrusted textual input, e.g. a
    /// CLI flag or a form field. The rating string is parsed
    /// leniently and falls back to [`RATING_SENTINEL`].
    pub fn from_input(title: impl Into<String>, rating: &str) -> Self {
        Self {
            title:  title.into(),
            rating: normalize_rating(Some(rating)),
        }
    }
}

/// A full catalog row as produced by the scraper and stored in
/// the catalog CSV. Training reads these; the `price` column is
/// the regression target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogRecord {
    pub title:  String,
    pub price:  f64,
    pub rating: f64,
}

impl CatalogRecord {
    pub fn new(title: impl Into<String>, price: f64, rating: f64) -> Self {
        Self {
            title: title.into(),
            price,
            rating,
        }
    }

    /// The inference-shaped view of this record (price dropped).
    pub fn raw(&self) -> RawRecord {
        RawRecord::new(self.title.clone(), self.rating)
    }
}

/// Normalize an optional rating string to a usable f64.
///
/// Rules (a deliberate leniency contract, not an oversight):
///   - missing input            → 3.0
///   - unparsable input         → 3.0
///   - parsable but non-finite  → 3.0
///   - anything else            → the parsed value
pub fn normalize_rating(input: Option<&str>) -> f64 {
    match input.map(str::trim).filter(|s| !s.is_empty()) {
        Some(s) => match s.parse::<f64>() {
            Ok(v) if v.is_finite() => v,
            _ => RATING_SENTINEL,
        },
        None => RATING_SENTINEL,
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parsable_rating_passes_through() {
        assert_eq!(normalize_rating(Some("4")), 4.0);
        assert_eq!(normalize_rating(Some(" 2.5 ")), 2.5);
    }

    #[test]
    fn test_missing_rating_defaults_to_sentinel() {
        assert_eq!(normalize_rating(None), RATING_SENTINEL);
        assert_eq!(normalize_rating(Some("")), RATING_SENTINEL);
        assert_eq!(normalize_rating(Some("   ")), RATING_SENTINEL);
    }

    #[test]
    fn test_unparsable_rating_defaults_to_sentinel() {
        assert_eq!(normalize_rating(Some("five stars")), RATING_SENTINEL);
        assert_eq!(normalize_rating(Some("4,5")), RATING_SENTINEL);
    }

    #[test]
    fn test_non_finite_rating_defaults_to_sentinel() {
        assert_eq!(normalize_rating(Some("inf")), RATING_SENTINEL);
        assert_eq!(normalize_rating(Some("NaN")), RATING_SENTINEL);
    }

    #[test]
    fn test_raw_view_drops_the_price() {
        let full = CatalogRecord::new("A Great Book", 50.0, 5.0);
        let raw  = full.raw();
        assert_eq!(raw.title, "A Great Book");
        assert_eq!(raw.rating, 5.0);
    }

    #[test]
    fn test_from_input_uses_lenient_parse() {
        let r = RawRecord::from_input("A Great Book", "not a number");
        assert_eq!(r.rating, RATING_SENTINEL);
        assert_eq!(r.title, "A Great Book");
    }
}
