// ============================================================
// Layer 5 — TF-IDF Vectorizer
// ============================================================
// Turns a title into a fixed-width vector of weighted term
// counts, one dimension per vocabulary term.
//
// Fitting (training time, exactly once):
//   1. Tokenize every title: lowercase runs of 2+ alphanumeric
//      characters, stop words removed.
//   2. Count corpus frequency and document frequency per term.
//   3. Keep the top `max_features` terms by corpus frequency,
//      ties broken alphabetically.
//   4. Order the kept vocabulary alphabetically — this ordering
//      IS the column ordering of the text features.
//   5. Compute smoothed IDF: ln((1 + n) / (1 + df)) + 1.
//
// Transforming (training and inference):
//   count vocabulary terms in the title, multiply by IDF,
//   L2-normalize the row. Terms outside the fitted vocabulary
//   contribute nothing — silently, never as an error.
//
// The fitted state is the only source of truth: there is no
// random element anywhere in this path, so the same input
// always yields the same vector across calls and processes.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::domain::error::PredictorError;
use crate::features::stopwords::is_stop_word;

/// A fitted TF-IDF text vectorizer. Immutable after `fit`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    /// Vocabulary terms in alphabetical order. The position of
    /// a term is its output column index; lookups are binary
    /// searches against this sorted list.
    vocabulary: Vec<String>,

    /// Smoothed inverse document frequency per vocabulary term,
    /// parallel to `vocabulary`.
    idf: Vec<f64>,

    /// The vocabulary size cap this vectorizer was fit with.
    max_features: usize,
}

impl TfidfVectorizer {
    /// Fit a vectorizer over a corpus of titles.
    ///
    /// Fails with [`PredictorError::EmptyCorpus`] on an empty
    /// corpus — there is nothing to fit a vocabulary on.
    pub fn fit(titles: &[String], max_features: usize) -> Result<Self, PredictorError> {
        if titles.is_empty() {
            return Err(PredictorError::EmptyCorpus);
        }

        // ── Count corpus and document frequencies ─────────────────────────────
        let mut corpus_freq: HashMap<String, usize> = HashMap::new();
        let mut doc_freq:    HashMap<String, usize> = HashMap::new();

        for title in titles {
            let tokens = tokenize(title);

            // Document frequency counts each title at most once per term
            let unique: HashSet<&String> = tokens.iter().collect();
            for term in unique {
                *doc_freq.entry(term.clone()).or_insert(0) += 1;
            }
            for term in tokens {
                *corpus_freq.entry(term).or_insert(0) += 1;
            }
        }

        // ── Select the capped vocabulary ──────────────────────────────────────
        // Top max_features by corpus frequency. The alphabetical
        // tie-break keeps selection deterministic across runs —
        // HashMap iteration order must never leak into the result.
        let mut ranked: Vec<(String, usize)> = corpus_freq.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(max_features);

        // Column order is alphabetical regardless of frequency rank
        let mut vocabulary: Vec<String> =
            ranked.into_iter().map(|(term, _)| term).collect();
        vocabulary.sort();

        // ── Smoothed IDF per kept term ────────────────────────────────────────
        let n_docs = titles.len() as f64;
        let idf: Vec<f64> = vocabulary
            .iter()
            .map(|term| {
                let df = *doc_freq.get(term).unwrap_or(&0) as f64;
                ((1.0 + n_docs) / (1.0 + df)).ln() + 1.0
            })
            .collect();

        tracing::debug!(
            "Fitted vocabulary: {} terms (cap {})",
            vocabulary.len(),
            max_features
        );

        Ok(Self { vocabulary, idf, max_features })
    }

    /// Transform one title into its text-feature vector.
    /// Always returns exactly `self.len()` entries, in
    /// vocabulary (alphabetical) order.
    pub fn transform(&self, title: &str) -> Vec<f64> {
        let mut weights = vec![0.0f64; self.vocabulary.len()];

        for token in tokenize(title) {
            if let Ok(index) = self.vocabulary.binary_search(&token) {
                weights[index] += 1.0;
            }
            // Out-of-vocabulary terms fall through: zero contribution
        }

        // Apply IDF weighting to the raw counts
        for (w, idf) in weights.iter_mut().zip(&self.idf) {
            *w *= idf;
        }

        // L2-normalize. A title with only unknown words stays
        // all-zero rather than dividing by zero.
        let norm = weights.iter().map(|w| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for w in &mut weights {
                *w /= norm;
            }
        }

        weights
    }

    /// The fitted vocabulary, alphabetically ordered.
    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    /// Number of text-feature dimensions this vectorizer emits.
    pub fn len(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vocabulary.is_empty()
    }
}

/// Tokenize a title: split on non-alphanumeric characters,
/// lowercase, keep tokens of 2+ characters, drop stop words.
fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| t.chars().count() >= 2)
        .map(str::to_lowercase)
        .filter(|t| !is_stop_word(t))
        .collect()
}
