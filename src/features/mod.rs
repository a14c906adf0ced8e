// ============================================================
// Layer 5 — Feature Pipeline
// ============================================================
// The core of the system: deterministic transformation of raw
// records into fixed-width numeric feature vectors, identical
// at training time and at inference time.
//
// The pipeline flows in this order:
//
//   {title, rating}
//       │
//       ▼
//   TfidfVectorizer   → title text to weighted term counts
//       │
//       ▼
//   categorical       → derived nominals + one-hot dummies
//       │
//       ▼
//   builder           → [rating] ++ dummies ++ text features
//       │
//       ▼
//   ColumnSchema      → reindex to the canonical column order
//
// Two facts make this non-trivial:
//   1. The vocabulary is data-dependent — it does not exist
//      until training fits it, and it must never change after.
//   2. The dummy column set is data-dependent — a single-record
//      inference batch usually produces ZERO dummy columns, and
//      only reindexing against the training-time schema makes
//      the output width stable.
//
// Nothing in this layer performs I/O and nothing in it is
// random. Given the same fitted state and the same records,
// the output is byte-for-byte identical across processes.

/// Embedded English stop-word list
pub mod stopwords;

/// Fitted TF-IDF text vectorizer
pub mod vectorizer;

/// Derived nominal labels and one-hot encoding
pub mod categorical;

/// The canonical ordered column list and reindexing
pub mod schema;

/// The feature builder — glues the pieces into one engine
pub mod builder;
