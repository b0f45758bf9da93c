//! # plagscan matcher (`matcher`)
//!
//! ## Purpose
//!
//! `matcher` compares one submitted text against a local corpus and explains
//! what it found. It wires the `canonical` normalizer and the `ngram` trie
//! index into three stages:
//!
//! 1. **Score**: containment ratio of the submission's n-grams in each
//!    document (`matched / total`, repetitions counted).
//! 2. **Explain**: longest common substring between the raw submission and
//!    every flagged document.
//! 3. **Report**: fixed-format text, or a serde-friendly [`Report`].
//!
//! ## Core Types
//!
//! - [`DetectConfig`]: window size `n`, `threshold`, stop-word switch,
//!   parallelism, trie caching, and the LCS size bound.
//! - [`Corpus`]: immutable `doc_id -> text` snapshot.
//! - [`SimilarityResult`]: flagged documents and ratios, in id order.
//! - [`DetectOutcome`]: result plus documents that could not be scored.
//! - [`Evidence`]: the shared substring, or why it is unavailable.
//! - [`Detector`]: owns the corpus, config, and normalizer; no globals.
//!
//! ## Error Handling
//!
//! Configuration errors surface from [`Detector::new`] before any document is
//! read. A document that fails normalization is listed in
//! [`DetectOutcome::unscored`] and the rest are still scored. Only an
//! oversized submission fails a [`Detector::detect`] call.
//!
//! ## Example Usage
//!
//! ```
//! use matcher::{Corpus, DetectConfig, Detector};
//!
//! let corpus: Corpus = [("doc1", "the quick brown fox jumps over the lazy dog")]
//!     .into_iter()
//!     .collect();
//! let detector = Detector::new(corpus, DetectConfig::with_params(3, 0.5)).unwrap();
//!
//! let outcome = detector.detect("the quick brown fox jumps").unwrap();
//! assert_eq!(outcome.result.get("doc1"), Some(1.0));
//!
//! let report = detector.run("the quick brown fox jumps").unwrap();
//! assert!(report.starts_with("Potential plagiarism detected in 'doc1'"));
//! ```

mod engine;
mod lcs;
mod metrics;
mod report;
mod scorer;
mod types;

pub use crate::engine::{detect, explain, Detector};
pub use crate::lcs::{bounded_longest_common_substring, longest_common_substring, LcsBound};
pub use crate::metrics::DetectMetrics;
pub use crate::report::{
    render_outcome, render_report, FlaggedDocument, Report, SkippedDocument, NO_PLAGIARISM,
};
pub use crate::types::{
    Corpus, DetectConfig, DetectOutcome, DocumentScore, Evidence, MatchError, OversizePolicy,
    ScoreSheet, SimilarityResult, INPUT_DOC_ID,
};
