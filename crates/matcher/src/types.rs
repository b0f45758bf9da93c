use std::collections::{BTreeMap, HashMap};
use std::fmt;

use canonical::CanonicalError;
use ngram::{NgramConfig, NgramError, DEFAULT_N};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identifier used in errors that concern the submitted text rather than a
/// corpus document.
pub const INPUT_DOC_ID: &str = "<input>";

/// Placeholder for the reference side of a pairwise comparison until the
/// caller names the document.
pub(crate) const REFERENCE_DOC_ID: &str = "<reference>";

/// What to do when a text exceeds the LCS size bound.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OversizePolicy {
    /// Fail with [`MatchError::InputTooLarge`].
    Reject,
    /// Compare only the first `max_lcs_chars` characters of each text.
    #[default]
    Truncate,
}

/// Configuration for a detection run.
///
/// Cheap to clone and serde-friendly so it can be embedded in the CLI's YAML
/// configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DetectConfig {
    /// Tokens per n-gram.
    #[serde(default = "DetectConfig::default_n")]
    pub n: usize,
    /// Minimum containment ratio, in `[0, 1]`, for a document to be flagged.
    #[serde(default = "DetectConfig::default_threshold")]
    pub threshold: f64,
    /// Drop stop words before building n-grams. Off by default: phrase
    /// matching needs function words.
    #[serde(default)]
    pub remove_stopwords: bool,
    /// Score corpus documents on the rayon thread pool.
    #[serde(default = "DetectConfig::default_true")]
    pub parallel: bool,
    /// Build every document trie once at detector construction instead of
    /// once per submission.
    #[serde(default = "DetectConfig::default_true")]
    pub cache_tries: bool,
    /// Upper bound, in characters, on each text fed to the LCS table.
    /// `0` disables the bound.
    #[serde(default = "DetectConfig::default_max_lcs_chars")]
    pub max_lcs_chars: usize,
    #[serde(default)]
    pub oversize_policy: OversizePolicy,
}

impl DetectConfig {
    pub(crate) fn default_n() -> usize {
        DEFAULT_N
    }

    pub(crate) fn default_threshold() -> f64 {
        0.5
    }

    pub(crate) fn default_true() -> bool {
        true
    }

    pub(crate) fn default_max_lcs_chars() -> usize {
        20_000
    }

    /// Configuration with the given window size and threshold, defaults
    /// elsewhere.
    pub fn with_params(n: usize, threshold: f64) -> Self {
        Self {
            n,
            threshold,
            ..Self::default()
        }
    }

    /// Validate the configuration before any document is touched.
    pub fn validate(&self) -> Result<(), MatchError> {
        NgramConfig::new()
            .with_n(self.n)
            .validate()
            .map_err(|NgramError::InvalidN { n }| {
                MatchError::InvalidConfig(format!("n must be >= 1 (got {n})"))
            })?;
        if !self.threshold.is_finite() || !(0.0..=1.0).contains(&self.threshold) {
            return Err(MatchError::InvalidConfig(format!(
                "threshold must be within [0, 1] (got {})",
                self.threshold
            )));
        }
        Ok(())
    }
}

impl Default for DetectConfig {
    fn default() -> Self {
        Self {
            n: Self::default_n(),
            threshold: Self::default_threshold(),
            remove_stopwords: false,
            parallel: Self::default_true(),
            cache_tries: Self::default_true(),
            max_lcs_chars: Self::default_max_lcs_chars(),
            oversize_policy: OversizePolicy::default(),
        }
    }
}

/// Read-only snapshot of the reference documents, keyed by identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Corpus(BTreeMap<String, String>);

impl Corpus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a document.
    pub fn insert(&mut self, doc_id: impl Into<String>, text: impl Into<String>) {
        self.0.insert(doc_id.into(), text.into());
    }

    pub fn get(&self, doc_id: &str) -> Option<&str> {
        self.0.get(doc_id).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(id, text)| (id.as_str(), text.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Corpus {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(id, text)| (id.into(), text.into()))
                .collect(),
        )
    }
}

impl From<BTreeMap<String, String>> for Corpus {
    fn from(map: BTreeMap<String, String>) -> Self {
        Self(map)
    }
}

impl From<HashMap<String, String>> for Corpus {
    fn from(map: HashMap<String, String>) -> Self {
        map.into_iter().collect()
    }
}

/// Flagged documents and their containment ratios, in identifier order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SimilarityResult(BTreeMap<String, f64>);

impl SimilarityResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, doc_id: impl Into<String>, ratio: f64) {
        self.0.insert(doc_id.into(), ratio);
    }

    pub fn get(&self, doc_id: &str) -> Option<f64> {
        self.0.get(doc_id).copied()
    }

    pub fn contains(&self, doc_id: &str) -> bool {
        self.0.contains_key(doc_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(id, ratio)| (id.as_str(), *ratio))
    }

    pub fn doc_ids(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> BTreeMap<String, f64> {
        self.0
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for SimilarityResult {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(id, r)| (id.into(), r)).collect())
    }
}

/// Containment detail for one scored document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentScore {
    pub doc_id: String,
    /// Input n-grams found in the document, repetitions included.
    pub matched: usize,
    /// Input n-grams in total.
    pub total: usize,
    /// `matched / total`, or 0 when the input has no n-grams.
    pub ratio: f64,
}

/// Unfiltered scores for every corpus document, before the threshold is
/// applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreSheet {
    /// Number of n-grams in the submission.
    pub input_ngrams: usize,
    /// One entry per scored document, in identifier order.
    pub scores: Vec<DocumentScore>,
    /// Documents that could not be scored, with the reason.
    pub unscored: BTreeMap<String, String>,
}

impl ScoreSheet {
    /// Keep only documents whose ratio meets `threshold`.
    pub fn into_outcome(self, threshold: f64) -> DetectOutcome {
        let documents_scored = self.scores.len();
        let result = self
            .scores
            .into_iter()
            .filter(|score| score.ratio >= threshold)
            .map(|score| (score.doc_id, score.ratio))
            .collect();
        DetectOutcome {
            result,
            unscored: self.unscored,
            input_ngrams: self.input_ngrams,
            documents_scored,
        }
    }
}

/// Everything a detection run produced.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetectOutcome {
    /// Documents meeting the threshold.
    pub result: SimilarityResult,
    /// Documents that could not be scored, with the reason.
    pub unscored: BTreeMap<String, String>,
    /// Number of n-grams in the submission.
    pub input_ngrams: usize,
    /// Number of documents that were scored, flagged or not.
    pub documents_scored: usize,
}

/// Human-readable support for a flagged document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Evidence {
    /// Longest character run shared with the submission (may be empty).
    Substring { text: String },
    /// Evidence could not be computed.
    Unavailable { reason: String },
}

impl Evidence {
    pub fn substring(text: impl Into<String>) -> Self {
        Evidence::Substring { text: text.into() }
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Evidence::Unavailable {
            reason: reason.into(),
        }
    }

    pub fn as_substring(&self) -> Option<&str> {
        match self {
            Evidence::Substring { text } => Some(text),
            Evidence::Unavailable { .. } => None,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Evidence::Substring { .. })
    }
}

impl fmt::Display for Evidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Evidence::Substring { text } => write!(f, "'{text}'"),
            Evidence::Unavailable { reason } => write!(f, "<unavailable: {reason}>"),
        }
    }
}

/// Errors produced by the detection layer.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MatchError {
    /// Invalid configuration; raised before any document is processed.
    #[error("invalid detect config: {0}")]
    InvalidConfig(String),
    /// A text exceeded a configured size bound.
    #[error("document '{doc_id}' is too large: {len} exceeds limit {max}")]
    InputTooLarge {
        doc_id: String,
        len: usize,
        max: usize,
    },
    /// Normalization stage failed.
    #[error("normalization error: {0}")]
    Canonical(#[from] CanonicalError),
    /// N-gram stage failed.
    #[error("n-gram error: {0}")]
    Ngram(#[from] NgramError),
}

impl MatchError {
    /// Attribute a normalization failure to `doc_id`.
    pub(crate) fn from_canonical(doc_id: &str, err: CanonicalError) -> Self {
        match err {
            CanonicalError::InputTooLarge { len, max } => MatchError::InputTooLarge {
                doc_id: doc_id.to_string(),
                len,
                max,
            },
            CanonicalError::InvalidConfig(msg) => MatchError::InvalidConfig(msg),
            other => MatchError::Canonical(other),
        }
    }

    /// Replace the reference placeholder in a size error with `doc_id`.
    pub(crate) fn for_document(self, doc_id: &str) -> Self {
        match self {
            MatchError::InputTooLarge {
                doc_id: placeholder,
                len,
                max,
            } if placeholder == REFERENCE_DOC_ID => MatchError::InputTooLarge {
                doc_id: doc_id.to_string(),
                len,
                max,
            },
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let cfg = DetectConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.n, 3);
        assert_eq!(cfg.threshold, 0.5);
        assert!(!cfg.remove_stopwords);
        assert_eq!(cfg.oversize_policy, OversizePolicy::Truncate);
    }

    #[test]
    fn zero_n_rejected() {
        let err = DetectConfig::with_params(0, 0.5)
            .validate()
            .expect_err("config should be invalid");
        match err {
            MatchError::InvalidConfig(msg) => assert!(msg.contains("n must be")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn out_of_range_threshold_rejected() {
        for threshold in [-0.01, 1.01, f64::NAN, f64::INFINITY] {
            let err = DetectConfig::with_params(3, threshold).validate();
            assert!(
                matches!(err, Err(MatchError::InvalidConfig(ref msg)) if msg.contains("threshold")),
                "threshold {threshold} should be rejected"
            );
        }
    }

    #[test]
    fn boundary_thresholds_accepted() {
        assert!(DetectConfig::with_params(1, 0.0).validate().is_ok());
        assert!(DetectConfig::with_params(1, 1.0).validate().is_ok());
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let cfg: DetectConfig =
            serde_json::from_str(r#"{"threshold": 0.1, "oversize_policy": "reject"}"#).unwrap();
        assert_eq!(cfg.threshold, 0.1);
        assert_eq!(cfg.n, 3);
        assert!(cfg.parallel);
        assert_eq!(cfg.oversize_policy, OversizePolicy::Reject);
    }

    #[test]
    fn corpus_from_pairs_is_ordered_by_id() {
        let corpus: Corpus = [("b.txt", "beta"), ("a.txt", "alpha")].into_iter().collect();
        let ids: Vec<&str> = corpus.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec!["a.txt", "b.txt"]);
        assert_eq!(corpus.get("a.txt"), Some("alpha"));
        assert_eq!(corpus.get("c.txt"), None);
    }

    #[test]
    fn evidence_serializes_with_kind_tag() {
        let json = serde_json::to_value(Evidence::substring("fox")).unwrap();
        assert_eq!(json["kind"], "substring");
        assert_eq!(json["text"], "fox");
    }

    #[test]
    fn score_sheet_filters_by_threshold() {
        let sheet = ScoreSheet {
            input_ngrams: 4,
            scores: vec![
                DocumentScore { doc_id: "a".into(), matched: 4, total: 4, ratio: 1.0 },
                DocumentScore { doc_id: "b".into(), matched: 1, total: 4, ratio: 0.25 },
                DocumentScore { doc_id: "c".into(), matched: 2, total: 4, ratio: 0.5 },
            ],
            unscored: BTreeMap::new(),
        };
        let outcome = sheet.into_outcome(0.5);
        assert_eq!(outcome.documents_scored, 3);
        assert_eq!(outcome.result.doc_ids().collect::<Vec<_>>(), vec!["a", "c"]);
        assert_eq!(outcome.result.get("c"), Some(0.5));
    }

    #[test]
    fn evidence_display() {
        assert_eq!(Evidence::substring("fox").to_string(), "'fox'");
        assert_eq!(
            Evidence::unavailable("too large").to_string(),
            "<unavailable: too large>"
        );
    }

    #[test]
    fn canonical_size_error_names_the_document() {
        let err = MatchError::from_canonical(
            "doc.txt",
            CanonicalError::InputTooLarge { len: 10, max: 5 },
        );
        assert_eq!(
            err,
            MatchError::InputTooLarge {
                doc_id: "doc.txt".into(),
                len: 10,
                max: 5
            }
        );
    }
}
