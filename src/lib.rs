//! Workspace umbrella crate for plagscan.
//!
//! Re-exports the normalization, n-gram, and matcher layers and adds what a
//! front end needs around them: YAML configuration, corpus loading from a
//! directory, and archiving of submissions.

pub mod archive;
pub mod config;
pub mod corpus;

pub use canonical::{
    CanonicalError, IdentityLemmatizer, Lemmatizer, LemmatizerKind, NormalizeConfig, Normalizer,
    StopwordFilter, StopwordList, SuffixLemmatizer, Token, Tokenizer, UnicodeWordTokenizer,
};
pub use matcher::{
    bounded_longest_common_substring, detect, explain, longest_common_substring, render_outcome,
    render_report, Corpus, DetectConfig, DetectMetrics, DetectOutcome, Detector, DocumentScore,
    Evidence, FlaggedDocument, LcsBound, MatchError, OversizePolicy, Report, ScoreSheet,
    SimilarityResult, SkippedDocument, NO_PLAGIARISM,
};
pub use ngram::{ngram_windows, ngrams, Ngram, NgramConfig, NgramError, NgramTrie};

pub use crate::archive::{save_submission, submission_file_name, ArchiveError};
pub use crate::config::{ArchiveYamlConfig, ConfigLoadError, CorpusYamlConfig, PlagscanConfig};
pub use crate::corpus::{load_corpus, CorpusError};

use thiserror::Error;
use tracing::warn;

/// Errors that can occur while assembling a detector from configuration.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("configuration failure: {0}")]
    Config(#[from] ConfigLoadError),
    #[error("normalizer setup failed: {0}")]
    Canonical(#[from] CanonicalError),
    #[error("corpus load failed: {0}")]
    Corpus(#[from] CorpusError),
    #[error("detection failed: {0}")]
    Match(#[from] MatchError),
}

/// Build a [`Detector`] over `corpus` from a validated configuration.
pub fn detector_from_config(
    cfg: &PlagscanConfig,
    corpus: Corpus,
) -> Result<Detector, PipelineError> {
    cfg.validate()?;
    let normalizer = Normalizer::from_config(&cfg.canonical)?;
    Ok(Detector::with_normalizer(
        corpus,
        cfg.detect.clone(),
        normalizer,
    )?)
}

/// Load the configured corpus directory and build a [`Detector`] over it.
///
/// A corpus directory that does not exist yet is an empty corpus: the first
/// archived submission creates it.
pub fn load_detector(cfg: &PlagscanConfig) -> Result<Detector, PipelineError> {
    let corpus = match load_corpus(&cfg.corpus.dir, &cfg.corpus.extension) {
        Ok(corpus) => corpus,
        Err(CorpusError::MissingDirectory { path }) => {
            warn!(dir = %path.display(), "corpus_dir_missing");
            Corpus::new()
        }
        Err(err) => return Err(err.into()),
    };
    detector_from_config(cfg, corpus)
}
