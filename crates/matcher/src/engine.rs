use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use canonical::{NormalizeConfig, Normalizer};
use ngram::ngram_windows;
use rayon::prelude::*;
use tracing::{debug, info, warn, Level};

use crate::lcs::{bounded_longest_common_substring, LcsBound};
use crate::metrics::DetectMetrics;
use crate::report::{render_outcome, Report};
use crate::scorer::{score_corpus, TrieCache};
use crate::types::{
    Corpus, DetectConfig, DetectOutcome, Evidence, MatchError, ScoreSheet, SimilarityResult,
    INPUT_DOC_ID,
};


/// Compares submissions against one immutable corpus snapshot.
///
/// The corpus, configuration, and normalizer are fixed at construction.
/// Every call is independent, so one `Detector` can serve concurrent
/// submissions; reloading the corpus means building a new detector.
pub struct Detector {
    corpus: Arc<Corpus>,
    cfg: DetectConfig,
    normalizer: Normalizer,
    cache: Option<TrieCache>,
    metrics: Option<Arc<dyn DetectMetrics>>,
}

impl Detector {
    /// Construct a detector with the default English normalizer.
    pub fn new(corpus: impl Into<Arc<Corpus>>, cfg: DetectConfig) -> Result<Self, MatchError> {
        let normalizer = Normalizer::from_config(&NormalizeConfig::default())?;
        Self::with_normalizer(corpus, cfg, normalizer)
    }

    /// Construct a detector with an explicit normalizer.
    ///
    /// The configuration is validated before any document is read. With
    /// `cache_tries` set, every document trie is built here.
    pub fn with_normalizer(
        corpus: impl Into<Arc<Corpus>>,
        cfg: DetectConfig,
        normalizer: Normalizer,
    ) -> Result<Self, MatchError> {
        cfg.validate()?;
        let corpus = corpus.into();
        let cache = if cfg.cache_tries {
            let start = Instant::now();
            let cache = TrieCache::build(&normalizer, &cfg, &corpus);
            info!(
                documents = cache.len(),
                failed = cache.failed(),
                elapsed_micros = start.elapsed().as_micros(),
                "trie_cache_built"
            );
            Some(cache)
        } else {
            None
        };
        Ok(Self {
            corpus,
            cfg,
            normalizer,
            cache,
            metrics: None,
        })
    }

    /// Attach a metrics observer.
    pub fn with_metrics(mut self, recorder: Arc<dyn DetectMetrics>) -> Self {
        self.metrics = Some(recorder);
        self
    }

    pub fn config(&self) -> &DetectConfig {
        &self.cfg
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    /// Containment ratio of `input_text` against every document, unfiltered.
    ///
    /// Fails only when the submission itself cannot be normalized; document
    /// failures are listed in [`ScoreSheet::unscored`]. A submission with no
    /// n-grams touches no document: the sheet is empty apart from failures
    /// already recorded in the trie cache.
    pub fn score_all(&self, input_text: &str) -> Result<ScoreSheet, MatchError> {
        let tokens = self
            .normalizer
            .normalize(input_text, self.cfg.remove_stopwords)
            .map_err(|err| MatchError::from_canonical(INPUT_DOC_ID, err))?;
        let input: Vec<&[String]> = ngram_windows(&tokens, self.cfg.n)?.collect();
        if input.is_empty() {
            debug!(tokens = tokens.len(), "input_without_ngrams");
            return Ok(ScoreSheet {
                input_ngrams: 0,
                scores: Vec::new(),
                unscored: self
                    .cache
                    .as_ref()
                    .map(TrieCache::failures)
                    .unwrap_or_default(),
            });
        }
        Ok(score_corpus(
            &self.normalizer,
            &self.cfg,
            &self.corpus,
            self.cache.as_ref(),
            &input,
        ))
    }

    /// Documents whose containment ratio meets the threshold.
    ///
    /// A submission with no n-grams (empty, or shorter than `n` tokens)
    /// yields an empty result, whatever the threshold.
    pub fn detect(&self, input_text: &str) -> Result<DetectOutcome, MatchError> {
        let start = Instant::now();
        let span = tracing::span!(
            Level::INFO,
            "matcher.detect",
            documents = self.corpus.len(),
            n = self.cfg.n,
            threshold = self.cfg.threshold
        );
        let _guard = span.enter();

        let sheet = match self.score_all(input_text) {
            Ok(sheet) => sheet,
            Err(err) => {
                warn!(error = %err, elapsed_micros = start.elapsed().as_micros(), "detect_failure");
                return Err(err);
            }
        };
        let outcome = sheet.into_outcome(self.cfg.threshold);
        let latency = start.elapsed();
        info!(
            input_ngrams = outcome.input_ngrams,
            scored = outcome.documents_scored,
            flagged = outcome.result.len(),
            unscored = outcome.unscored.len(),
            elapsed_micros = latency.as_micros(),
            "detect_success"
        );
        if let Some(recorder) = &self.metrics {
            recorder.record_detect(
                latency,
                outcome.documents_scored,
                outcome.result.len(),
                outcome.unscored.len(),
            );
        }
        Ok(outcome)
    }

    /// Longest common substring between `input_text` and each document in
    /// `result`, computed on the raw texts.
    ///
    /// Never fails as a whole: a document missing from the corpus or over
    /// the LCS bound gets [`Evidence::Unavailable`].
    pub fn explain(&self, input_text: &str, result: &SimilarityResult) -> BTreeMap<String, Evidence> {
        let start = Instant::now();
        let bound = LcsBound::new(self.cfg.max_lcs_chars, self.cfg.oversize_policy);
        let flagged: Vec<&str> = result.doc_ids().collect();
        let evidence_for = |doc_id: &str| {
            let evidence = match self.corpus.get(doc_id) {
                Some(text) => match bounded_longest_common_substring(input_text, text, bound) {
                    Ok(lcs) => Evidence::substring(lcs),
                    Err(err) => {
                        let err = err.for_document(doc_id);
                        warn!(doc_id = %doc_id, error = %err, "evidence_unavailable");
                        Evidence::unavailable(err.to_string())
                    }
                },
                None => Evidence::unavailable("document is not in the corpus"),
            };
            (doc_id.to_string(), evidence)
        };

        let evidence: BTreeMap<String, Evidence> = if self.cfg.parallel {
            flagged.into_par_iter().map(&evidence_for).collect()
        } else {
            flagged.into_iter().map(&evidence_for).collect()
        };

        if let Some(recorder) = &self.metrics {
            let unavailable = evidence.values().filter(|ev| !ev.is_available()).count();
            recorder.record_explain(start.elapsed(), evidence.len(), unavailable);
        }
        evidence
    }

    /// Detect and explain in one pass.
    pub fn report(&self, input_text: &str) -> Result<Report, MatchError> {
        let outcome = self.detect(input_text)?;
        let evidence = self.explain(input_text, &outcome.result);
        Ok(Report::from_outcome(&outcome, &evidence))
    }

    /// Detect, explain, and render the text report.
    pub fn run(&self, input_text: &str) -> Result<String, MatchError> {
        let outcome = self.detect(input_text)?;
        let evidence = self.explain(input_text, &outcome.result);
        Ok(render_outcome(&outcome, &evidence))
    }
}

impl std::fmt::Debug for Detector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Detector")
            .field("documents", &self.corpus.len())
            .field("cfg", &self.cfg)
            .field("cached", &self.cache.is_some())
            .finish_non_exhaustive()
    }
}

/// One-shot detection with the default normalizer.
///
/// Builds no trie cache; use a [`Detector`] to score several submissions
/// against the same corpus.
pub fn detect(
    input_text: &str,
    corpus: &Corpus,
    n: usize,
    threshold: f64,
) -> Result<SimilarityResult, MatchError> {
    let cfg = DetectConfig {
        cache_tries: false,
        ..DetectConfig::with_params(n, threshold)
    };
    Ok(Detector::new(corpus.clone(), cfg)?.detect(input_text)?.result)
}

/// One-shot evidence for every document in `result`, with the default LCS
/// bound.
pub fn explain(
    input_text: &str,
    corpus: &Corpus,
    result: &SimilarityResult,
) -> Result<BTreeMap<String, Evidence>, MatchError> {
    let cfg = DetectConfig {
        cache_tries: false,
        ..DetectConfig::default()
    };
    Ok(Detector::new(corpus.clone(), cfg)?.explain(input_text, result))
}
