//! Containment scoring of a submission against each corpus document.
//!
//! Every document is scored independently: normalize, window into n-grams,
//! index in a [`NgramTrie`], then count how many of the submission's n-grams
//! (repetitions included) occur in that trie. No state is shared between
//! documents, so the fan-out over the corpus can run on the rayon pool.

use std::collections::BTreeMap;

use canonical::Normalizer;
use ngram::{ngram_windows, NgramTrie};
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::types::{Corpus, DetectConfig, DocumentScore, MatchError, ScoreSheet};

/// Matched over total input n-grams.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Containment {
    pub matched: usize,
    pub total: usize,
}

impl Containment {
    /// Fraction of input n-grams found; 0 when there are none.
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.matched as f64 / self.total as f64
        }
    }
}

/// Per-document tries built once and reused across submissions.
///
/// Documents that fail normalization keep the failure reason so every later
/// submission reports them as unscored.
#[derive(Debug, Default)]
pub(crate) struct TrieCache {
    tries: BTreeMap<String, Result<NgramTrie, String>>,
}

impl TrieCache {
    pub fn build(normalizer: &Normalizer, cfg: &DetectConfig, corpus: &Corpus) -> Self {
        let entries: Vec<(&str, &str)> = corpus.iter().collect();
        let build = |(doc_id, text): (&str, &str)| {
            let trie = document_trie(normalizer, cfg, doc_id, text).map_err(|err| err.to_string());
            (doc_id.to_string(), trie)
        };
        let tries = if cfg.parallel {
            entries.into_par_iter().map(&build).collect()
        } else {
            entries.into_iter().map(&build).collect()
        };
        Self { tries }
    }

    pub fn get(&self, doc_id: &str) -> Option<&Result<NgramTrie, String>> {
        self.tries.get(doc_id)
    }

    pub fn len(&self) -> usize {
        self.tries.len()
    }

    pub fn failed(&self) -> usize {
        self.tries.values().filter(|trie| trie.is_err()).count()
    }

    /// Documents that could not be indexed, with the reason.
    pub fn failures(&self) -> BTreeMap<String, String> {
        self.tries
            .iter()
            .filter_map(|(doc_id, trie)| {
                trie.as_ref()
                    .err()
                    .map(|reason| (doc_id.clone(), reason.clone()))
            })
            .collect()
    }
}

/// Normalize `text` and index its n-grams.
pub(crate) fn document_trie(
    normalizer: &Normalizer,
    cfg: &DetectConfig,
    doc_id: &str,
    text: &str,
) -> Result<NgramTrie, MatchError> {
    let tokens = normalizer
        .normalize(text, cfg.remove_stopwords)
        .map_err(|err| MatchError::from_canonical(doc_id, err))?;
    Ok(ngram_windows(&tokens, cfg.n)?.collect())
}

/// Count the input n-grams present in `trie`.
pub(crate) fn containment<S: AsRef<str>>(input: &[&[S]], trie: &NgramTrie) -> Containment {
    let matched = input
        .iter()
        .copied()
        .filter(|gram| trie.contains(*gram))
        .count();
    Containment {
        matched,
        total: input.len(),
    }
}

/// Score `input` n-grams against every document of `corpus`.
///
/// Documents are taken from `cache` when present, otherwise indexed on the
/// fly. A document that cannot be indexed lands in
/// [`ScoreSheet::unscored`]; the others are unaffected.
pub(crate) fn score_corpus(
    normalizer: &Normalizer,
    cfg: &DetectConfig,
    corpus: &Corpus,
    cache: Option<&TrieCache>,
    input: &[&[String]],
) -> ScoreSheet {
    let entries: Vec<(&str, &str)> = corpus.iter().collect();
    let score = |(doc_id, text): (&str, &str)| {
        let scored = match cache.and_then(|cache| cache.get(doc_id)) {
            Some(Ok(trie)) => Ok(to_score(doc_id, containment(input, trie))),
            Some(Err(reason)) => Err(reason.clone()),
            None => document_trie(normalizer, cfg, doc_id, text)
                .map(|trie| to_score(doc_id, containment(input, &trie)))
                .map_err(|err| err.to_string()),
        };
        (doc_id.to_string(), scored)
    };

    let results: Vec<(String, Result<DocumentScore, String>)> = if cfg.parallel {
        entries.into_par_iter().map(&score).collect()
    } else {
        entries.into_iter().map(&score).collect()
    };

    let mut sheet = ScoreSheet {
        input_ngrams: input.len(),
        scores: Vec::with_capacity(results.len()),
        unscored: BTreeMap::new(),
    };
    for (doc_id, scored) in results {
        match scored {
            Ok(score) => {
                debug!(
                    doc_id = %score.doc_id,
                    matched = score.matched,
                    total = score.total,
                    ratio = score.ratio,
                    "document_scored"
                );
                sheet.scores.push(score);
            }
            Err(reason) => {
                warn!(doc_id = %doc_id, error = %reason, "document_unscored");
                sheet.unscored.insert(doc_id, reason);
            }
        }
    }
    sheet
}

fn to_score(doc_id: &str, containment: Containment) -> DocumentScore {
    DocumentScore {
        doc_id: doc_id.to_string(),
        matched: containment.matched,
        total: containment.total,
        ratio: containment.ratio(),
    }
}
