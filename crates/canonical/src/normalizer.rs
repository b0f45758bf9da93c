use std::fmt;

use crate::config::NormalizeConfig;
use crate::error::CanonicalError;
use crate::lemmatize::{lemmatizer_for, Lemmatizer};
use crate::stopwords::{StopwordFilter, StopwordList};
use crate::tokenizer::{Tokenizer, UnicodeWordTokenizer};

/// Tokenize → optional stop-word removal → lemmatize.
///
/// The three stages are trait objects so any NLP backend can be swapped in.
/// A `Normalizer` is `Send + Sync` and can be shared by scoring workers.
pub struct Normalizer {
    tokenizer: Box<dyn Tokenizer>,
    stopwords: Box<dyn StopwordFilter>,
    lemmatizer: Box<dyn Lemmatizer>,
    max_document_bytes: usize,
}

impl Normalizer {
    /// Build the default capability set described by `cfg`.
    pub fn from_config(cfg: &NormalizeConfig) -> Result<Self, CanonicalError> {
        cfg.validate()?;
        Ok(Self {
            tokenizer: Box::new(UnicodeWordTokenizer::from_config(cfg)),
            stopwords: Box::new(StopwordList::for_language(&cfg.language)?),
            lemmatizer: lemmatizer_for(cfg.lemmatizer),
            max_document_bytes: cfg.max_document_bytes,
        })
    }

    /// Assemble a normalizer from caller-supplied capabilities.
    pub fn with_capabilities(
        tokenizer: Box<dyn Tokenizer>,
        stopwords: Box<dyn StopwordFilter>,
        lemmatizer: Box<dyn Lemmatizer>,
    ) -> Self {
        Self {
            tokenizer,
            stopwords,
            lemmatizer,
            max_document_bytes: 0,
        }
    }

    /// Bound accepted documents to `max` bytes (`0` = unbounded).
    pub fn with_max_document_bytes(mut self, max: usize) -> Self {
        self.max_document_bytes = max;
        self
    }

    pub fn max_document_bytes(&self) -> usize {
        self.max_document_bytes
    }

    /// Normalize `text` into an ordered token sequence.
    ///
    /// Empty or whitespace-only text yields an empty sequence, not an error.
    /// Stop words are only removed when `remove_stopwords` is set.
    pub fn normalize(
        &self,
        text: &str,
        remove_stopwords: bool,
    ) -> Result<Vec<String>, CanonicalError> {
        if self.max_document_bytes > 0 && text.len() > self.max_document_bytes {
            return Err(CanonicalError::InputTooLarge {
                len: text.len(),
                max: self.max_document_bytes,
            });
        }

        let tokens = self.tokenizer.tokenize(text);
        let mut out = Vec::with_capacity(tokens.len());
        out.extend(
            tokens
                .iter()
                .filter(|t| !(remove_stopwords && self.stopwords.is_stopword(&t.text)))
                .map(|t| self.lemmatizer.lemmatize(&t.text)),
        );
        Ok(out)
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        let cfg = NormalizeConfig::default();
        Self {
            tokenizer: Box::new(UnicodeWordTokenizer::from_config(&cfg)),
            stopwords: Box::new(StopwordList::english()),
            lemmatizer: lemmatizer_for(cfg.lemmatizer),
            max_document_bytes: cfg.max_document_bytes,
        }
    }
}

impl fmt::Debug for Normalizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Normalizer")
            .field("max_document_bytes", &self.max_document_bytes)
            .finish_non_exhaustive()
    }
}
