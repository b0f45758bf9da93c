//! Word-boundary tokenization.
//!
//! [`UnicodeWordTokenizer`] splits text on UAX #29 word boundaries. Whitespace
//! runs are discarded and punctuation becomes standalone tokens, so
//! `"fox, jumps"` yields `["fox", ",", "jumps"]`. Offsets point into the text
//! after optional NFKC normalization, before lowercasing.

use std::borrow::Cow;

use unicode_categories::UnicodeCategories;
use unicode_normalization::UnicodeNormalization;
use unicode_segmentation::UnicodeSegmentation;

use crate::config::NormalizeConfig;
use crate::token::Token;

/// Splits raw text into an ordered sequence of tokens.
pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> Vec<Token>;
}

/// Default tokenizer backed by `unicode-segmentation`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnicodeWordTokenizer {
    pub normalize_unicode: bool,
    pub lowercase: bool,
    pub strip_punctuation: bool,
}

impl UnicodeWordTokenizer {
    pub fn from_config(cfg: &NormalizeConfig) -> Self {
        Self {
            normalize_unicode: cfg.normalize_unicode,
            lowercase: cfg.lowercase,
            strip_punctuation: cfg.strip_punctuation,
        }
    }
}

impl Default for UnicodeWordTokenizer {
    fn default() -> Self {
        Self::from_config(&NormalizeConfig::default())
    }
}

impl Tokenizer for UnicodeWordTokenizer {
    fn tokenize(&self, text: &str) -> Vec<Token> {
        // Normalization can change character boundaries, so it runs first.
        let normalized: Cow<str> = if self.normalize_unicode {
            Cow::Owned(text.nfkc().collect::<String>())
        } else {
            Cow::Borrowed(text)
        };

        let mut tokens = Vec::with_capacity((normalized.len() / 5).saturating_add(1));
        for (start, segment) in normalized.split_word_bound_indices() {
            if segment.chars().all(char::is_whitespace) {
                continue;
            }
            if self.strip_punctuation && segment.chars().all(|c| c.is_punctuation()) {
                continue;
            }
            let text = if self.lowercase {
                segment.to_lowercase()
            } else {
                segment.to_string()
            };
            tokens.push(Token {
                text,
                start,
                end: start + segment.len(),
            });
        }
        tokens
    }
}
