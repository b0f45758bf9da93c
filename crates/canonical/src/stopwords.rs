//! Stop-word filtering against a fixed per-language vocabulary.

use std::borrow::Cow;
use std::collections::HashSet;

use crate::error::CanonicalError;

/// Decides whether a token is a function word to be dropped.
pub trait StopwordFilter: Send + Sync {
    fn is_stopword(&self, token: &str) -> bool;
}

const ENGLISH: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're", "you've",
    "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself",
    "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself", "they", "them",
    "their", "theirs", "themselves", "what", "which", "who", "whom", "this", "that", "that'll",
    "these", "those", "am", "is", "are", "was", "were", "be", "been", "being", "have", "has",
    "had", "having", "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or",
    "because", "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below", "to", "from",
    "up", "down", "in", "out", "on", "off", "over", "under", "again", "further", "then", "once",
    "here", "there", "when", "where", "why", "how", "all", "any", "both", "each", "few", "more",
    "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than",
    "too", "very", "s", "t", "can", "will", "just", "don", "don't", "should", "should've", "now",
    "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't", "didn",
    "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't", "haven", "haven't", "isn",
    "isn't", "ma", "mightn", "mightn't", "mustn", "mustn't", "needn", "needn't", "shan",
    "shan't", "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't",
    "wouldn", "wouldn't",
];

fn vocabulary(language: &str) -> Option<&'static [&'static str]> {
    match language.trim().to_ascii_lowercase().as_str() {
        "english" | "en" => Some(ENGLISH),
        _ => None,
    }
}

pub(crate) fn is_supported_language(language: &str) -> bool {
    vocabulary(language).is_some()
}

/// Stop-word vocabulary for one language. Lookups are case-insensitive.
#[derive(Debug, Clone)]
pub struct StopwordList {
    words: HashSet<&'static str>,
}

impl StopwordList {
    /// The bundled English vocabulary.
    pub fn english() -> Self {
        Self {
            words: ENGLISH.iter().copied().collect(),
        }
    }

    pub fn for_language(language: &str) -> Result<Self, CanonicalError> {
        let words = vocabulary(language)
            .ok_or_else(|| CanonicalError::UnsupportedLanguage(language.to_string()))?;
        Ok(Self {
            words: words.iter().copied().collect(),
        })
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl StopwordFilter for StopwordList {
    fn is_stopword(&self, token: &str) -> bool {
        let key: Cow<str> = if token.chars().any(char::is_uppercase) {
            Cow::Owned(token.to_lowercase())
        } else {
            Cow::Borrowed(token)
        };
        self.words.contains(key.as_ref())
    }
}
