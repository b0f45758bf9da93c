//! Token lemmatization.
//!
//! Lemmatizers are context-free: the same token always maps to the same base
//! form. [`SuffixLemmatizer`] only folds regular English plurals; callers that
//! need dictionary-grade lemmas plug their own [`Lemmatizer`] into
//! [`Normalizer::with_capabilities`](crate::Normalizer::with_capabilities).

use crate::config::LemmatizerKind;

/// Maps a token to its normalized base form.
pub trait Lemmatizer: Send + Sync {
    fn lemmatize(&self, token: &str) -> String;
}

/// Returns every token unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IdentityLemmatizer;

impl Lemmatizer for IdentityLemmatizer {
    fn lemmatize(&self, token: &str) -> String {
        token.to_string()
    }
}

/// Strips regular English plural suffixes.
///
/// `stories → story`, `foxes → fox`, `churches → church`, `dogs → dog`.
/// Tokens of three characters or fewer, non-alphabetic tokens, and words
/// ending in `ss`, `us` or `is` are left alone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SuffixLemmatizer;

const INVARIANT: &[&str] = &[
    "afterwards", "always", "besides", "news", "perhaps", "series", "sometimes", "species",
    "this", "thus", "towards", "whereas",
];

impl Lemmatizer for SuffixLemmatizer {
    fn lemmatize(&self, token: &str) -> String {
        let chars = token.chars().count();
        if chars <= 3 || !token.chars().all(char::is_alphabetic) {
            return token.to_string();
        }
        let lower = token.to_lowercase();
        if INVARIANT.contains(&lower.as_str()) {
            return token.to_string();
        }
        if lower.ends_with("ss") || lower.ends_with("us") || lower.ends_with("is") {
            return token.to_string();
        }
        if chars > 4 && lower.ends_with("ies") {
            let stem = &token[..token.len() - 3];
            let y = if token.ends_with("IES") { "Y" } else { "y" };
            return format!("{stem}{y}");
        }
        if ["sses", "xes", "zes", "ches", "shes"]
            .iter()
            .any(|suffix| lower.ends_with(suffix))
        {
            return token[..token.len() - 2].to_string();
        }
        if lower.ends_with('s') {
            return token[..token.len() - 1].to_string();
        }
        token.to_string()
    }
}

pub(crate) fn lemmatizer_for(kind: LemmatizerKind) -> Box<dyn Lemmatizer> {
    match kind {
        LemmatizerKind::Identity => Box::new(IdentityLemmatizer),
        LemmatizerKind::Suffix => Box::new(SuffixLemmatizer),
    }
}
