//! Sliding-window n-gram generation over a normalized token stream.
//!
//! Runs in O(len) windows. The caller must provide **normalized tokens in
//! order**; no tokenization happens here.

use std::fmt;
use std::slice::Windows;

use serde::{Deserialize, Serialize};

use crate::config::NgramError;

/// An ordered, fixed-length sequence of tokens.
///
/// Two n-grams are equal iff every position holds the same token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Ngram(Box<[String]>);

impl Ngram {
    pub fn new<S: AsRef<str>>(tokens: &[S]) -> Self {
        Self(tokens.iter().map(|t| t.as_ref().to_string()).collect())
    }

    pub fn tokens(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[String]> for Ngram {
    fn as_ref(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for Ngram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(" "))
    }
}

/// Borrowing iterator over every contiguous window of `n` tokens.
///
/// Yields windows starting at offsets `0..=len - n` in order, or nothing when
/// `len < n`. `n == 0` is rejected.
pub fn ngram_windows<S>(tokens: &[S], n: usize) -> Result<Windows<'_, S>, NgramError> {
    if n == 0 {
        return Err(NgramError::InvalidN { n });
    }
    Ok(tokens.windows(n))
}

/// Collect every window of `n` tokens into owned [`Ngram`] values.
pub fn ngrams<S: AsRef<str>>(tokens: &[S], n: usize) -> Result<Vec<Ngram>, NgramError> {
    let windows = ngram_windows(tokens, n)?;
    let mut out = Vec::with_capacity(tokens.len().saturating_sub(n - 1));
    out.extend(windows.map(Ngram::new));
    Ok(out)
}
