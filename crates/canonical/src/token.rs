use serde::{Deserialize, Serialize};

/// A raw token with its UTF-8 byte offsets in the tokenized text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Token {
    /// The token text content.
    pub text: String,
    /// Byte offset (inclusive) in the tokenized text.
    pub start: usize,
    /// Byte offset (exclusive) in the tokenized text.
    pub end: usize,
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        self.text.as_str()
    }
}
