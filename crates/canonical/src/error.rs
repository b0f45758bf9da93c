use thiserror::Error;

/// Errors that can occur while normalizing text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CanonicalError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("unsupported normalization language '{0}'")]
    UnsupportedLanguage(String),
    #[error("document is {len} bytes; limit is {max}")]
    InputTooLarge { len: usize, max: usize },
}
