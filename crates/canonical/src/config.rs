//! Configuration types for the normalization pipeline.
//!
//! This module defines [`NormalizeConfig`], which controls how raw text is
//! turned into the token stream the n-gram stage consumes.
//!
//! # Versioning
//!
//! The `version` field tracks behavior changes. Any change to tokenization,
//! stop-word vocabulary, or lemmatization rules must come with a version bump
//! so that scores computed under different rules are never silently mixed.
//!
//! # Examples
//!
//! ## Default Configuration
//!
//! ```rust
//! use canonical::{LemmatizerKind, NormalizeConfig};
//!
//! let config = NormalizeConfig::default();
//! assert_eq!(config.version, 1);
//! assert!(config.normalize_unicode);
//! assert!(config.lowercase);
//! assert!(!config.strip_punctuation);
//! assert_eq!(config.language, "english");
//! assert_eq!(config.lemmatizer, LemmatizerKind::Suffix);
//! ```
//!
//! ## Case-Sensitive Comparison
//!
//! ```rust
//! use canonical::NormalizeConfig;
//!
//! let config = NormalizeConfig {
//!     lowercase: false,
//!     ..Default::default()
//! };
//! assert!(config.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};

use crate::error::CanonicalError;
use crate::stopwords::is_supported_language;

/// Default upper bound on a single document, in bytes.
pub const DEFAULT_MAX_DOCUMENT_BYTES: usize = 1024 * 1024;

/// Which built-in lemmatizer [`Normalizer::from_config`](crate::Normalizer::from_config)
/// installs.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LemmatizerKind {
    /// Tokens pass through unchanged.
    Identity,
    /// Regular English plural stripping.
    #[default]
    Suffix,
}

/// Configuration for the normalization pipeline.
///
/// `NormalizeConfig` is cheap to clone and serializable so it can be embedded
/// in the YAML configuration of the CLI.
///
/// # Serialization
///
/// ```json
/// {
///   "version": 1,
///   "normalize_unicode": true,
///   "lowercase": true,
///   "strip_punctuation": false,
///   "language": "english",
///   "lemmatizer": "suffix",
///   "max_document_bytes": 1048576
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NormalizeConfig {
    /// Semantic version of the normalization rules.
    ///
    /// Must be >= 1; version 0 is reserved and rejected.
    #[serde(default = "NormalizeConfig::default_version")]
    pub version: u32,

    /// If true, apply Unicode NFKC normalization before tokenizing.
    ///
    /// With normalization enabled a composed "é" (U+00E9) and "e" followed by
    /// a combining acute accent (U+0301) produce the same token.
    #[serde(default = "default_true")]
    pub normalize_unicode: bool,

    /// If true, apply locale-free Unicode lowercasing to every token.
    #[serde(default = "default_true")]
    pub lowercase: bool,

    /// If true, punctuation tokens are dropped instead of kept as standalone
    /// tokens.
    ///
    /// With `strip_punctuation: false`:
    /// ```text
    /// "Hello, world!" → ["hello", ",", "world", "!"]
    /// ```
    /// With `strip_punctuation: true`:
    /// ```text
    /// "Hello, world!" → ["hello", "world"]
    /// ```
    #[serde(default)]
    pub strip_punctuation: bool,

    /// Language of the stop-word vocabulary. Only `"english"` (or `"en"`) is
    /// currently bundled.
    #[serde(default = "NormalizeConfig::default_language")]
    pub language: String,

    /// Lemmatizer applied to every surviving token.
    #[serde(default)]
    pub lemmatizer: LemmatizerKind,

    /// Documents larger than this many bytes are rejected with
    /// [`CanonicalError::InputTooLarge`]. `0` disables the bound.
    #[serde(default = "NormalizeConfig::default_max_document_bytes")]
    pub max_document_bytes: usize,
}

impl NormalizeConfig {
    fn default_version() -> u32 {
        1
    }

    fn default_language() -> String {
        "english".to_string()
    }

    fn default_max_document_bytes() -> usize {
        DEFAULT_MAX_DOCUMENT_BYTES
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), CanonicalError> {
        if self.version == 0 {
            return Err(CanonicalError::InvalidConfig(
                "config version must be >= 1".into(),
            ));
        }
        if !is_supported_language(&self.language) {
            return Err(CanonicalError::UnsupportedLanguage(self.language.clone()));
        }
        Ok(())
    }
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            version: Self::default_version(),
            normalize_unicode: true,
            lowercase: true,
            strip_punctuation: false,
            language: Self::default_language(),
            lemmatizer: LemmatizerKind::default(),
            max_document_bytes: Self::default_max_document_bytes(),
        }
    }
}

fn default_true() -> bool {
    true
}
