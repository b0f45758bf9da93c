//! Text normalization layer for plagscan.
//!
//! Turns raw text into the ordered token sequence that the n-gram stage
//! consumes. Each step is a pluggable capability:
//!
//! - [`Tokenizer`]: language-aware word boundary splitting
//! - [`StopwordFilter`]: fixed per-language function-word vocabulary
//! - [`Lemmatizer`]: context-free mapping of a token to its base form
//!
//! [`Normalizer`] chains them. The bundled implementations
//! ([`UnicodeWordTokenizer`], [`StopwordList`], [`SuffixLemmatizer`]) cover
//! English; other languages or dictionary lemmatizers are supplied by the
//! caller through [`Normalizer::with_capabilities`].
//!
//! ## Pure function guarantee
//!
//! No I/O, no clock, no locale. The same text and config produce the same
//! tokens on any machine.
//!
//! ## Example
//!
//! ```
//! use canonical::{NormalizeConfig, Normalizer};
//!
//! let normalizer = Normalizer::from_config(&NormalizeConfig::default()).unwrap();
//! let tokens = normalizer.normalize("The foxes jumped.", false).unwrap();
//! assert_eq!(tokens, vec!["the", "fox", "jumped", "."]);
//!
//! let content = normalizer.normalize("The foxes jumped.", true).unwrap();
//! assert_eq!(content, vec!["fox", "jumped", "."]);
//! ```

mod config;
mod error;
mod lemmatize;
mod normalizer;
mod stopwords;
mod token;
mod tokenizer;

pub use crate::config::{LemmatizerKind, NormalizeConfig, DEFAULT_MAX_DOCUMENT_BYTES};
pub use crate::error::CanonicalError;
pub use crate::lemmatize::{IdentityLemmatizer, Lemmatizer, SuffixLemmatizer};
pub use crate::normalizer::Normalizer;
pub use crate::stopwords::{StopwordFilter, StopwordList};
pub use crate::token::Token;
pub use crate::tokenizer::{Tokenizer, UnicodeWordTokenizer};
