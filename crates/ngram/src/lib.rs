//! # plagscan n-gram layer
//!
//! Turns a normalized token stream into overlapping n-grams and indexes them
//! in a prefix trie for containment queries.
//!
//! ## Contract
//!
//! - Consumes tokens produced by the `canonical` crate; never tokenizes or
//!   normalizes on its own.
//! - Pure functions of `(tokens, n)`: no I/O, no clocks, no global state.
//!
//! ## Pipeline
//!
//! 1. **Windows**: [`ngram_windows`] / [`ngrams`] slide a window of `n`
//!    tokens over the stream, one n-gram per start offset. Streams shorter
//!    than `n` produce nothing.
//! 2. **Index**: [`NgramTrie`] stores each n-gram as a root-to-node path.
//!    Every node counts the n-grams whose prefix ends there, so
//!    [`NgramTrie::search`] answers "how many times was this inserted" in
//!    O(n).
//!
//! ## Example
//!
//! ```
//! use ngram::{ngram_windows, NgramTrie};
//!
//! let reference = ["the", "quick", "brown", "fox", "jumps"];
//! let trie: NgramTrie = ngram_windows(&reference, 3).unwrap().collect();
//!
//! assert_eq!(trie.search(&["quick", "brown", "fox"]), 1);
//! assert_eq!(trie.search(&["lazy", "brown", "fox"]), 0);
//! ```

pub mod config;
mod generator;
mod trie;

pub use crate::config::{NgramConfig, NgramError, DEFAULT_N};
pub use crate::generator::{ngram_windows, ngrams, Ngram};
pub use crate::trie::NgramTrie;
