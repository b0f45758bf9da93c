//! Configuration and error types for n-gram generation.
//!
//! Free of I/O and environment-dependent behavior, so n-gram generation is a
//! pure function of `(tokens, config)`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default window size in tokens.
pub const DEFAULT_N: usize = 3;

/// Window configuration for the n-gram generator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NgramConfig {
    /// Number of tokens per n-gram.
    ///
    /// Larger values demand longer verbatim runs before two documents are
    /// considered overlapping; smaller values are more tolerant to edits.
    #[serde(default = "NgramConfig::default_n")]
    pub n: usize,
}

impl NgramConfig {
    fn default_n() -> usize {
        DEFAULT_N
    }

    pub fn new() -> Self {
        Self::default()
    }

    /// Set the window size.
    pub fn with_n(mut self, n: usize) -> Self {
        self.n = n;
        self
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), NgramError> {
        if self.n < 1 {
            return Err(NgramError::InvalidN { n: self.n });
        }
        Ok(())
    }
}

impl Default for NgramConfig {
    fn default() -> Self {
        Self { n: DEFAULT_N }
    }
}

/// Errors returned by n-gram generation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NgramError {
    #[error("invalid config: n must be >= 1 (got {n})")]
    InvalidN { n: usize },
}
