//! YAML configuration file support for plagscan.
//!
//! One file carries every stage configuration (normalizer, detector) plus
//! the locations the CLI reads from and writes to. Command-line flags
//! override whatever the file sets.
//!
//! ## Example YAML Configuration
//!
//! ```yaml
//! version: "1.0"
//!
//! canonical:
//!   version: 1
//!   normalize_unicode: true
//!   lowercase: true
//!   strip_punctuation: false
//!   language: english
//!   lemmatizer: suffix
//!   max_document_bytes: 1048576
//!
//! detect:
//!   n: 3
//!   threshold: 0.5
//!   remove_stopwords: false
//!   parallel: true
//!   cache_tries: true
//!   max_lcs_chars: 20000
//!   oversize_policy: truncate
//!
//! corpus:
//!   dir: data
//!   extension: txt
//!
//! archive:
//!   enabled: true
//!   dir: data
//!
//! log_level: info
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use canonical::NormalizeConfig;
use matcher::DetectConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading YAML configuration files
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),
}

/// Top-level YAML configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PlagscanConfig {
    /// Configuration format version
    pub version: String,

    #[serde(default)]
    pub canonical: NormalizeConfig,

    #[serde(default)]
    pub detect: DetectConfig,

    #[serde(default)]
    pub corpus: CorpusYamlConfig,

    #[serde(default)]
    pub archive: ArchiveYamlConfig,

    /// Default `tracing` filter when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl PlagscanConfig {
    /// Load a YAML configuration file from the given path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse YAML configuration from a string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: PlagscanConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => Ok(()),
            v => Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }?;

        self.canonical
            .validate()
            .map_err(|err| ConfigLoadError::Validation(format!("canonical: {err}")))?;
        self.detect
            .validate()
            .map_err(|err| ConfigLoadError::Validation(format!("detect: {err}")))?;
        self.corpus.validate()?;
        Ok(())
    }
}

impl Default for PlagscanConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            canonical: NormalizeConfig::default(),
            detect: DetectConfig::default(),
            corpus: CorpusYamlConfig::default(),
            archive: ArchiveYamlConfig::default(),
            log_level: default_log_level(),
        }
    }
}

/// Where reference documents are read from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusYamlConfig {
    #[serde(default = "default_data_dir")]
    pub dir: PathBuf,

    /// File extension, without the dot, of documents to load
    #[serde(default = "default_extension")]
    pub extension: String,
}

impl CorpusYamlConfig {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        if self.extension.trim().is_empty() {
            return Err(ConfigLoadError::Validation(
                "corpus.extension must not be empty".to_string(),
            ));
        }
        if self.extension.starts_with('.') {
            return Err(ConfigLoadError::Validation(
                "corpus.extension must not start with '.'".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for CorpusYamlConfig {
    fn default() -> Self {
        Self {
            dir: default_data_dir(),
            extension: default_extension(),
        }
    }
}

/// Where submissions are saved after a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchiveYamlConfig {
    #[serde(default = "true_value")]
    pub enabled: bool,

    /// Defaults to the corpus directory so later runs compare against
    /// earlier submissions.
    #[serde(default = "default_data_dir")]
    pub dir: PathBuf,
}

impl Default for ArchiveYamlConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            dir: default_data_dir(),
        }
    }
}

fn true_value() -> bool {
    true
}
fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}
fn default_extension() -> String {
    "txt".to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}
