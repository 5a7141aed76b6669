//! TOML file configuration.
//!
//! A single config file covers every stage: `[analysis]`, `[compression]`,
//! `[tokenization]`, `[reference]`, and `[output]`. Each section falls back
//! to its defaults when omitted, and the whole file is validated in one pass
//! at load time; configuration is never partially applied.
//!
//! ```toml
//! [analysis]
//! mode = "diff"
//! window = 50
//! step = 10
//! log_base = 2.0
//!
//! [compression]
//! algorithm = "lzma"
//!
//! [tokenization]
//! method = "legacy"
//!
//! [reference]
//! human_path = "data/human_reference.json"
//! synthetic_path = "data/synthetic_reference.json"
//! smoothing_k = 0.5
//! unknown_prob = 1e-10
//!
//! [output]
//! data_dir = "results"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use analysis::{AnalysisConfig, AnalysisError, AnalysisMode, CompressionAlgorithm};
use reference::ReferenceError;
use tokenize::TokenizeConfig;

/// Errors raised while loading or validating a config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error(transparent)]
    Reference(#[from] ReferenceError),
}

/// Top-level file configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct EntroscopeConfig {
    pub analysis: AnalysisSection,
    pub compression: CompressionSection,
    pub tokenization: TokenizeConfig,
    pub reference: ReferenceSection,
    pub output: OutputSection,
}

/// `[analysis]` section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnalysisSection {
    pub mode: AnalysisMode,
    pub window: usize,
    pub step: usize,
    pub log_base: f64,
}

impl Default for AnalysisSection {
    fn default() -> Self {
        Self {
            mode: AnalysisMode::Raw,
            window: 50,
            step: 10,
            log_base: std::f64::consts::E,
        }
    }
}

/// `[compression]` section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct CompressionSection {
    pub algorithm: CompressionAlgorithm,
}

/// `[reference]` section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ReferenceSection {
    /// Persisted human-anchored reference model.
    pub human_path: Option<PathBuf>,
    /// Persisted synthetic-anchored reference model.
    pub synthetic_path: Option<PathBuf>,
    /// Add-k smoothing applied when building reference models.
    pub smoothing_k: f64,
    /// Out-of-vocabulary floor used in diff mode.
    pub unknown_prob: f64,
}

impl Default for ReferenceSection {
    fn default() -> Self {
        Self {
            human_path: None,
            synthetic_path: None,
            smoothing_k: 0.0,
            unknown_prob: 1e-10,
        }
    }
}

/// `[output]` section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputSection {
    pub data_dir: PathBuf,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("results"),
        }
    }
}

impl EntroscopeConfig {
    /// Load and validate a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        let cfg: Self = toml::from_str(&raw)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Validate every section; the first offending value is reported.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.analysis_config().validate()?;
        let k = self.reference.smoothing_k;
        if !k.is_finite() || k < 0.0 {
            return Err(ConfigError::Reference(ReferenceError::InvalidSmoothing {
                k,
            }));
        }
        Ok(())
    }

    /// Flatten the file sections into the analyzer's configuration.
    pub fn analysis_config(&self) -> AnalysisConfig {
        AnalysisConfig::new()
            .with_mode(self.analysis.mode)
            .with_window_size(self.analysis.window)
            .with_step(self.analysis.step)
            .with_log_base(self.analysis.log_base)
            .with_compression(self.compression.algorithm)
            .with_unknown_prob(self.reference.unknown_prob)
    }
}
