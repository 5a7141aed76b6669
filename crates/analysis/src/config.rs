//! Analysis configuration.
//!
//! The configuration is an explicit, validated struct constructed once at
//! the boundary and passed into pure functions; no defaults are resolved at
//! lookup time inside the metric code.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::compress::CompressionAlgorithm;
use crate::error::AnalysisError;
use crate::metrics::{validate_log_base, validate_unknown_prob};

/// Which per-window metric set to compute.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisMode {
    /// Window-internal entropy; no reference model needed.
    #[default]
    Raw,
    /// Surprisal against a reference model.
    Diff,
}

impl fmt::Display for AnalysisMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisMode::Raw => f.write_str("raw"),
            AnalysisMode::Diff => f.write_str("diff"),
        }
    }
}

impl FromStr for AnalysisMode {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "raw" => Ok(AnalysisMode::Raw),
            "diff" => Ok(AnalysisMode::Diff),
            other => Err(AnalysisError::UnknownMode(other.to_string())),
        }
    }
}

/// Windowing and metric parameters for one analysis pass.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisConfig {
    /// Metric set to compute per window.
    pub mode: AnalysisMode,
    /// Tokens per window.
    pub window_size: usize,
    /// Offset between consecutive window starts.
    pub step: usize,
    /// Logarithm base for entropy and surprisal. Must be > 0 and != 1.
    pub log_base: f64,
    /// Compressor for the per-window compression ratio.
    pub compression: CompressionAlgorithm,
    /// Probability assigned to out-of-vocabulary tokens in diff mode.
    ///
    /// This is distinct from the in-table smoothing floor: smoothing shapes
    /// probabilities of observed tokens at model-build time, while this
    /// floor covers tokens the model has never seen.
    pub unknown_prob: f64,
}

impl AnalysisConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mode(mut self, mode: AnalysisMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_window_size(mut self, window_size: usize) -> Self {
        self.window_size = window_size;
        self
    }

    pub fn with_step(mut self, step: usize) -> Self {
        self.step = step;
        self
    }

    pub fn with_log_base(mut self, log_base: f64) -> Self {
        self.log_base = log_base;
        self
    }

    pub fn with_compression(mut self, compression: CompressionAlgorithm) -> Self {
        self.compression = compression;
        self
    }

    pub fn with_unknown_prob(mut self, unknown_prob: f64) -> Self {
        self.unknown_prob = unknown_prob;
        self
    }

    /// Validate every numeric parameter, never partially.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.window_size == 0 {
            return Err(AnalysisError::InvalidWindowSize {
                window_size: self.window_size,
            });
        }
        if self.step == 0 {
            return Err(AnalysisError::InvalidStep { step: self.step });
        }
        validate_log_base(self.log_base)?;
        validate_unknown_prob(self.unknown_prob)?;
        Ok(())
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            mode: AnalysisMode::Raw,
            window_size: 50,
            step: 10,
            log_base: std::f64::consts::E,
            compression: CompressionAlgorithm::default(),
            unknown_prob: 1e-10,
        }
    }
}
