//! # Entroscope Window Analysis
//!
//! This crate turns a token sequence into a deterministic series of
//! per-window statistics: Shannon entropy, surprisal against a reference
//! model, a byte-compression ratio, and a lexical-uniqueness ratio.
//!
//! ## Contract
//!
//! - Every entry point is a pure function of `(tokens, config)` (plus an
//!   optional [`reference::ReferenceTable`] in diff mode) with no I/O and no
//!   process-global state.
//! - Segmentation is positional: window `i` always covers the same token
//!   offsets for the same `(window_size, step)`, so records produced against
//!   different reference models pair up index-by-index.
//! - For identical inputs and configuration the output is bit-identical,
//!   including every floating-point value.
//!
//! ## Modes
//!
//! - **raw** — per-window Shannon entropy plus the variance of each token's
//!   self-information under the window's own empirical distribution.
//! - **diff** — mean and population variance of per-token surprisal against
//!   a supplied reference model; out-of-vocabulary tokens fall back to a
//!   configurable floor probability.
//!
//! Both modes also report a compression ratio (window text under one of four
//! general-purpose compressors) and the distinct-token ratio.

pub mod analyzer;
pub mod compress;
pub mod config;
pub mod error;
pub mod metrics;
pub mod window;

pub use crate::analyzer::{analyze_tokens, analyze_tokens_batch, WindowRecord};
pub use crate::compress::{compression_ratio, CompressionAlgorithm};
pub use crate::config::{AnalysisConfig, AnalysisMode};
pub use crate::error::AnalysisError;
pub use crate::metrics::{
    entropy_variance, shannon_entropy, surprisal_stats, token_surprisal, unique_ratio, EPSILON,
};
pub use crate::window::{window_count, windows, Windows};
