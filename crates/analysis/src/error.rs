use thiserror::Error;

/// Errors raised by window analysis.
///
/// All variants are deterministic given their inputs; none of them is worth
/// retrying.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("window_size must be >= 1 (got {window_size})")]
    InvalidWindowSize { window_size: usize },

    #[error("step must be >= 1 (got {step})")]
    InvalidStep { step: usize },

    #[error("log_base must be finite, > 0, and != 1 (got {log_base})")]
    InvalidLogBase { log_base: f64 },

    #[error("unknown_prob must be finite and > 0 (got {unknown_prob})")]
    InvalidUnknownProb { unknown_prob: f64 },

    #[error("unknown analysis mode: {0} (expected raw or diff)")]
    UnknownMode(String),

    #[error("unknown compression algorithm: {0} (expected lzma, gzip, bz2, or zlib)")]
    UnknownCompression(String),

    #[error("diff mode requires a reference model")]
    MissingReference,

    #[error("compression failed: {0}")]
    Compression(String),
}
