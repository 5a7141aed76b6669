use thiserror::Error;

/// Errors raised while building a reference model.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ReferenceError {
    #[error("smoothing_k must be finite and >= 0 (got {k})")]
    InvalidSmoothing { k: f64 },
}
