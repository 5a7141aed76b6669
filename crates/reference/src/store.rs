//! JSON persistence for reference tables.

use std::fs;
use std::io;
use std::path::Path;

use thiserror::Error;

use crate::model::ReferenceTable;

/// Errors raised while persisting or loading a reference table.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("reference file i/o failed: {0}")]
    Io(#[from] io::Error),

    #[error("failed to parse reference JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("reference probability for token {token:?} must be finite and > 0 (got {value})")]
    InvalidProbability { token: String, value: f64 },
}

/// Persist a table as a JSON object of token -> probability.
///
/// Entry order is preserved, so the same table always produces the same
/// bytes.
pub fn save_reference(table: &ReferenceTable, path: impl AsRef<Path>) -> Result<(), StoreError> {
    let json = serde_json::to_string_pretty(table)?;
    fs::write(path, json)?;
    Ok(())
}

/// Load a table persisted by [`save_reference`].
///
/// Every probability must parse as a finite float strictly greater than
/// zero; anything else is rejected rather than silently clamped.
pub fn load_reference(path: impl AsRef<Path>) -> Result<ReferenceTable, StoreError> {
    let raw = fs::read_to_string(path)?;
    let table: ReferenceTable = serde_json::from_str(&raw)?;
    for (token, value) in table.iter() {
        if !value.is_finite() || value <= 0.0 {
            return Err(StoreError::InvalidProbability {
                token: token.to_string(),
                value,
            });
        }
    }
    Ok(table)
}
