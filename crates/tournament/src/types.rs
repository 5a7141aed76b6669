use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use analysis::AnalysisError;

/// Ground-truth label of a document set.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DocLabel {
    Human,
    Ai,
}

impl fmt::Display for DocLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocLabel::Human => f.write_str("human"),
            DocLabel::Ai => f.write_str("ai"),
        }
    }
}

/// A tokenized document ready for comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub filename: String,
    pub tokens: Vec<String>,
}

impl Document {
    pub fn new(filename: impl Into<String>, tokens: Vec<String>) -> Self {
        Self {
            filename: filename.into(),
            tokens,
        }
    }
}

/// One per-window comparison row.
///
/// `delta_h` is the difference in mean surprisal between the human-anchored
/// and synthetic-anchored references (human minus synthetic, exactly as
/// computed); `burstiness` is the surprisal variance against the
/// human-anchored reference.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TournamentRecord {
    pub filename: String,
    pub window_id: usize,
    pub label: DocLabel,
    pub delta_h: f64,
    pub burstiness: f64,
}

/// Errors raised by the tournament comparator.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TournamentError {
    /// The two reference evaluations disagree on window count. Positional
    /// pairing would be corrupt, so the document's comparison is aborted.
    #[error(
        "window count mismatch for {filename}: {human_windows} windows against the human \
         reference vs {synthetic_windows} against the synthetic reference"
    )]
    WindowCountMismatch {
        filename: String,
        human_windows: usize,
        synthetic_windows: usize,
    },

    #[error(transparent)]
    Analysis(#[from] AnalysisError),
}
