//! Sliding-window analyzer.
//!
//! Drives the segmenter and the metric functions over one token sequence and
//! tags every record with its positional window id. The batch entry point
//! segments once and evaluates any number of named reference models over the
//! identical window list, which is what makes downstream positional pairing
//! of per-reference records safe by construction.

use serde::{Deserialize, Serialize};

use reference::ReferenceTable;

use crate::compress::compression_ratio;
use crate::config::{AnalysisConfig, AnalysisMode};
use crate::error::AnalysisError;
use crate::metrics::{entropy_variance, shannon_entropy, surprisal_stats, unique_ratio};
use crate::window::windows;

/// Per-window metric record.
///
/// `window_id` is the 0-based positional index of the window within one
/// document's segmentation; it is stable across repeated runs on the same
/// input. In diff mode `mean_entropy`/`entropy_variance` hold the mean and
/// population variance of per-token surprisal against the reference.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WindowRecord {
    pub window_id: usize,
    pub mean_entropy: f64,
    pub entropy_variance: f64,
    pub compression_ratio: f64,
    pub unique_ratio: f64,
}

/// Analyze one token sequence with a sliding window.
///
/// In raw mode `reference` is ignored; in diff mode it is required and its
/// absence fails with [`AnalysisError::MissingReference`].
pub fn analyze_tokens<S: AsRef<str>>(
    tokens: &[S],
    cfg: &AnalysisConfig,
    reference: Option<&ReferenceTable>,
) -> Result<Vec<WindowRecord>, AnalysisError> {
    cfg.validate()?;
    let segmentation: Vec<&[S]> = windows(tokens, cfg.window_size, cfg.step)?.collect();
    analyze_segmentation(&segmentation, cfg, reference)
}

/// Batch analyzer: segment once, evaluate every named reference over the
/// identical windows.
///
/// Returns one `(name, records)` entry per reference, in input order. In raw
/// mode the references are ignored and a single `("raw", records)` entry is
/// returned; in diff mode at least one reference is required. Because every
/// evaluation shares one segmentation, the record sequences are guaranteed
/// to agree in window count and boundaries.
pub fn analyze_tokens_batch<S: AsRef<str>>(
    tokens: &[S],
    cfg: &AnalysisConfig,
    references: &[(&str, &ReferenceTable)],
) -> Result<Vec<(String, Vec<WindowRecord>)>, AnalysisError> {
    cfg.validate()?;
    let segmentation: Vec<&[S]> = windows(tokens, cfg.window_size, cfg.step)?.collect();
    match cfg.mode {
        AnalysisMode::Raw => Ok(vec![(
            "raw".to_string(),
            analyze_segmentation(&segmentation, cfg, None)?,
        )]),
        AnalysisMode::Diff => {
            if references.is_empty() {
                return Err(AnalysisError::MissingReference);
            }
            let mut results = Vec::with_capacity(references.len());
            for &(name, reference) in references {
                results.push((
                    name.to_string(),
                    analyze_segmentation(&segmentation, cfg, Some(reference))?,
                ));
            }
            Ok(results)
        }
    }
}

fn analyze_segmentation<S: AsRef<str>>(
    segmentation: &[&[S]],
    cfg: &AnalysisConfig,
    reference: Option<&ReferenceTable>,
) -> Result<Vec<WindowRecord>, AnalysisError> {
    let mut records = Vec::with_capacity(segmentation.len());
    for (window_id, window) in segmentation.iter().enumerate() {
        records.push(analyze_window(window_id, window, cfg, reference)?);
    }
    Ok(records)
}

fn analyze_window<S: AsRef<str>>(
    window_id: usize,
    window: &[S],
    cfg: &AnalysisConfig,
    reference: Option<&ReferenceTable>,
) -> Result<WindowRecord, AnalysisError> {
    let (mean_entropy, entropy_var) = match cfg.mode {
        AnalysisMode::Raw => (
            shannon_entropy(window, cfg.log_base)?,
            entropy_variance(window, cfg.log_base)?,
        ),
        AnalysisMode::Diff => {
            let reference = reference.ok_or(AnalysisError::MissingReference)?;
            surprisal_stats(window, reference, cfg.log_base, cfg.unknown_prob)?
        }
    };
    let window_text = join_tokens(window);
    Ok(WindowRecord {
        window_id,
        mean_entropy,
        entropy_variance: entropy_var,
        compression_ratio: compression_ratio(&window_text, cfg.compression)?,
        unique_ratio: unique_ratio(window),
    })
}

fn join_tokens<S: AsRef<str>>(window: &[S]) -> String {
    let mut text = String::new();
    for (i, token) in window.iter().enumerate() {
        if i > 0 {
            text.push(' ');
        }
        text.push_str(token.as_ref());
    }
    text
}
