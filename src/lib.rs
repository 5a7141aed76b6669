//! Umbrella crate for entroscope.
//!
//! Entroscope measures how "surprising" a sliding window of tokens is
//! relative to statistical language models. The component crates do the
//! work — `tokenize` (tokenizer strategies), `reference` (smoothed unigram
//! models), `analysis` (windowed metrics), `tournament` (dual-reference
//! comparison) — and this crate stitches them together so callers can go
//! from raw text and file trees to record streams with a single API entry
//! point.

pub mod config;
pub mod discover;
pub mod report;

pub use analysis::{
    analyze_tokens, analyze_tokens_batch, compression_ratio, entropy_variance, shannon_entropy,
    surprisal_stats, token_surprisal, unique_ratio, window_count, windows, AnalysisConfig,
    AnalysisError, AnalysisMode, CompressionAlgorithm, WindowRecord, Windows,
};
pub use config::{ConfigError, EntroscopeConfig};
pub use discover::{collect_input_files, DiscoverError};
pub use reference::{
    build_reference, load_reference, save_reference, ReferenceError, ReferenceTable, StoreError,
};
pub use report::{
    write_tournament_records, write_tournament_records_path, write_window_records,
    write_window_records_path, ReportError,
};
pub use tokenize::{
    build_tokenizer, LegacyTokenizer, TokenizeConfig, TokenizeError, Tokenizer, TokenizerKind,
};
pub use tournament::{DocLabel, Document, Tournament, TournamentError, TournamentRecord};

use std::fs;
use std::path::Path;

use thiserror::Error;
use tracing::warn;

/// Errors from the end-to-end pipeline helpers.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("tokenization failure: {0}")]
    Tokenize(#[from] TokenizeError),

    #[error("reference model failure: {0}")]
    Reference(#[from] ReferenceError),

    #[error("reference store failure: {0}")]
    Store(#[from] StoreError),

    #[error("analysis failure: {0}")]
    Analysis(#[from] AnalysisError),

    #[error("tournament failure: {0}")]
    Tournament(#[from] TournamentError),

    #[error("configuration failure: {0}")]
    Config(#[from] ConfigError),

    #[error("input discovery failure: {0}")]
    Discover(#[from] DiscoverError),

    #[error("report failure: {0}")]
    Report(#[from] ReportError),

    #[error("no {role} reference model: pass a path on the command line or set reference.{role}_path in the config file")]
    MissingReferencePath { role: &'static str },

    #[error("failed to read {}: {source}", .path.display())]
    ReadInput {
        path: std::path::PathBuf,
        source: std::io::Error,
    },
}

/// Tokenize `text` and run the window analyzer over it.
pub fn analyze_text(
    text: &str,
    tokenizer: &dyn Tokenizer,
    cfg: &AnalysisConfig,
    reference: Option<&ReferenceTable>,
) -> Result<Vec<WindowRecord>, PipelineError> {
    let tokens = tokenizer.tokenize(text);
    Ok(analyze_tokens(&tokens, cfg, reference)?)
}

/// Tokenize corpus text and build a smoothed reference model from it.
pub fn build_reference_from_text(
    text: &str,
    tokenizer: &dyn Tokenizer,
    smoothing_k: f64,
) -> Result<ReferenceTable, PipelineError> {
    let tokens = tokenizer.tokenize(text);
    Ok(build_reference(&tokens, smoothing_k)?)
}

/// Discover, read, and tokenize every `.txt` document under `input`.
///
/// Unreadable files are skipped with a warning rather than aborting the
/// whole run; malformed UTF-8 is replaced rather than rejected.
pub fn load_documents(
    input: &Path,
    tokenizer: &dyn Tokenizer,
) -> Result<Vec<Document>, PipelineError> {
    let mut documents = Vec::new();
    for path in collect_input_files(input)? {
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "skipping unreadable document");
                continue;
            }
        };
        let text = String::from_utf8_lossy(&bytes);
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        documents.push(Document::new(filename, tokenizer.tokenize(&text)));
    }
    Ok(documents)
}

/// Run the dual-reference tournament over two file trees.
///
/// Documents are analyzed on the rayon pool; the record order is
/// deterministic regardless (human set, then ai set, filenames sorted
/// within each, windows positional).
pub fn run_tournament(
    human_input: &Path,
    ai_input: &Path,
    human_ref: ReferenceTable,
    synthetic_ref: ReferenceTable,
    cfg: &AnalysisConfig,
    tokenizer: &dyn Tokenizer,
) -> Result<Vec<TournamentRecord>, PipelineError> {
    let human_docs = load_documents(human_input, tokenizer)?;
    let ai_docs = load_documents(ai_input, tokenizer)?;
    let engine = Tournament::new(cfg.clone(), human_ref, synthetic_ref)?.with_parallel(true);
    Ok(engine.run(&human_docs, &ai_docs)?)
}
