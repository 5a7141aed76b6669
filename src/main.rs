use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use entroscope::{
    analyze_tokens, build_reference_from_text, build_tokenizer, load_documents, load_reference,
    run_tournament, save_reference, write_tournament_records_path, write_window_records_path,
    AnalysisConfig, AnalysisMode, CompressionAlgorithm, EntroscopeConfig, PipelineError,
    ReferenceTable, Tokenizer,
};

#[derive(Parser)]
#[command(
    name = "entroscope",
    version,
    about = "Windowed entropy/surprisal analysis for human-vs-machine text discrimination"
)]
struct Cli {
    /// Path to a TOML config file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build a smoothed reference model from a corpus file and persist it as JSON.
    BuildRef {
        /// Corpus text file.
        #[arg(long)]
        corpus: PathBuf,
        /// Output path for the reference JSON.
        #[arg(long)]
        output: PathBuf,
        /// Add-k smoothing (overrides the config file).
        #[arg(long)]
        smoothing_k: Option<f64>,
    },
    /// Analyze documents with sliding-window metrics and write CSV.
    Analyze {
        /// Input .txt file or directory.
        #[arg(long)]
        input: PathBuf,
        /// Analysis mode: raw or diff.
        #[arg(long)]
        mode: Option<AnalysisMode>,
        /// Window size in tokens.
        #[arg(long)]
        window: Option<usize>,
        /// Step size in tokens.
        #[arg(long)]
        step: Option<usize>,
        /// Logarithm base for entropy and surprisal.
        #[arg(long)]
        log_base: Option<f64>,
        /// Compression algorithm: lzma, gzip, bz2, or zlib.
        #[arg(long)]
        compression: Option<CompressionAlgorithm>,
        /// Reference model JSON (required for diff mode).
        #[arg(long)]
        reference: Option<PathBuf>,
        /// Output CSV path (for a single input file) or directory (for an
        /// input directory, one CSV per document).
        #[arg(long)]
        output: PathBuf,
    },
    /// Run the dual-reference tournament over human and AI document sets.
    Tournament {
        /// Human-labeled input .txt file or directory.
        #[arg(long)]
        human_input: PathBuf,
        /// AI-labeled input .txt file or directory.
        #[arg(long)]
        ai_input: PathBuf,
        /// Human-anchored reference JSON (overrides the config file).
        #[arg(long)]
        human_ref: Option<PathBuf>,
        /// Synthetic-anchored reference JSON (overrides the config file).
        #[arg(long)]
        synthetic_ref: Option<PathBuf>,
        /// Window size in tokens.
        #[arg(long)]
        window: Option<usize>,
        /// Step size in tokens.
        #[arg(long)]
        step: Option<usize>,
        /// Logarithm base for surprisal.
        #[arg(long)]
        log_base: Option<f64>,
        /// Compression algorithm: lzma, gzip, bz2, or zlib.
        #[arg(long)]
        compression: Option<CompressionAlgorithm>,
        /// Tournament CSV output path.
        #[arg(long)]
        output: PathBuf,
    },
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), PipelineError> {
    let cli = Cli::parse();
    let file_cfg = match &cli.config {
        Some(path) => EntroscopeConfig::load(path)?,
        None => EntroscopeConfig::default(),
    };
    let tokenizer = build_tokenizer(&file_cfg.tokenization, None)?;

    match cli.command {
        Command::BuildRef {
            corpus,
            output,
            smoothing_k,
        } => {
            let smoothing_k = smoothing_k.unwrap_or(file_cfg.reference.smoothing_k);
            let text = read_lossy(&corpus)?;
            let table = build_reference_from_text(&text, tokenizer.as_ref(), smoothing_k)?;
            save_reference(&table, &output).map_err(PipelineError::Store)?;
            info!(
                corpus = %corpus.display(),
                output = %output.display(),
                vocabulary = table.len(),
                "reference model written"
            );
        }
        Command::Analyze {
            input,
            mode,
            window,
            step,
            log_base,
            compression,
            reference,
            output,
        } => {
            let mut cfg = file_cfg.analysis_config();
            if let Some(mode) = mode {
                cfg = cfg.with_mode(mode);
            }
            if let Some(window) = window {
                cfg = cfg.with_window_size(window);
            }
            if let Some(step) = step {
                cfg = cfg.with_step(step);
            }
            if let Some(log_base) = log_base {
                cfg = cfg.with_log_base(log_base);
            }
            if let Some(compression) = compression {
                cfg = cfg.with_compression(compression);
            }
            cfg.validate().map_err(PipelineError::Analysis)?;

            let reference = match reference {
                Some(path) => Some(load_reference(path).map_err(PipelineError::Store)?),
                None => None,
            };
            analyze_to_csv(&input, &output, &cfg, reference.as_ref(), tokenizer.as_ref())?;
        }
        Command::Tournament {
            human_input,
            ai_input,
            human_ref,
            synthetic_ref,
            window,
            step,
            log_base,
            compression,
            output,
        } => {
            let mut cfg = file_cfg
                .analysis_config()
                .with_mode(AnalysisMode::Diff);
            if let Some(window) = window {
                cfg = cfg.with_window_size(window);
            }
            if let Some(step) = step {
                cfg = cfg.with_step(step);
            }
            if let Some(log_base) = log_base {
                cfg = cfg.with_log_base(log_base);
            }
            if let Some(compression) = compression {
                cfg = cfg.with_compression(compression);
            }
            cfg.validate().map_err(PipelineError::Analysis)?;

            let human_table = load_ref_from(human_ref, file_cfg.reference.human_path.clone(), "human")?;
            let synthetic_table = load_ref_from(
                synthetic_ref,
                file_cfg.reference.synthetic_path.clone(),
                "synthetic",
            )?;

            let records = run_tournament(
                &human_input,
                &ai_input,
                human_table,
                synthetic_table,
                &cfg,
                tokenizer.as_ref(),
            )?;
            write_tournament_records_path(&output, &records)?;
            info!(rows = records.len(), output = %output.display(), "tournament results written");
        }
    }
    Ok(())
}

fn read_lossy(path: &Path) -> Result<String, PipelineError> {
    let bytes = std::fs::read(path).map_err(|source| PipelineError::ReadInput {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn load_ref_from(
    flag: Option<PathBuf>,
    configured: Option<PathBuf>,
    role: &'static str,
) -> Result<ReferenceTable, PipelineError> {
    let path = flag
        .or(configured)
        .ok_or(PipelineError::MissingReferencePath { role })?;
    load_reference(path).map_err(PipelineError::Store)
}

fn analyze_to_csv(
    input: &Path,
    output: &Path,
    cfg: &AnalysisConfig,
    reference: Option<&ReferenceTable>,
    tokenizer: &dyn Tokenizer,
) -> Result<(), PipelineError> {
    if input.is_dir() {
        // One CSV per document, named after the document.
        let documents = load_documents(input, tokenizer)?;
        for document in &documents {
            let records = analyze_tokens(&document.tokens, cfg, reference)?;
            let stem = document
                .filename
                .strip_suffix(".txt")
                .unwrap_or(&document.filename);
            let path = output.join(format!("{stem}_analysis.csv"));
            write_window_records_path(&path, &records)?;
            info!(document = %document.filename, rows = records.len(), "analysis written");
        }
    } else {
        let text = read_lossy(input)?;
        let tokens = tokenizer.tokenize(&text);
        let records = analyze_tokens(&tokens, cfg, reference)?;
        write_window_records_path(output, &records)?;
        info!(rows = records.len(), output = %output.display(), "analysis written");
    }
    Ok(())
}
