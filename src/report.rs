//! CSV writers for record streams.

use std::fs;
use std::io::Write;
use std::path::Path;

use thiserror::Error;

use analysis::WindowRecord;
use tournament::TournamentRecord;

/// Errors raised while writing tabular output.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to write output file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize csv row: {0}")]
    Csv(#[from] csv::Error),
}

/// Write window records as CSV, one row per window.
pub fn write_window_records<W: Write>(
    writer: W,
    records: &[WindowRecord],
) -> Result<(), ReportError> {
    let mut out = csv::Writer::from_writer(writer);
    for record in records {
        out.serialize(record)?;
    }
    out.flush()?;
    Ok(())
}

/// Write window records to a file, creating parent directories as needed.
pub fn write_window_records_path(
    path: impl AsRef<Path>,
    records: &[WindowRecord],
) -> Result<(), ReportError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    write_window_records(fs::File::create(path)?, records)
}

/// Write tournament records as CSV, one row per window per document.
pub fn write_tournament_records<W: Write>(
    writer: W,
    records: &[TournamentRecord],
) -> Result<(), ReportError> {
    let mut out = csv::Writer::from_writer(writer);
    for record in records {
        out.serialize(record)?;
    }
    out.flush()?;
    Ok(())
}

/// Write tournament records to a file, creating parent directories as needed.
pub fn write_tournament_records_path(
    path: impl AsRef<Path>,
    records: &[TournamentRecord],
) -> Result<(), ReportError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    write_tournament_records(fs::File::create(path)?, records)
}
