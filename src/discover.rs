//! Input discovery for multi-document runs.

use std::path::{Path, PathBuf};

use thiserror::Error;
use walkdir::WalkDir;

/// Errors raised while collecting input files.
#[derive(Debug, Error)]
pub enum DiscoverError {
    #[error("input path not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to walk {}: {source}", .path.display())]
    Walk {
        path: PathBuf,
        source: walkdir::Error,
    },
}

/// Collect input `.txt` files.
///
/// A file path yields itself; a directory is walked recursively. Results are
/// sorted by path so downstream record order is reproducible.
pub fn collect_input_files(input: &Path) -> Result<Vec<PathBuf>, DiscoverError> {
    if input.is_file() {
        return Ok(vec![input.to_path_buf()]);
    }
    if !input.is_dir() {
        return Err(DiscoverError::NotFound(input.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(input) {
        let entry = entry.map_err(|source| DiscoverError::Walk {
            path: input.to_path_buf(),
            source,
        })?;
        if entry.file_type().is_file()
            && entry.path().extension().is_some_and(|ext| ext == "txt")
        {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}
