//! Download-as-file: the primary result text written to a timestamped `.txt`.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::contracts::AnalysisResult;

const ARTIFACT_PREFIX: &str = "tahrirchi-result";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// `tahrirchi-result-<unix-millis>.txt`.
#[must_use]
pub fn artifact_file_name(at: DateTime<Utc>) -> String {
    format!("{ARTIFACT_PREFIX}-{}.txt", at.timestamp_millis())
}

/// Write `result`'s primary text into `dir`, named after the current time.
///
/// # Errors
/// Returns [`ExportError`] if the directory cannot be created or the file written.
pub fn write_artifact(result: &AnalysisResult, dir: &Path) -> Result<PathBuf, ExportError> {
    write_artifact_at(result, dir, Utc::now())
}

/// Same as [`write_artifact`] with an explicit timestamp.
///
/// # Errors
/// See [`write_artifact`].
pub fn write_artifact_at(
    result: &AnalysisResult,
    dir: &Path,
    at: DateTime<Utc>,
) -> Result<PathBuf, ExportError> {
    std::fs::create_dir_all(dir).map_err(|source| ExportError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;
    let path = dir.join(artifact_file_name(at));
    std::fs::write(&path, result.primary_text()).map_err(|source| ExportError::Write {
        path: path.clone(),
        source,
    })?;
    tracing::info!(
        event = "tahrirchi.export.written",
        path = %path.display(),
        bytes = result.primary_text().len(),
        "result written"
    );
    Ok(path)
}
