//! Saves submitted text so later runs can compare against it.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use thiserror::Error;
use tracing::info;

/// File name prefix of archived submissions.
pub const SUBMISSION_PREFIX: &str = "submitted_text_";

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("failed to create archive directory '{}': {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write submission '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Name of the file a submission made at `now` is saved under.
pub fn submission_file_name(now: NaiveDateTime) -> String {
    format!("{SUBMISSION_PREFIX}{}.txt", now.format("%Y%m%d_%H%M%S"))
}

/// Write `text` to `dir/submitted_text_<YYYYmmdd_HHMMSS>.txt`, creating `dir`
/// if needed, and return the path written.
///
/// A second submission within the same second overwrites the first.
pub fn save_submission(
    dir: impl AsRef<Path>,
    text: &str,
    now: NaiveDateTime,
) -> Result<PathBuf, ArchiveError> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir).map_err(|source| ArchiveError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let path = dir.join(submission_file_name(now));
    fs::write(&path, text).map_err(|source| ArchiveError::Write {
        path: path.clone(),
        source,
    })?;
    info!(path = %path.display(), bytes = text.len(), "submission_saved");
    Ok(path)
}
