//! Loads reference documents from a directory.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use matcher::Corpus;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Directory-level failures. Individual unreadable files are skipped, not
/// reported here.
#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("corpus directory '{}' does not exist", path.display())]
    MissingDirectory { path: PathBuf },

    #[error("corpus path '{}' is not a directory", path.display())]
    NotADirectory { path: PathBuf },

    #[error("failed to list corpus directory '{}': {source}", path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Read every regular file in `dir` whose extension is `extension`,
/// keyed by file name.
///
/// Subdirectories are not descended into. A file that cannot be read or is
/// not valid UTF-8 is logged and left out; the rest of the corpus is still
/// returned.
pub fn load_corpus(dir: impl AsRef<Path>, extension: &str) -> Result<Corpus, CorpusError> {
    let dir = dir.as_ref();
    let metadata = fs::metadata(dir).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => CorpusError::MissingDirectory {
            path: dir.to_path_buf(),
        },
        _ => CorpusError::ReadDir {
            path: dir.to_path_buf(),
            source,
        },
    })?;
    if !metadata.is_dir() {
        return Err(CorpusError::NotADirectory {
            path: dir.to_path_buf(),
        });
    }

    let entries = fs::read_dir(dir).map_err(|source| CorpusError::ReadDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut corpus = Corpus::new();
    let mut skipped = 0usize;
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!(dir = %dir.display(), error = %err, "corpus_entry_unreadable");
                skipped += 1;
                continue;
            }
        };
        let path = entry.path();
        if !path.is_file() || !has_extension(&path, extension) {
            continue;
        }
        let Some(doc_id) = path.file_name().and_then(|name| name.to_str()) else {
            warn!(path = %path.display(), "corpus_file_name_not_utf8");
            skipped += 1;
            continue;
        };

        match fs::read_to_string(&path) {
            Ok(text) => {
                debug!(doc_id, bytes = text.len(), "corpus_file_loaded");
                corpus.insert(doc_id, text);
            }
            Err(err) => {
                warn!(doc_id, error = %err, "corpus_file_skipped");
                skipped += 1;
            }
        }
    }

    info!(
        dir = %dir.display(),
        documents = corpus.len(),
        skipped,
        "corpus_loaded"
    );
    Ok(corpus)
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext == extension)
}
