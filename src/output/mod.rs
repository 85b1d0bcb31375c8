//! Writing the summary report to disk.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("invalid output path {0:?}: cannot write data")]
    InvalidOutputPath(PathBuf),

    #[error("failed to write {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Write `data` to `path`, replacing any existing file.
///
/// The parent directory has to exist already and `path` must not itself be a
/// directory.
pub fn write_summary(path: &Path, data: &str) -> Result<(), OutputError> {
    let parent_missing = path
        .parent()
        .is_some_and(|dir| !dir.as_os_str().is_empty() && !dir.is_dir());

    if parent_missing || path.is_dir() {
        return Err(OutputError::InvalidOutputPath(path.to_path_buf()));
    }

    fs::write(path, data).map_err(|source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    info!("Summary written to {:?} ({} bytes)", path, data.len());
    Ok(())
}
