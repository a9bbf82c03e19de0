//! The errors that can abort a reconciliation pass.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum UpversionError {
    #[error("{} is not inside a steamapps/workshop/content directory", path.display())]
    BadModFolder { path: PathBuf },
    #[error("No game detected: nothing under {} has steam app id {app_id}", games_dir.display())]
    NoGameDetected { app_id: String, games_dir: PathBuf },
    #[error("Could not determine the installed game version: {reason}")]
    VersionUnresolved { reason: String },
    #[error("Could not read directory {}", path.display())]
    UnreadableDir {
        path: PathBuf,
        source: walkdir::Error,
    },
    #[error("Could not read {}", path.display())]
    UnreadableFile { path: PathBuf, source: io::Error },
    #[error("Could not write {}", path.display())]
    UnwritableFile { path: PathBuf, source: io::Error },
}
