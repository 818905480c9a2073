//! Domain errors crossing module boundaries

use std::path::PathBuf;
use thiserror::Error;

/// Failure to obtain usable metadata for a file
#[derive(Debug, Error)]
pub enum TagError {
    #[error("failed to read tags from {path:?}: {reason}")]
    Unreadable { path: PathBuf, reason: String },

    #[error("{0:?} carries no tag")]
    Untagged(PathBuf),

    #[error("{0:?} has no title tag")]
    MissingTitle(PathBuf),

    #[error("{0:?} is not a supported audio file")]
    Unsupported(PathBuf),
}

/// Catalog registration errors
#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("{0:?} is already in the catalog")]
    DuplicatePath(PathBuf),
}

/// Failure to start the external player
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{0:?} does not exist")]
    MissingFile(PathBuf),
}
