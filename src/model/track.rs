use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// A single playable file in the catalog
///
/// Identity is the file path; a catalog never holds two tracks with the
/// same path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// File path to the audio file
    pub file_path: PathBuf,

    /// Track title
    pub title: String,

    /// Performing artist (may differ from the album artist)
    pub artist: String,
}

impl Track {
    pub fn new(file_path: impl Into<PathBuf>, title: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
            title: title.into(),
            artist: artist.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// "Artist - Title", as shown in status messages
    pub fn label(&self) -> String {
        format!("{} - {}", self.artist, self.title)
    }
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {} (track)", self.artist, self.title)
    }
}
