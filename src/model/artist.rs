use super::Track;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

/// An artist as seen by the catalog
///
/// Accumulates the albums it is credited as album artist for, and the
/// individual tracks it performs. The two can differ on compilations.
#[derive(Debug, Clone)]
pub struct Artist {
    /// Artist name
    pub name: String,

    /// Titles of albums this artist is the album artist of
    album_titles: BTreeSet<String>,

    /// Performed tracks in catalog order
    tracks: Vec<Arc<Track>>,
}

impl Artist {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            album_titles: BTreeSet::new(),
            tracks: Vec::new(),
        }
    }

    pub fn add_album(&mut self, title: &str) {
        self.album_titles.insert(title.to_string());
    }

    /// Record a performed track. Callers guarantee each path is added once.
    pub fn add_track(&mut self, track: Arc<Track>) {
        self.tracks.push(track);
    }

    pub fn album_titles(&self) -> impl Iterator<Item = &str> {
        self.album_titles.iter().map(String::as_str)
    }

    pub fn tracks(&self) -> &[Arc<Track>] {
        &self.tracks
    }

    pub fn album_count(&self) -> usize {
        self.album_titles.len()
    }
}

impl fmt::Display for Artist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
