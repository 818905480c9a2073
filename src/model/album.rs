use super::Track;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Album identity: (title, album artist)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AlbumKey {
    pub title: String,
    pub artist: String,
}

impl AlbumKey {
    pub fn new(title: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
        }
    }
}

/// An album credited to a single album artist
#[derive(Debug, Clone)]
pub struct Album {
    /// Album title
    pub title: String,

    /// Album artist name
    pub artist: String,

    /// Tracks keyed by their position on the album
    tracks: BTreeMap<u32, Arc<Track>>,
}

impl Album {
    pub fn new(title: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
            tracks: BTreeMap::new(),
        }
    }

    pub fn key(&self) -> AlbumKey {
        AlbumKey::new(self.title.clone(), self.artist.clone())
    }

    /// Place a track at `position`, replacing whatever was there
    pub fn add_track(&mut self, track: Arc<Track>, position: u32) {
        if let Some(replaced) = self.tracks.insert(position, track) {
            log::debug!(
                "Position {} on {} replaced {:?}",
                position,
                self,
                replaced.file_path
            );
        }
    }

    /// Tracks sorted by position, smallest first
    pub fn ordered_tracks(&self) -> Vec<Arc<Track>> {
        self.tracks.values().cloned().collect()
    }

    /// First position after the current last track (1 for an empty album)
    pub fn next_position(&self) -> u32 {
        self.tracks
            .keys()
            .next_back()
            .map_or(1, |last| last.saturating_add(1))
    }

    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

impl fmt::Display for Album {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {} (album)", self.artist, self.title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(name: &str) -> Arc<Track> {
        Arc::new(Track::new(format!("/music/{name}.mp3"), name, "Low"))
    }

    #[test]
    fn test_ordered_tracks_sorted_by_position() {
        let mut album = Album::new("Things We Lost in the Fire", "Low");
        album.add_track(track("three"), 3);
        album.add_track(track("one"), 1);
        album.add_track(track("two"), 2);

        let titles: Vec<_> = album.ordered_tracks().iter().map(|t| t.title.clone()).collect();
        assert_eq!(titles, vec!["one", "two", "three"]);
    }

    #[test]
    fn test_positions_need_not_be_contiguous() {
        let mut album = Album::new("Gaps", "Low");
        album.add_track(track("late"), 12);
        album.add_track(track("early"), 4);

        let titles: Vec<_> = album.ordered_tracks().iter().map(|t| t.title.clone()).collect();
        assert_eq!(titles, vec!["early", "late"]);
        assert_eq!(album.next_position(), 13);
    }

    #[test]
    fn test_duplicate_position_overwrites() {
        let mut album = Album::new("Dupes", "Low");
        album.add_track(track("first"), 1);
        album.add_track(track("second"), 1);

        assert_eq!(album.track_count(), 1);
        assert_eq!(album.ordered_tracks()[0].title, "second");
    }

    #[test]
    fn test_empty_album() {
        let album = Album::new("Nothing", "Nobody");
        assert!(album.is_empty());
        assert_eq!(album.next_position(), 1);
        assert_eq!(album.to_string(), "Nobody - Nothing (album)");
    }
}
