//! Case-insensitive prefix search over the catalog

use super::LibraryIndex;
use crate::model::{Album, Artist, Track};
use std::sync::Arc;

/// Which entity kind a search covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKind {
    Artists,
    Albums,
    Tracks,
    All,
}

/// Matches grouped by kind, in the index's natural order
#[derive(Debug, Default)]
pub struct SearchResults<'a> {
    pub artists: Vec<&'a Artist>,
    pub albums: Vec<&'a Album>,
    pub tracks: Vec<&'a Arc<Track>>,
}

impl SearchResults<'_> {
    pub fn len(&self) -> usize {
        self.artists.len() + self.albums.len() + self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn has_prefix(candidate: &str, prefix_lower: &str) -> bool {
    candidate.to_lowercase().starts_with(prefix_lower)
}

impl LibraryIndex {
    /// Artists whose name starts with `prefix`, ignoring case
    pub fn artists_by_prefix(&self, prefix: &str) -> Vec<&Artist> {
        let prefix = prefix.to_lowercase();
        self.artists()
            .filter(|artist| has_prefix(&artist.name, &prefix))
            .collect()
    }

    /// Albums whose title starts with `prefix`, ignoring case
    pub fn albums_by_prefix(&self, prefix: &str) -> Vec<&Album> {
        let prefix = prefix.to_lowercase();
        self.albums()
            .filter(|album| has_prefix(&album.title, &prefix))
            .collect()
    }

    /// Tracks whose title starts with `prefix`, ignoring case
    pub fn tracks_by_prefix(&self, prefix: &str) -> Vec<&Arc<Track>> {
        let prefix = prefix.to_lowercase();
        self.tracks()
            .filter(|track| has_prefix(&track.title, &prefix))
            .collect()
    }

    /// Prefix search over one kind or all of them; an empty prefix matches
    /// everything of the requested kind
    pub fn search(&self, prefix: &str, kind: SearchKind) -> SearchResults<'_> {
        let mut results = SearchResults::default();
        if matches!(kind, SearchKind::Artists | SearchKind::All) {
            results.artists = self.artists_by_prefix(prefix);
        }
        if matches!(kind, SearchKind::Albums | SearchKind::All) {
            results.albums = self.albums_by_prefix(prefix);
        }
        if matches!(kind, SearchKind::Tracks | SearchKind::All) {
            results.tracks = self.tracks_by_prefix(prefix);
        }
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn sample() -> LibraryIndex {
        let mut lib = LibraryIndex::new();
        lib.add_file(Path::new("/m/1.mp3"), "Boys Keep Swinging", "David Bowie", "Lodger", "David Bowie", 1)
            .unwrap();
        lib.add_file(Path::new("/m/2.mp3"), "Ashes to Ashes", "Bowie", "Scary Monsters", "Bowie", 1)
            .unwrap();
        lib.add_file(Path::new("/m/3.mp3"), "Bonny", "Prefab Sprout", "Steve McQueen", "Prefab Sprout", 1)
            .unwrap();
        lib
    }

    #[test]
    fn test_prefix_is_case_insensitive() {
        let lib = sample();
        let names: Vec<_> = lib.artists_by_prefix("bo").iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["Bowie"]);

        let titles: Vec<_> = lib.tracks_by_prefix("BO").iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["Boys Keep Swinging", "Bonny"]);
    }

    #[test]
    fn test_empty_prefix_matches_all() {
        let lib = sample();
        let all = lib.search("", SearchKind::All);
        assert_eq!(all.artists.len(), lib.artist_count());
        assert_eq!(all.albums.len(), lib.album_count());
        assert_eq!(all.tracks.len(), lib.track_count());
    }

    #[test]
    fn test_kind_restricts_results() {
        let lib = sample();
        let albums_only = lib.search("s", SearchKind::Albums);
        assert!(albums_only.artists.is_empty());
        assert!(albums_only.tracks.is_empty());
        assert_eq!(albums_only.albums.len(), 2);
    }

    #[test]
    fn test_no_match_is_empty() {
        let lib = sample();
        assert!(lib.search("zzz", SearchKind::All).is_empty());
    }
}
