//! Catalog storage: entity arenas plus the three key maps

use crate::error::LibraryError;
use crate::model::{Album, AlbumKey, Artist, Track};
use crate::tags::TrackTags;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Complete catalog of artists, albums and tracks
///
/// Entities live in insertion-ordered arenas; `artists_by_name`,
/// `albums_by_key` and `tracks_by_path` are the only way in, so each key
/// maps to exactly one entity.
#[derive(Debug, Default)]
pub struct LibraryIndex {
    artists: Vec<Artist>,
    artists_by_name: HashMap<String, usize>,

    albums: Vec<Album>,
    albums_by_key: HashMap<AlbumKey, usize>,

    tracks: Vec<Arc<Track>>,
    tracks_by_path: HashMap<PathBuf, usize>,
}

impl LibraryIndex {
    /// Create a new empty library
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one tagged file.
    ///
    /// Creates the track, resolves both the performing artist and the album
    /// artist (possibly the same entity), resolves the album under the album
    /// artist, and links everything. Nothing is touched if the path is
    /// already catalogued.
    pub fn add_file(
        &mut self,
        path: &Path,
        title: &str,
        artist: &str,
        album: &str,
        album_artist: &str,
        position: u32,
    ) -> Result<Arc<Track>, LibraryError> {
        if self.tracks_by_path.contains_key(path) {
            return Err(LibraryError::DuplicatePath(path.to_path_buf()));
        }

        let track = Arc::new(Track::new(path, title, artist));
        let artist_idx = self.resolve_artist_index(artist);
        let album_artist_idx = self.resolve_artist_index(album_artist);
        let album_idx = self.resolve_album_index(album, album_artist);

        self.artists[album_artist_idx].add_album(album);
        self.albums[album_idx].add_track(Arc::clone(&track), position);
        self.artists[artist_idx].add_track(Arc::clone(&track));
        self.tracks_by_path
            .insert(track.file_path.clone(), self.tracks.len());
        self.tracks.push(Arc::clone(&track));

        Ok(track)
    }

    /// Register a file from reader output; untagged positions go after the
    /// album's current last track
    pub fn add_tagged(&mut self, path: &Path, tags: &TrackTags) -> Result<Arc<Track>, LibraryError> {
        let position = match tags.track_number {
            Some(n) => n,
            None => self
                .find_album(&tags.album, &tags.album_artist)
                .map_or(1, Album::next_position),
        };

        self.add_file(
            path,
            &tags.title,
            &tags.artist,
            &tags.album,
            &tags.album_artist,
            position,
        )
    }

    /// Exact artist lookup, never mutates
    pub fn find_artist(&self, name: &str) -> Option<&Artist> {
        self.artists_by_name.get(name).map(|&idx| &self.artists[idx])
    }

    /// Exact album lookup by (title, album artist), never mutates
    pub fn find_album(&self, title: &str, artist: &str) -> Option<&Album> {
        self.albums_by_key
            .get(&AlbumKey::new(title, artist))
            .map(|&idx| &self.albums[idx])
    }

    pub fn find_track(&self, path: &Path) -> Option<&Arc<Track>> {
        self.tracks_by_path.get(path).map(|&idx| &self.tracks[idx])
    }

    /// Get-or-create an artist; repeated calls return the same entity
    pub fn resolve_artist(&mut self, name: &str) -> &mut Artist {
        let idx = self.resolve_artist_index(name);
        &mut self.artists[idx]
    }

    /// Get-or-create an album; repeated calls return the same entity
    pub fn resolve_album(&mut self, title: &str, artist: &str) -> &mut Album {
        let idx = self.resolve_album_index(title, artist);
        &mut self.albums[idx]
    }

    fn resolve_artist_index(&mut self, name: &str) -> usize {
        if let Some(&idx) = self.artists_by_name.get(name) {
            return idx;
        }
        let idx = self.artists.len();
        self.artists.push(Artist::new(name));
        self.artists_by_name.insert(name.to_string(), idx);
        idx
    }

    fn resolve_album_index(&mut self, title: &str, artist: &str) -> usize {
        let key = AlbumKey::new(title, artist);
        if let Some(&idx) = self.albums_by_key.get(&key) {
            return idx;
        }
        let idx = self.albums.len();
        self.albums.push(Album::new(title, artist));
        self.albums_by_key.insert(key, idx);
        idx
    }

    /// Albums an artist is credited as album artist for
    pub fn albums_for_artist(&self, name: &str) -> Vec<&Album> {
        self.find_artist(name)
            .map(|artist| {
                artist
                    .album_titles()
                    .filter_map(|title| self.find_album(title, &artist.name))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn artists(&self) -> impl Iterator<Item = &Artist> {
        self.artists.iter()
    }

    pub fn albums(&self) -> impl Iterator<Item = &Album> {
        self.albums.iter()
    }

    pub fn tracks(&self) -> impl Iterator<Item = &Arc<Track>> {
        self.tracks.iter()
    }

    pub fn artist_count(&self) -> usize {
        self.artists.len()
    }

    pub fn album_count(&self) -> usize {
        self.albums.len()
    }

    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn add(lib: &mut LibraryIndex, path: &str, title: &str, artist: &str, album: &str, album_artist: &str, pos: u32) {
        lib.add_file(Path::new(path), title, artist, album, album_artist, pos)
            .unwrap();
    }

    #[test]
    fn test_library_creation() {
        let lib = LibraryIndex::new();
        assert_eq!(lib.track_count(), 0);
        assert_eq!(lib.artist_count(), 0);
        assert_eq!(lib.album_count(), 0);
    }

    #[test]
    fn test_add_file_registers_everything() {
        let mut lib = LibraryIndex::new();
        add(&mut lib, "/m/1.mp3", "Heroes", "David Bowie", "Heroes", "David Bowie", 3);

        assert_eq!(lib.track_count(), 1);
        assert_eq!(lib.artist_count(), 1);
        assert_eq!(lib.album_count(), 1);

        let artist = lib.find_artist("David Bowie").unwrap();
        assert_eq!(artist.tracks().len(), 1);
        assert_eq!(artist.album_titles().collect::<Vec<_>>(), vec!["Heroes"]);

        let album = lib.find_album("Heroes", "David Bowie").unwrap();
        assert_eq!(album.ordered_tracks()[0].title, "Heroes");
        assert!(lib.find_track(Path::new("/m/1.mp3")).is_some());
    }

    #[test]
    fn test_compilation_splits_artist_and_album_artist() {
        let mut lib = LibraryIndex::new();
        add(&mut lib, "/m/1.mp3", "Song A", "Band A", "Mixtape", "Various Artists", 1);
        add(&mut lib, "/m/2.mp3", "Song B", "Band B", "Mixtape", "Various Artists", 2);

        assert_eq!(lib.artist_count(), 3);
        assert_eq!(lib.album_count(), 1);

        let various = lib.find_artist("Various Artists").unwrap();
        assert_eq!(various.album_count(), 1);
        assert!(various.tracks().is_empty());

        let band_a = lib.find_artist("Band A").unwrap();
        assert_eq!(band_a.album_count(), 0);
        assert_eq!(band_a.tracks()[0].title, "Song A");

        assert_eq!(lib.albums_for_artist("Various Artists").len(), 1);
        assert!(lib.albums_for_artist("Band A").is_empty());
    }

    #[test]
    fn test_same_album_title_different_artists() {
        let mut lib = LibraryIndex::new();
        add(&mut lib, "/m/1.mp3", "One", "X", "Greatest Hits", "X", 1);
        add(&mut lib, "/m/2.mp3", "Two", "Y", "Greatest Hits", "Y", 1);

        assert_eq!(lib.album_count(), 2);
        assert_eq!(lib.find_album("Greatest Hits", "X").unwrap().track_count(), 1);
        assert_eq!(lib.find_album("Greatest Hits", "Y").unwrap().track_count(), 1);
    }

    #[test]
    fn test_duplicate_path_rejected_without_changes() {
        let mut lib = LibraryIndex::new();
        add(&mut lib, "/m/1.mp3", "One", "X", "A", "X", 1);

        let result = lib.add_file(Path::new("/m/1.mp3"), "Other", "Z", "B", "Z", 1);
        assert!(matches!(result, Err(LibraryError::DuplicatePath(_))));
        assert_eq!(lib.track_count(), 1);
        assert_eq!(lib.artist_count(), 1);
        assert!(lib.find_artist("Z").is_none());
        assert_eq!(lib.find_artist("X").unwrap().tracks().len(), 1);
    }

    #[test]
    fn test_find_does_not_create() {
        let lib = LibraryIndex::new();
        assert!(lib.find_artist("Nobody").is_none());
        assert!(lib.find_album("Nothing", "Nobody").is_none());
        assert_eq!(lib.artist_count(), 0);
        assert_eq!(lib.album_count(), 0);
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let mut lib = LibraryIndex::new();
        lib.resolve_artist("Nico").add_album("Chelsea Girl");
        lib.resolve_artist("Nico");
        lib.resolve_album("Chelsea Girl", "Nico");
        lib.resolve_album("Chelsea Girl", "Nico");

        assert_eq!(lib.artist_count(), 1);
        assert_eq!(lib.album_count(), 1);
        assert_eq!(lib.find_artist("Nico").unwrap().album_count(), 1);
    }

    #[test]
    fn test_keys_are_case_sensitive() {
        let mut lib = LibraryIndex::new();
        add(&mut lib, "/m/1.mp3", "One", "low", "A", "low", 1);
        add(&mut lib, "/m/2.mp3", "Two", "Low", "A", "Low", 1);

        assert_eq!(lib.artist_count(), 2);
        assert_eq!(lib.album_count(), 2);
    }

    #[test]
    fn test_add_tagged_appends_unnumbered_tracks() {
        let mut lib = LibraryIndex::new();
        let tags = |title: &str, n: Option<u32>| TrackTags {
            title: title.to_string(),
            artist: "Can".to_string(),
            album: "Tago Mago".to_string(),
            album_artist: "Can".to_string(),
            track_number: n,
        };

        lib.add_tagged(Path::new("/m/a.mp3"), &tags("Paperhouse", Some(1))).unwrap();
        lib.add_tagged(Path::new("/m/b.mp3"), &tags("Untitled", None)).unwrap();
        lib.add_tagged(Path::new("/m/c.mp3"), &tags("Also Untitled", None)).unwrap();

        let titles: Vec<_> = lib
            .find_album("Tago Mago", "Can")
            .unwrap()
            .ordered_tracks()
            .iter()
            .map(|t| t.title.clone())
            .collect();
        assert_eq!(titles, vec!["Paperhouse", "Untitled", "Also Untitled"]);
    }
}
