//! Command surface shared by every front-end
//!
//! Front-ends hold a [`Jukebox`] and never touch the queue or catalog
//! directly. Lookups here use the non-mutating `find_*` side of the index,
//! so an unknown reference simply yields nothing.

use crate::config::JukeboxConfig;
use crate::library::{self, IngestReport, LibraryIndex, SearchKind, SearchResults};
use crate::model::{Album, AlbumKey, Artist, Track};
use crate::playback::{ExternalPlayer, PlaybackEngine};
use crate::status::{ObserverId, StatusBroadcaster, StatusObserver, Subscription};
use anyhow::{Context, Result};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Something a front-end can ask to play
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// All tracks performed by the artist, in catalog order
    Artist(String),

    /// The album's tracks, in position order
    Album(AlbumKey),

    /// A single track by file path
    Track(PathBuf),
}

impl From<&Artist> for Selection {
    fn from(artist: &Artist) -> Self {
        Selection::Artist(artist.name.clone())
    }
}

impl From<&Album> for Selection {
    fn from(album: &Album) -> Self {
        Selection::Album(album.key())
    }
}

impl From<&Arc<Track>> for Selection {
    fn from(track: &Arc<Track>) -> Self {
        Selection::Track(track.file_path.clone())
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::Artist(name) => f.write_str(name),
            Selection::Album(key) => write!(f, "{} - {} (album)", key.artist, key.title),
            Selection::Track(path) => write!(f, "{}", path.display()),
        }
    }
}

impl SearchResults<'_> {
    /// Flatten into labelled selections: artists, then albums, then tracks
    pub fn selections(&self) -> Vec<(String, Selection)> {
        let artists = self.artists.iter().map(|a| (a.to_string(), Selection::from(*a)));
        let albums = self.albums.iter().map(|a| (a.to_string(), Selection::from(*a)));
        let tracks = self.tracks.iter().map(|t| (t.to_string(), Selection::from(*t)));
        artists.chain(albums).chain(tracks).collect()
    }
}

/// Catalog plus playback engine, as seen by front-ends
#[derive(Clone)]
pub struct Jukebox {
    library: Arc<LibraryIndex>,
    engine: PlaybackEngine,
}

impl Jukebox {
    pub fn new(library: Arc<LibraryIndex>, engine: PlaybackEngine) -> Self {
        Self { library, engine }
    }

    /// Ingest the configured library and start playback with the
    /// configured external player
    pub fn open(config: &JukeboxConfig) -> Result<(Self, IngestReport)> {
        let tag_source = config.tag_reader.source();
        let (library, report) = library::ingest(&config.library_root, tag_source.as_ref())?;

        let broadcaster = StatusBroadcaster::with_capacity(config.observer_capacity);
        let launcher = Arc::new(ExternalPlayer::new(config.player));
        log::info!("Using {} for playback", launcher.program());

        let engine = PlaybackEngine::start(launcher, broadcaster, config.playback.clone())
            .context("Failed to start playback worker")?;

        Ok((Self::new(Arc::new(library), engine), report))
    }

    pub fn library(&self) -> &LibraryIndex {
        &self.library
    }

    pub fn engine(&self) -> &PlaybackEngine {
        &self.engine
    }

    /// Artists, albums and tracks starting with `prefix`
    pub fn search(&self, prefix: &str) -> SearchResults<'_> {
        self.library.search(prefix, SearchKind::All)
    }

    /// Albums credited to `name`, empty for an unknown artist
    pub fn list_albums_for_artist(&self, name: &str) -> Vec<&Album> {
        self.library.albums_for_artist(name)
    }

    /// Album tracks in position order, empty for an unknown album
    pub fn list_tracks_for_album(&self, title: &str, artist: &str) -> Vec<Arc<Track>> {
        self.library
            .find_album(title, artist)
            .map(Album::ordered_tracks)
            .unwrap_or_default()
    }

    /// Expand a selection into the tracks it stands for
    pub fn tracks_for(&self, selection: &Selection) -> Vec<Arc<Track>> {
        match selection {
            Selection::Artist(name) => self
                .library
                .find_artist(name)
                .map(|artist| artist.tracks().to_vec())
                .unwrap_or_default(),
            Selection::Album(key) => self.list_tracks_for_album(&key.title, &key.artist),
            Selection::Track(path) => self
                .library
                .find_track(path)
                .cloned()
                .into_iter()
                .collect(),
        }
    }

    /// Queue everything a selection stands for; returns the number queued
    pub fn enqueue(&self, selection: &Selection) -> usize {
        let tracks = self.tracks_for(selection);
        if tracks.is_empty() {
            log::info!("Nothing to queue for {}", selection);
            return 0;
        }
        self.engine.enqueue_all(tracks)
    }

    pub fn skip(&self) -> bool {
        self.engine.skip()
    }

    pub fn clear_queue(&self) {
        self.engine.clear();
    }

    pub fn subscribe(&self) -> Subscription {
        self.engine.broadcaster().subscribe()
    }

    pub fn register(&self, observer: impl StatusObserver) -> ObserverId {
        self.engine.broadcaster().register(observer)
    }

    pub fn unregister(&self, id: ObserverId) -> bool {
        self.engine.broadcaster().unregister(id)
    }
}
