//! Tag source trait and the normalized metadata it returns

use crate::error::TagError;
use std::path::Path;

pub const UNKNOWN_ARTIST: &str = "Unknown Artist";
pub const UNKNOWN_ALBUM: &str = "Unknown Album";

/// Tag reader trait - allows swapping between lofty, id3 and test sources
pub trait TagSource: Send + Sync {
    /// Whether this source recognizes the file as an audio track
    fn supports(&self, path: &Path) -> bool;

    /// Read title/artist/album/album artist/track number from a file
    fn read_tags(&self, path: &Path) -> Result<TrackTags, TagError>;
}

/// Metadata for one file, with catalog defaults already applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackTags {
    pub title: String,
    pub artist: String,
    pub album: String,
    pub album_artist: String,

    /// Position on the album, if tagged
    pub track_number: Option<u32>,
}

impl TrackTags {
    /// Build tags from raw optional fields.
    ///
    /// A missing title is an error; everything else falls back to a
    /// placeholder, and the album artist falls back to the track artist.
    pub fn from_raw(
        path: &Path,
        title: Option<String>,
        artist: Option<String>,
        album: Option<String>,
        album_artist: Option<String>,
        track_number: Option<u32>,
    ) -> Result<Self, TagError> {
        let title = non_blank(title).ok_or_else(|| TagError::MissingTitle(path.to_path_buf()))?;
        let artist = non_blank(artist).unwrap_or_else(|| UNKNOWN_ARTIST.to_string());
        let album = non_blank(album).unwrap_or_else(|| UNKNOWN_ALBUM.to_string());
        let album_artist = non_blank(album_artist).unwrap_or_else(|| artist.clone());

        Ok(Self {
            title,
            artist,
            album,
            album_artist,
            track_number: track_number.filter(|n| *n > 0),
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Lowercased file extension, if any
pub(crate) fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
}
