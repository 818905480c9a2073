//! lofty-backed tag source (default)

use super::traits::{extension, TagSource, TrackTags};
use crate::error::TagError;
use lofty::config::ParseOptions;
use lofty::prelude::*;
use lofty::probe::Probe;
use std::path::Path;

/// Extensions lofty is asked to open
const AUDIO_EXTENSIONS: &[&str] = &[
    "mp3", "flac", "ogg", "oga", "opus", "m4a", "mp4", "aac", "wav", "aiff", "aif", "ape", "wv",
];

/// Reads tags through lofty's format probe
pub struct LoftyTagSource;

impl LoftyTagSource {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LoftyTagSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TagSource for LoftyTagSource {
    fn supports(&self, path: &Path) -> bool {
        extension(path).is_some_and(|ext| AUDIO_EXTENSIONS.contains(&ext.as_str()))
    }

    fn read_tags(&self, path: &Path) -> Result<TrackTags, TagError> {
        let unreadable = |e: lofty::error::LoftyError| TagError::Unreadable {
            path: path.to_path_buf(),
            reason: e.to_string(),
        };

        // Audio properties are never used, skip decoding them
        let tagged_file = Probe::open(path)
            .map_err(unreadable)?
            .options(ParseOptions::new().read_properties(false))
            .read()
            .map_err(unreadable)?;

        let tag = tagged_file
            .primary_tag()
            .or_else(|| tagged_file.first_tag())
            .ok_or_else(|| TagError::Untagged(path.to_path_buf()))?;

        TrackTags::from_raw(
            path,
            tag.title().map(|s| s.into_owned()),
            tag.artist().map(|s| s.into_owned()),
            tag.album().map(|s| s.into_owned()),
            tag.get_string(&ItemKey::AlbumArtist).map(str::to_owned),
            tag.track(),
        )
    }
}
