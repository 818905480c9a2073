//! ID3v2 tag source for MP3-only libraries

use super::traits::{extension, TagSource, TrackTags};
use crate::error::TagError;
use id3::{Tag, TagLike};
use std::path::Path;

/// Reads ID3 frames directly with the id3 crate
pub struct Id3TagSource;

impl Id3TagSource {
    pub fn new() -> Self {
        Self
    }
}

impl Default for Id3TagSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TagSource for Id3TagSource {
    fn supports(&self, path: &Path) -> bool {
        extension(path).as_deref() == Some("mp3")
    }

    fn read_tags(&self, path: &Path) -> Result<TrackTags, TagError> {
        let tag = match Tag::read_from_path(path) {
            Ok(tag) => tag,
            Err(e) if matches!(e.kind, id3::ErrorKind::NoTag) => {
                return Err(TagError::Untagged(path.to_path_buf()));
            }
            Err(e) => {
                return Err(TagError::Unreadable {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                });
            }
        };

        TrackTags::from_raw(
            path,
            tag.title().map(str::to_owned),
            tag.artist().map(str::to_owned),
            tag.album().map(str::to_owned),
            tag.album_artist().map(str::to_owned),
            tag.track(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use id3::Version;
    use tempfile::TempDir;

    #[test]
    fn test_only_mp3_supported() {
        let source = Id3TagSource::new();
        assert!(source.supports(Path::new("/m/a.mp3")));
        assert!(!source.supports(Path::new("/m/a.flac")));
    }

    #[test]
    fn test_reads_written_frames() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("track.mp3");
        std::fs::write(&path, b"").unwrap();

        let mut tag = Tag::new();
        tag.set_title("Cherry-Coloured Funk");
        tag.set_artist("Cocteau Twins");
        tag.set_album("Heaven or Las Vegas");
        tag.set_album_artist("Cocteau Twins");
        tag.set_track(2);
        tag.write_to_path(&path, Version::Id3v24).unwrap();

        let tags = Id3TagSource::new().read_tags(&path).unwrap();
        assert_eq!(tags.title, "Cherry-Coloured Funk");
        assert_eq!(tags.album, "Heaven or Las Vegas");
        assert_eq!(tags.album_artist, "Cocteau Twins");
        assert_eq!(tags.track_number, Some(2));
    }

    #[test]
    fn test_untagged_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bare.mp3");
        std::fs::write(&path, b"no tag here").unwrap();

        let result = Id3TagSource::new().read_tags(&path);
        assert!(matches!(result, Err(TagError::Untagged(_))));
    }
}
