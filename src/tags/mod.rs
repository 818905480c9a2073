//! Tag reading layer
//!
//! Metadata extraction sits behind the [`TagSource`] trait so ingestion
//! can run against lofty (any format), the id3 crate (MP3 only) or an
//! in-memory source in tests.

mod id3_source;
mod lofty_source;
mod traits;

pub use id3_source::Id3TagSource;
pub use lofty_source::LoftyTagSource;
pub use traits::{TagSource, TrackTags, UNKNOWN_ALBUM, UNKNOWN_ARTIST};

use clap::ValueEnum;

/// Which tag reader ingestion uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum TagReader {
    /// lofty: MP3, FLAC, Ogg, Opus, MP4, WAV, AIFF...
    #[default]
    Lofty,

    /// id3: MP3 files only
    Id3,
}

impl TagReader {
    pub fn source(self) -> Box<dyn TagSource> {
        match self {
            TagReader::Lofty => Box::new(LoftyTagSource::new()),
            TagReader::Id3 => Box::new(Id3TagSource::new()),
        }
    }
}
