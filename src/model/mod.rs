//! Catalog data model
//!
//! Entity types shared by the library index, the play queue and the
//! front-ends. Tracks are immutable and reference-counted so the queue and
//! the catalog can hold the same instance.

mod album;
mod artist;
mod track;

pub use album::{Album, AlbumKey};
pub use artist::Artist;
pub use track::Track;
