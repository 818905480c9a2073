//! Library index
//!
//! Builds the artist/album/track catalog from tagged files and answers
//! lookups and prefix searches. The index is built once at startup and
//! then shared read-only (`Arc<LibraryIndex>`) with every front-end.

mod index;
mod ingest;
mod search;

pub use index::LibraryIndex;
pub use ingest::{ingest, IngestReport};
pub use search::{SearchKind, SearchResults};
