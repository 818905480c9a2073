//! One-shot ingestion of a library directory

use super::LibraryIndex;
use crate::tags::TagSource;
use anyhow::{Context, Result};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Outcome counters for an ingestion pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestReport {
    /// Files registered in the catalog
    pub added: usize,

    /// Audio files skipped because of tag or registration errors
    pub skipped: usize,

    /// Files ignored as not audio
    pub ignored: usize,
}

/// Walk `root`, read tags for every recognized audio file and build the
/// catalog.
///
/// Per-file problems are logged and counted, never propagated: only an
/// unusable root aborts the pass. Tags are read in parallel, files are
/// registered sequentially in walk order so the result is deterministic.
pub fn ingest(root: &Path, tags: &dyn TagSource) -> Result<(LibraryIndex, IngestReport)> {
    let metadata = std::fs::metadata(root)
        .with_context(|| format!("Failed to open library root: {:?}", root))?;
    if !metadata.is_dir() {
        anyhow::bail!("Library root is not a directory: {:?}", root);
    }

    log::info!("Scanning library at {:?}", root);

    let mut report = IngestReport::default();
    let mut audio_files: Vec<PathBuf> = Vec::new();

    for entry in WalkDir::new(root).follow_links(true).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                log::warn!("Skipping unreadable directory entry: {}", e);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        if tags.supports(entry.path()) {
            audio_files.push(entry.into_path());
        } else {
            report.ignored += 1;
        }
    }

    log::info!("Reading tags from {} audio files", audio_files.len());

    let read: Vec<_> = audio_files
        .par_iter()
        .map(|path| (path, tags.read_tags(path)))
        .collect();

    let mut library = LibraryIndex::new();
    for (path, result) in read {
        let track_tags = match result {
            Ok(track_tags) => track_tags,
            Err(e) => {
                log::warn!("Skipping {:?}: {}", path, e);
                report.skipped += 1;
                continue;
            }
        };

        match library.add_tagged(path, &track_tags) {
            Ok(track) => {
                log::debug!("Added {} (#{:?})", track, track_tags.track_number);
                report.added += 1;
            }
            Err(e) => {
                log::warn!("Skipping {:?}: {}", path, e);
                report.skipped += 1;
            }
        }
    }

    log::info!(
        "Library loaded: {} artists, {} albums, {} tracks ({} skipped)",
        library.artist_count(),
        library.album_count(),
        library.track_count(),
        report.skipped
    );

    Ok((library, report))
}
