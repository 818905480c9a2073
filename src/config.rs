//! Runtime configuration

use crate::playback::{PlaybackConfig, PlayerKind};
use crate::tags::TagReader;
use std::path::PathBuf;
use std::time::Duration;

/// Configuration for a jukebox instance
#[derive(Debug, Clone)]
pub struct JukeboxConfig {
    /// Root directory of the music collection
    pub library_root: PathBuf,

    /// External player used for playback
    pub player: PlayerKind,

    /// Tag reader used during ingestion
    pub tag_reader: TagReader,

    /// Worker loop timing
    pub playback: PlaybackConfig,

    /// States buffered per observer before the oldest is dropped
    pub observer_capacity: usize,
}

impl JukeboxConfig {
    /// Create a configuration with defaults for everything but the root
    pub fn new(library_root: PathBuf) -> Self {
        Self {
            library_root,
            player: PlayerKind::default(),
            tag_reader: TagReader::default(),
            playback: PlaybackConfig::default(),
            observer_capacity: 32,
        }
    }

    /// Set the external player
    pub fn with_player(mut self, player: PlayerKind) -> Self {
        self.player = player;
        self
    }

    /// Set the tag reader
    pub fn with_tag_reader(mut self, tag_reader: TagReader) -> Self {
        self.tag_reader = tag_reader;
        self
    }

    /// Set how often the idle worker re-checks the queue
    pub fn with_idle_poll(mut self, idle_poll: Duration) -> Self {
        self.playback = self.playback.with_idle_poll(idle_poll);
        self
    }

    /// Set how many pending states each observer's mailbox holds
    pub fn with_observer_capacity(mut self, capacity: usize) -> Self {
        self.observer_capacity = capacity;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let config = JukeboxConfig::new(PathBuf::from("/music"))
            .with_player(PlayerKind::Omxplayer)
            .with_tag_reader(TagReader::Id3)
            .with_idle_poll(Duration::from_millis(250));

        assert_eq!(config.player, PlayerKind::Omxplayer);
        assert_eq!(config.tag_reader, TagReader::Id3);
        assert_eq!(config.playback.idle_poll, Duration::from_millis(250));
        assert_eq!(config.observer_capacity, 32);

        let config = config.with_observer_capacity(4);
        assert_eq!(config.observer_capacity, 4);
    }
}
