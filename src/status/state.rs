use crate::model::Track;
use serde::Serialize;
use std::sync::Arc;

pub const WAITING_MESSAGE: &str = "Waiting for something to play.";

/// Immutable snapshot pushed to observers on every transition
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaybackState {
    /// Human-readable status line
    pub status_message: String,

    /// Tracks still waiting to play, head first
    pub queue: Vec<Arc<Track>>,

    /// Track handed to the external player, if any
    pub now_playing: Option<Arc<Track>>,

    pub is_playing: bool,
}

impl PlaybackState {
    /// Initial state: nothing queued, nothing playing
    pub fn idle() -> Self {
        Self {
            status_message: WAITING_MESSAGE.to_string(),
            queue: Vec::new(),
            now_playing: None,
            is_playing: false,
        }
    }

    /// Titles of the queued tracks, in order
    pub fn queue_titles(&self) -> Vec<&str> {
        self.queue.iter().map(|t| t.title.as_str()).collect()
    }
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::idle()
    }
}
