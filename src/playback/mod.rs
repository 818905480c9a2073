//! Serial playback through an external player process
//!
//! One worker thread per engine pops the queue head, hands its file to the
//! external player and waits for it to exit or be skipped.

mod engine;
mod player;

pub use engine::{PlaybackConfig, PlaybackEngine};
pub use player::{ExitOutcome, ExternalPlayer, PlayerKind, PlayerLauncher, PlayerProcess};
