//! Jukebox - tagged music catalog with a shared play queue
//!
//! This library indexes a directory of tagged audio files into artists,
//! albums and tracks, and plays a shared queue one track at a time through
//! an external player process while pushing playback state to any number
//! of front-ends.

pub mod config;
pub mod console;
pub mod control;
pub mod error;
pub mod library;
pub mod model;
pub mod playback;
pub mod status;
pub mod tags;

pub use config::JukeboxConfig;
pub use control::{Jukebox, Selection};
