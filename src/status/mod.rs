//! Playback status fan-out
//!
//! The playback engine is the single publisher; web and terminal
//! front-ends register as observers and receive every state transition.

mod broadcaster;
mod state;

pub use broadcaster::{ObserverId, StatusBroadcaster, StatusObserver, Subscription};
pub use state::{PlaybackState, WAITING_MESSAGE};
