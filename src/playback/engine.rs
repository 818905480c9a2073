//! Queue owner and playback worker
//!
//! All queue mutation, state snapshotting and publishing happens under one
//! mutex, so observers always see snapshots in the order the transitions
//! happened. The worker never holds that mutex while waiting on a player.

use super::player::{ExitOutcome, PlayerLauncher, PlayerProcess};
use crate::model::Track;
use crate::status::{PlaybackState, StatusBroadcaster, WAITING_MESSAGE};
use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Timing knobs for the worker loop
#[derive(Debug, Clone)]
pub struct PlaybackConfig {
    /// How long the worker sleeps on an empty queue before re-checking
    pub idle_poll: Duration,

    /// How often a running player is checked for natural exit
    pub exit_poll: Duration,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            idle_poll: Duration::from_millis(100),
            exit_poll: Duration::from_millis(50),
        }
    }
}

impl PlaybackConfig {
    pub fn with_idle_poll(mut self, idle_poll: Duration) -> Self {
        self.idle_poll = idle_poll;
        self
    }

    pub fn with_exit_poll(mut self, exit_poll: Duration) -> Self {
        self.exit_poll = exit_poll;
        self
    }
}

/// Everything guarded by the engine's single lock
struct EngineState {
    queue: VecDeque<Arc<Track>>,
    now_playing: Option<Arc<Track>>,
    status_message: String,
    // Whether the idle state has been published since the last track
    idle_announced: bool,
}

impl EngineState {
    fn snapshot(&self) -> PlaybackState {
        PlaybackState {
            status_message: self.status_message.clone(),
            queue: self.queue.iter().cloned().collect(),
            now_playing: self.now_playing.clone(),
            is_playing: self.now_playing.is_some(),
        }
    }
}

struct Shared {
    state: Mutex<EngineState>,
    broadcaster: StatusBroadcaster,
    skip_tx: Sender<()>,
    wake_tx: Sender<()>,
    shutdown: AtomicBool,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, EngineState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Publish while still holding the lock so snapshots stay ordered
    fn publish(&self, state: &EngineState) {
        self.broadcaster.publish(state.snapshot());
    }

    /// Report a track that could not be played to the end
    fn report_failure(&self, message: String) {
        let mut state = self.lock();
        state.now_playing = None;
        state.status_message = message;
        self.publish(&state);
    }
}

/// Handle to the play queue and its background worker
///
/// Cloning is cheap; every clone talks to the same queue and worker.
#[derive(Clone)]
pub struct PlaybackEngine {
    shared: Arc<Shared>,
}

impl PlaybackEngine {
    /// Start the engine and its single worker thread
    pub fn start(
        launcher: Arc<dyn PlayerLauncher>,
        broadcaster: StatusBroadcaster,
        config: PlaybackConfig,
    ) -> std::io::Result<Self> {
        let (skip_tx, skip_rx) = crossbeam_channel::bounded(1);
        let (wake_tx, wake_rx) = crossbeam_channel::bounded(1);

        let shared = Arc::new(Shared {
            state: Mutex::new(EngineState {
                queue: VecDeque::new(),
                now_playing: None,
                status_message: WAITING_MESSAGE.to_string(),
                idle_announced: false,
            }),
            broadcaster,
            skip_tx,
            wake_tx,
            shutdown: AtomicBool::new(false),
            worker: Mutex::new(None),
        });

        let worker = Worker {
            shared: Arc::clone(&shared),
            launcher,
            config,
            skip_rx,
            wake_rx,
        };
        let handle = thread::Builder::new()
            .name("playback-worker".to_string())
            .spawn(move || worker.run())?;
        *shared
            .worker
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(handle);

        Ok(Self { shared })
    }

    /// Append a track to the tail of the queue
    pub fn enqueue(&self, track: Arc<Track>) {
        self.enqueue_all(std::iter::once(track));
    }

    /// Append several tracks as one contiguous block; returns how many
    pub fn enqueue_all(&self, tracks: impl IntoIterator<Item = Arc<Track>>) -> usize {
        let mut state = self.shared.lock();
        let before = state.queue.len();
        state.queue.extend(tracks);
        let added = state.queue.len() - before;
        if added > 0 {
            log::debug!("Queued {} track(s), {} waiting", added, state.queue.len());
            self.shared.publish(&state);
        }
        drop(state);

        if added > 0 {
            let _ = self.shared.wake_tx.try_send(());
        }
        added
    }

    /// Drop every track not yet started; the current one keeps playing
    pub fn clear(&self) {
        let mut state = self.shared.lock();
        state.queue.clear();
        log::debug!("Queue cleared");
        self.shared.publish(&state);
    }

    /// Kill the current player, if any. Returns without waiting for the
    /// worker to notice; the worker then advances as on a normal exit.
    pub fn skip(&self) -> bool {
        let state = self.shared.lock();
        match &state.now_playing {
            Some(track) => {
                log::info!("Skipping {}", track.label());
                let _ = self.shared.skip_tx.try_send(());
                true
            }
            None => false,
        }
    }

    /// Current state snapshot
    pub fn state(&self) -> PlaybackState {
        self.shared.lock().snapshot()
    }

    pub fn queue_len(&self) -> usize {
        self.shared.lock().queue.len()
    }

    pub fn broadcaster(&self) -> &StatusBroadcaster {
        &self.shared.broadcaster
    }

    /// Stop the worker, killing any running player
    ///
    /// Blocks until the worker has exited and the player has been reaped.
    /// Tracks still queued are never started. Safe to call more than once.
    pub fn shutdown(&self) {
        {
            // Under the lock, so `next_track` cannot drain the kill below
            let _state = self.shared.lock();
            self.shared.shutdown.store(true, Ordering::SeqCst);
        }
        let _ = self.shared.skip_tx.try_send(());
        let _ = self.shared.wake_tx.try_send(());

        let handle = self
            .shared
            .worker
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take();
        if let Some(handle) = handle {
            if handle.thread().id() == thread::current().id() {
                return;
            }
            if handle.join().is_err() {
                log::error!("Playback worker panicked");
            }
        }
    }
}

/// How playback of one track ended
enum Finish {
    Exited(ExitOutcome),
    Killed,
    Lost(std::io::Error),
}

struct Worker {
    shared: Arc<Shared>,
    launcher: Arc<dyn PlayerLauncher>,
    config: PlaybackConfig,
    skip_rx: Receiver<()>,
    wake_rx: Receiver<()>,
}

impl Worker {
    fn run(self) {
        log::info!("Playback worker started");

        while !self.shared.shutdown.load(Ordering::SeqCst) {
            match self.next_track() {
                Some(track) => self.play(&track),
                None if self.shared.shutdown.load(Ordering::SeqCst) => break,
                None => {
                    let _ = self.wake_rx.recv_timeout(self.config.idle_poll);
                }
            }
        }

        self.shared.lock().now_playing = None;
        log::info!("Playback worker stopped");
    }

    /// Pop the queue head and announce it, or fall back to idle
    fn next_track(&self) -> Option<Arc<Track>> {
        let mut state = self.shared.lock();
        if self.shared.shutdown.load(Ordering::SeqCst) {
            return None;
        }
        match state.queue.pop_front() {
            Some(track) => {
                state.now_playing = Some(Arc::clone(&track));
                state.status_message = format!("Now playing: {}", track.label());
                state.idle_announced = false;
                // Skips aimed at an earlier track must not hit this one
                while self.skip_rx.try_recv().is_ok() {}
                self.shared.publish(&state);
                Some(track)
            }
            None => {
                if !state.idle_announced {
                    state.now_playing = None;
                    state.status_message = WAITING_MESSAGE.to_string();
                    state.idle_announced = true;
                    self.shared.publish(&state);
                }
                None
            }
        }
    }

    fn play(&self, track: &Track) {
        log::info!("Playing {} ({:?})", track.label(), track.file_path);

        let mut process = match self.launcher.launch(&track.file_path) {
            Ok(process) => process,
            Err(e) => {
                log::warn!("Could not play {}: {}", track.label(), e);
                self.shared
                    .report_failure(format!("Could not play {}: {}", track.label(), e));
                return;
            }
        };

        match self.wait(process.as_mut()) {
            Finish::Exited(ExitOutcome::Completed) => {
                log::debug!("Finished {}", track.label());
            }
            Finish::Exited(ExitOutcome::Failed(reason)) => {
                log::warn!("Playback of {} failed: {}", track.label(), reason);
                self.shared
                    .report_failure(format!("Playback of {} failed: {}", track.label(), reason));
            }
            Finish::Killed => {
                log::debug!("Stopped {}", track.label());
            }
            Finish::Lost(e) => {
                log::warn!("Lost track of player for {}: {}", track.label(), e);
                self.shared
                    .report_failure(format!("Playback of {} failed: {}", track.label(), e));
            }
        }
    }

    /// Block until the player exits, a skip arrives or the engine shuts down
    fn wait(&self, process: &mut dyn PlayerProcess) -> Finish {
        loop {
            let signal = self.skip_rx.recv_timeout(self.config.exit_poll);
            let stopping = self.shared.shutdown.load(Ordering::SeqCst);
            match signal {
                Ok(()) | Err(RecvTimeoutError::Disconnected) => {
                    if let Err(e) = process.kill() {
                        // Already exited between the last poll and the kill
                        log::debug!("Kill failed: {}", e);
                    }
                    return Finish::Killed;
                }
                Err(RecvTimeoutError::Timeout) if stopping => {
                    if let Err(e) = process.kill() {
                        log::debug!("Kill failed: {}", e);
                    }
                    return Finish::Killed;
                }
                Err(RecvTimeoutError::Timeout) => match process.try_wait() {
                    Ok(Some(outcome)) => return Finish::Exited(outcome),
                    Ok(None) => {}
                    Err(e) => {
                        let _ = process.kill();
                        return Finish::Lost(e);
                    }
                },
            }
        }
    }
}
