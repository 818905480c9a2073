//! Push-based delivery of playback state to registered observers
//!
//! Every observer owns a bounded mailbox. Callback observers are drained
//! by a dedicated delivery thread, so a slow or failing observer only ever
//! delays itself; `publish` never blocks. When a mailbox is full the oldest
//! pending snapshot is discarded in favour of the new one: snapshots are
//! complete, so the observer still converges on the latest state.

use super::PlaybackState;
use crossbeam_channel::{Receiver, Sender, TrySendError};
use std::collections::BTreeMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, Weak};
use std::thread;

const DEFAULT_MAILBOX_CAPACITY: usize = 32;

/// Receives every published playback state
pub trait StatusObserver: Send + Sync + 'static {
    fn on_state(&self, state: &PlaybackState) -> anyhow::Result<()>;
}

impl<F> StatusObserver for F
where
    F: Fn(&PlaybackState) -> anyhow::Result<()> + Send + Sync + 'static,
{
    fn on_state(&self, state: &PlaybackState) -> anyhow::Result<()> {
        self(state)
    }
}

/// Handle returned on registration, used to unregister
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObserverId(u64);

/// Channel-style subscription: the caller drains `receiver` itself.
/// Delivery stops once the subscription is dropped.
pub struct Subscription {
    pub id: ObserverId,
    pub receiver: Receiver<PlaybackState>,
    _alive: Arc<()>,
}

struct Mailbox {
    sender: Sender<PlaybackState>,
    // Second handle on the queue so the publisher can evict the oldest entry
    evict: Receiver<PlaybackState>,
    // The evict handle keeps the channel connected, so liveness is tracked here
    owner: Weak<()>,
}

impl Mailbox {
    /// Returns false once the receiving side is gone
    fn deliver(&self, id: ObserverId, state: &PlaybackState) -> bool {
        if self.owner.strong_count() == 0 {
            return false;
        }
        match self.sender.try_send(state.clone()) {
            Ok(()) => true,
            Err(TrySendError::Full(state)) => {
                let _ = self.evict.try_recv();
                log::debug!("Observer {:?} is lagging, dropped its oldest pending state", id);
                !matches!(self.sender.try_send(state), Err(TrySendError::Disconnected(_)))
            }
            Err(TrySendError::Disconnected(_)) => false,
        }
    }
}

struct Inner {
    next_id: AtomicU64,
    capacity: usize,
    mailboxes: Mutex<BTreeMap<ObserverId, Mailbox>>,
    latest: Mutex<Option<PlaybackState>>,
}

/// Fan-out point between the playback engine and its front-ends
#[derive(Clone)]
pub struct StatusBroadcaster {
    inner: Arc<Inner>,
}

impl StatusBroadcaster {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MAILBOX_CAPACITY)
    }

    /// Broadcaster whose per-observer mailboxes hold `capacity` states
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: Arc::new(Inner {
                next_id: AtomicU64::new(1),
                capacity: capacity.max(1),
                mailboxes: Mutex::new(BTreeMap::new()),
                latest: Mutex::new(None),
            }),
        }
    }

    fn mailboxes(&self) -> MutexGuard<'_, BTreeMap<ObserverId, Mailbox>> {
        self.inner
            .mailboxes
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn open_mailbox(&self) -> (ObserverId, Receiver<PlaybackState>, Arc<()>) {
        let id = ObserverId(self.inner.next_id.fetch_add(1, Ordering::Relaxed));
        let (sender, receiver) = crossbeam_channel::bounded(self.inner.capacity);
        let alive = Arc::new(());
        let mailbox = Mailbox {
            sender,
            evict: receiver.clone(),
            owner: Arc::downgrade(&alive),
        };
        self.mailboxes().insert(id, mailbox);
        (id, receiver, alive)
    }

    /// Register a callback observer.
    ///
    /// It sees the next published state onwards; nothing earlier is
    /// replayed. Errors and panics inside the callback are logged and
    /// confined to this observer.
    pub fn register(&self, observer: impl StatusObserver) -> ObserverId {
        let (id, receiver, alive) = self.open_mailbox();

        let spawned = thread::Builder::new()
            .name(format!("status-observer-{}", id.0))
            .spawn(move || {
                let _alive = alive;
                for state in receiver.iter() {
                    match panic::catch_unwind(AssertUnwindSafe(|| observer.on_state(&state))) {
                        Ok(Ok(())) => {}
                        Ok(Err(e)) => log::warn!("Observer {:?} failed: {:#}", id, e),
                        Err(_) => log::warn!("Observer {:?} panicked while handling a state", id),
                    }
                }
                log::debug!("Observer {:?} delivery thread finished", id);
            });

        if let Err(e) = spawned {
            log::warn!("Could not start delivery thread for observer {:?}: {}", id, e);
            self.unregister(id);
        }
        id
    }

    /// Register a channel subscriber
    pub fn subscribe(&self) -> Subscription {
        let (id, receiver, alive) = self.open_mailbox();
        Subscription {
            id,
            receiver,
            _alive: alive,
        }
    }

    /// Stop delivering to an observer; returns false if it was unknown
    pub fn unregister(&self, id: ObserverId) -> bool {
        self.mailboxes().remove(&id).is_some()
    }

    /// Hand `state` to every observer in registration order without
    /// waiting for any of them
    pub fn publish(&self, state: PlaybackState) {
        let mut mailboxes = self.mailboxes();
        mailboxes.retain(|id, mailbox| {
            let alive = mailbox.deliver(*id, &state);
            if !alive {
                log::debug!("Observer {:?} went away, unregistering", id);
            }
            alive
        });
        drop(mailboxes);

        *self
            .inner
            .latest
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(state);
    }

    /// Most recently published state, if any
    pub fn latest(&self) -> Option<PlaybackState> {
        self.inner
            .latest
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn observer_count(&self) -> usize {
        self.mailboxes().len()
    }
}

impl Default for StatusBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}
