//! Session event fan-out
//!
//! Observers subscribe and receive every event emitted after their
//! subscription; there is no history or replay. Each subscriber gets its own
//! unbounded channel so a slow observer never blocks the session thread or
//! its peers. Disconnected subscribers are pruned on the next emit.

use std::sync::Mutex;

use crossbeam_channel::{unbounded, Receiver, Sender};

use crate::session::types::PlaybackState;

/// Events published by the playback session
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    StateChanged(PlaybackState),
    StationChanged { id: String, name: String },
    /// Newest frequency capture frame (interleaved re/im bytes)
    Capture(Vec<i8>),
    /// Whole seconds remaining on the sleep timer; 0 on expiry or cancel
    SleepTick(u64),
    /// User-presentable description of a failure
    Error(String),
}

/// Event bus for session observers
pub struct EventBus {
    subscribers: Mutex<Vec<Sender<SessionEvent>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            subscribers: Mutex::new(Vec::new()),
        }
    }

    /// Subscribe to session events. Returns a receiver for all future events.
    pub fn subscribe(&self) -> Receiver<SessionEvent> {
        let (tx, rx) = unbounded();
        if let Ok(mut subs) = self.subscribers.lock() {
            subs.push(tx);
        }
        rx
    }

    /// Emit an event to all subscribers, pruning any that disconnected
    pub fn emit(&self, event: SessionEvent) {
        if let Ok(mut subs) = self.subscribers.lock() {
            subs.retain(|tx| tx.send(event.clone()).is_ok());
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().map(|s| s.len()).unwrap_or(0)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
