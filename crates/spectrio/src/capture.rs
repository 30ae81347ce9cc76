//! Frequency capture delivery
//!
//! A capture source publishes raw frequency frames (interleaved re/im bytes)
//! into a shared single-frame slot. Delivery is lossy by construction: a new
//! frame overwrites the previous one, and consumers detect freshness by
//! sequence number. Nothing ever queues.

use std::sync::{Arc, Mutex};

use crate::error::Result;

/// Latest-only holder for the newest frequency frame
#[derive(Debug, Default)]
pub struct CaptureSlot {
    seq: u64,
    data: Option<Vec<i8>>,
}

impl CaptureSlot {
    /// Replace the held frame and bump the sequence number
    pub fn publish(&mut self, frame: Vec<i8>) {
        self.seq = self.seq.wrapping_add(1);
        self.data = Some(frame);
    }

    /// Drop the held frame without resetting the sequence counter, so
    /// consumers that saw the old frame still observe the change.
    pub fn clear(&mut self) {
        self.seq = self.seq.wrapping_add(1);
        self.data = None;
    }

    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// The newest frame if it is newer than `last_seen`, with the sequence
    /// number to remember.
    pub fn newer_than(&self, last_seen: u64) -> Option<(u64, Vec<i8>)> {
        if self.seq != last_seen {
            self.data.clone().map(|d| (self.seq, d))
        } else {
            None
        }
    }
}

pub type SharedCapture = Arc<Mutex<CaptureSlot>>;

pub fn new_shared_capture() -> SharedCapture {
    Arc::new(Mutex::new(CaptureSlot::default()))
}

/// Source of frequency frames, typically bound to the platform audio output.
///
/// `enable` may fail on platforms without capture permission; the session
/// treats that as degraded visualization, never as a playback failure.
pub trait CaptureSource: Send {
    fn enable(&mut self) -> Result<()>;
    fn disable(&mut self) -> Result<()>;
}

/// Capture source that produces nothing, for capture-less environments
#[derive(Debug, Default)]
pub struct NullCapture;

impl CaptureSource for NullCapture {
    fn enable(&mut self) -> Result<()> {
        Ok(())
    }

    fn disable(&mut self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn publish_overwrites_and_bumps_seq() {
        let mut slot = CaptureSlot::default();
        slot.publish(vec![1, 2]);
        slot.publish(vec![3, 4]);

        let (seq, data) = slot.newer_than(0).unwrap();
        assert_eq!(seq, 2);
        assert_eq!(data, vec![3, 4]);
    }

    #[test]
    fn newer_than_is_none_once_seen() {
        let mut slot = CaptureSlot::default();
        slot.publish(vec![1, 2]);
        let (seq, _) = slot.newer_than(0).unwrap();
        assert!(slot.newer_than(seq).is_none());
    }

    #[test]
    fn clear_changes_seq_but_yields_no_frame() {
        let mut slot = CaptureSlot::default();
        slot.publish(vec![1, 2]);
        let (seen, _) = slot.newer_than(0).unwrap();

        slot.clear();
        assert_ne!(slot.seq(), seen);
        assert!(slot.newer_than(seen).is_none());
    }
}
