//! Stream transport abstraction
//!
//! The transport owns the actual network/decode pipeline. The session only
//! issues control calls and consumes asynchronous status updates; statuses
//! carry the load generation they belong to so results of superseded loads
//! can be discarded.

use crossbeam_channel::{unbounded, Receiver, Sender};

use crate::error::Result;

/// What the transport reports about the current stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportStatusKind {
    /// The stream stalled and is rebuffering
    Buffering,
    /// The stream is loaded and playable
    Ready,
    /// The stream finished (finite sources) or was closed by the server
    Ended,
    /// The stream failed; the detail is user-presentable
    Error(String),
}

/// A status update tagged with the load generation it belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportStatus {
    pub generation: u64,
    pub kind: TransportStatusKind,
}

impl TransportStatus {
    pub fn new(generation: u64, kind: TransportStatusKind) -> Self {
        Self { generation, kind }
    }
}

/// Channel pair for transport status delivery into the session
pub fn status_channel() -> (Sender<TransportStatus>, Receiver<TransportStatus>) {
    unbounded()
}

/// Playback transport controlled by the session.
///
/// `load_uri` replaces whatever was playing; the outcome arrives as a
/// `TransportStatus` with the given generation. Control calls apply to the
/// most recently loaded stream.
pub trait Transport: Send {
    fn load_uri(&mut self, uri: &str, generation: u64) -> Result<()>;
    fn play(&mut self) -> Result<()>;
    fn pause(&mut self) -> Result<()>;
    fn stop(&mut self) -> Result<()>;
}
