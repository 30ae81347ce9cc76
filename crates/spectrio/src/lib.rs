//! Spectrio — internet radio playback with live spectrum visualization
//!
//! Playback session state machine, spectrum sampling, and bar geometry.
//!
//! The engine is UI-agnostic. Hosts inject the collaborators (station
//! catalog, preference store, stream transport, capture source, audio focus)
//! and observe the session through the event bus.
//!
//! ## Quick start
//!
//! ```no_run
//! use spectrio::session::PlaybackSession;
//! use spectrio::viz::Visualizer;
//! ```

pub mod capture;
pub mod catalog;
pub mod config;
pub mod error;
pub mod focus;
pub mod prefs;
pub mod session;
pub mod transport;
pub mod viz;

pub use capture::{new_shared_capture, CaptureSlot, CaptureSource, NullCapture, SharedCapture};
pub use catalog::{Station, StationCatalog, StaticCatalog};
pub use error::{Result, SpectrioError};
pub use focus::{AudioFocus, NoopFocus};
pub use prefs::{MemoryPrefStore, PrefStore};
pub use session::{
    EventBus, PlaybackSession, PlaybackState, SessionEvent, SessionSnapshot, SwitchDirection,
};
pub use transport::{Transport, TransportStatus, TransportStatusKind};
pub use viz::{sample, BarGeometry, Theme, Visualizer, VisualizerConfig};
