//! Playback session
//!
//! `machine` holds the synchronous state machine, `controller` wraps it in a
//! dedicated thread behind a command channel, `events` fans session events
//! out to observers.

mod controller;
mod events;
mod machine;
mod types;

pub use controller::PlaybackSession;
pub use events::{EventBus, SessionEvent};
pub use machine::SessionCore;
pub use types::{PlaybackState, SessionCommand, SessionSnapshot, SwitchDirection};
