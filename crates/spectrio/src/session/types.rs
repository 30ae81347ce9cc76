//! Session state, commands, and observable snapshot

use std::fmt;

/// Lifecycle state of the playback session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Idle,
    Loading,
    Playing,
    Paused,
    Buffering,
    Ended,
    Error,
}

impl fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PlaybackState::Idle => "Idle",
            PlaybackState::Loading => "Loading",
            PlaybackState::Playing => "Playing",
            PlaybackState::Paused => "Paused",
            PlaybackState::Buffering => "Buffering",
            PlaybackState::Ended => "Ended",
            PlaybackState::Error => "Error",
        };
        write!(f, "{s}")
    }
}

/// Direction for catalog-relative station switching
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchDirection {
    Next,
    Previous,
}

/// Commands accepted by the session thread
#[derive(Debug)]
pub enum SessionCommand {
    Load { id: String, autoplay: bool },
    Play,
    Pause,
    Switch(SwitchDirection),
    FocusLost,
    FocusGained,
    StartSleepTimer { minutes: u64 },
    CancelSleepTimer,
    Shutdown,
}

/// Read-only view of the session for observers
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionSnapshot {
    pub state: PlaybackState,
    pub station_id: Option<String>,
    pub station_name: Option<String>,
    /// Whole seconds left on the sleep timer, if one is running
    pub sleep_remaining_secs: Option<u64>,
    pub focus_held: bool,
    pub last_error: Option<String>,
}
