//! Playback session state machine
//!
//! Owns the transport, the audio focus grant, and the capture source. Fully
//! synchronous so every transition is unit-testable; the threaded wrapper in
//! `controller` drives it with commands, transport statuses, and clock ticks.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::capture::{CaptureSource, SharedCapture};
use crate::catalog::{Station, StationCatalog};
use crate::config::prefs as pref_keys;
use crate::error::{Result, SpectrioError};
use crate::focus::AudioFocus;
use crate::prefs::PrefStore;
use crate::session::events::{EventBus, SessionEvent};
use crate::session::types::{PlaybackState, SessionSnapshot, SwitchDirection};
use crate::transport::{Transport, TransportStatus, TransportStatusKind};

pub struct SessionCore {
    catalog: Arc<dyn StationCatalog>,
    prefs: Arc<dyn PrefStore>,
    transport: Box<dyn Transport>,
    focus: Box<dyn AudioFocus>,
    capture: Box<dyn CaptureSource>,
    shared_capture: SharedCapture,
    bus: Arc<EventBus>,

    state: PlaybackState,
    current: Option<Station>,
    /// Bumped on every load; statuses from older loads are discarded
    load_generation: u64,
    /// Start playing once the pending load reports ready
    autoplay_pending: bool,
    /// The last pause came from focus loss, not the user or the sleep timer
    pause_was_involuntary: bool,
    focus_held: bool,
    sleep_deadline: Option<Instant>,
    sleep_remaining_secs: Option<u64>,
    last_capture_seq: u64,
    last_error: Option<String>,
}

impl SessionCore {
    pub fn new(
        catalog: Arc<dyn StationCatalog>,
        prefs: Arc<dyn PrefStore>,
        transport: Box<dyn Transport>,
        focus: Box<dyn AudioFocus>,
        capture: Box<dyn CaptureSource>,
        shared_capture: SharedCapture,
        bus: Arc<EventBus>,
    ) -> Self {
        Self {
            catalog,
            prefs,
            transport,
            focus,
            capture,
            shared_capture,
            bus,
            state: PlaybackState::Idle,
            current: None,
            load_generation: 0,
            autoplay_pending: false,
            pause_was_involuntary: false,
            focus_held: false,
            sleep_deadline: None,
            sleep_remaining_secs: None,
            last_capture_seq: 0,
            last_error: None,
        }
    }

    /// Bring up the capture source. A capture that cannot be enabled only
    /// blanks the visualization; playback is unaffected.
    pub fn start(&mut self) {
        if let Err(e) = self.capture.enable() {
            eprintln!("Spectrum capture disabled: {e}");
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            state: self.state,
            station_id: self.current.as_ref().map(|s| s.id.clone()),
            station_name: self.current.as_ref().map(|s| s.name.clone()),
            sleep_remaining_secs: self.sleep_remaining_secs,
            focus_held: self.focus_held,
            last_error: self.last_error.clone(),
        }
    }

    /// Load a station by catalog id. Fails with `StationNotFound` before any
    /// observable side effect if the id is unknown.
    pub fn load_station(&mut self, id: &str, autoplay: bool) -> Result<()> {
        let station = self
            .catalog
            .find(id)
            .ok_or_else(|| SpectrioError::StationNotFound(id.to_string()))?;

        self.load_generation += 1;
        self.autoplay_pending = autoplay;
        self.last_error = None;
        self.prefs.set_string(pref_keys::LAST_STATION_KEY, &station.id);

        // Stale bars from the previous station must not survive the switch
        if let Ok(mut slot) = self.shared_capture.lock() {
            slot.clear();
        }
        self.bus.emit(SessionEvent::StationChanged {
            id: station.id.clone(),
            name: station.name.clone(),
        });

        let uri = station.stream_url.clone();
        self.current = Some(station);
        self.set_state(PlaybackState::Loading);
        if let Err(e) = self.transport.load_uri(&uri, self.load_generation) {
            return Err(self.fail_transport(e));
        }
        Ok(())
    }

    /// Start or resume playback. With no current station this falls back to
    /// the most recently played station, then the first catalog entry.
    pub fn play(&mut self) -> Result<()> {
        match self.state {
            PlaybackState::Playing | PlaybackState::Buffering => Ok(()),
            PlaybackState::Loading => {
                self.autoplay_pending = true;
                Ok(())
            }
            PlaybackState::Paused => {
                self.request_focus();
                if let Err(e) = self.transport.play() {
                    return Err(self.fail_transport(e));
                }
                self.pause_was_involuntary = false;
                self.set_state(PlaybackState::Playing);
                Ok(())
            }
            PlaybackState::Idle | PlaybackState::Ended | PlaybackState::Error => {
                let id = match &self.current {
                    Some(station) => station.id.clone(),
                    None => self.fallback_station_id()?,
                };
                self.load_station(&id, true)
            }
        }
    }

    pub fn pause(&mut self) -> Result<()> {
        match self.state {
            PlaybackState::Playing | PlaybackState::Buffering => {
                if let Err(e) = self.transport.pause() {
                    return Err(self.fail_transport(e));
                }
                self.pause_was_involuntary = false;
                self.set_state(PlaybackState::Paused);
                Ok(())
            }
            // A pause while loading cancels the pending autoplay
            PlaybackState::Loading => {
                self.autoplay_pending = false;
                Ok(())
            }
            _ => Ok(()),
        }
    }

    /// Load the catalog neighbor of the current station, wrapping at the
    /// ends. With no current station the first entry is used.
    pub fn switch_station(&mut self, direction: SwitchDirection) -> Result<()> {
        let stations = self.catalog.list();
        if stations.is_empty() {
            return Err(SpectrioError::NoStationAvailable);
        }
        let here = self
            .current
            .as_ref()
            .and_then(|c| stations.iter().position(|s| s.id == c.id));
        let next = match (here, direction) {
            (None, _) => 0,
            (Some(i), SwitchDirection::Next) => (i + 1) % stations.len(),
            (Some(i), SwitchDirection::Previous) => (i + stations.len() - 1) % stations.len(),
        };
        let id = stations[next].id.clone();
        self.load_station(&id, true)
    }

    /// Host notification: another app took the audio output
    pub fn focus_lost(&mut self) {
        self.focus_held = false;
        if matches!(self.state, PlaybackState::Playing | PlaybackState::Buffering) {
            if let Err(e) = self.transport.pause() {
                self.fail_transport(e);
                return;
            }
            self.pause_was_involuntary = true;
            self.set_state(PlaybackState::Paused);
        }
    }

    /// Host notification: the audio output is ours again. Resumes only a
    /// pause that focus loss caused; a user pause stays paused.
    pub fn focus_gained(&mut self) {
        if self.state == PlaybackState::Paused && self.pause_was_involuntary {
            self.request_focus();
            if let Err(e) = self.transport.play() {
                self.fail_transport(e);
                return;
            }
            self.pause_was_involuntary = false;
            self.set_state(PlaybackState::Playing);
        }
    }

    /// Arm (or re-arm) the sleep timer and emit the initial countdown tick
    pub fn start_sleep_timer(&mut self, minutes: u64, now: Instant) {
        let secs = minutes * 60;
        self.sleep_deadline = Some(now + Duration::from_secs(secs));
        self.sleep_remaining_secs = Some(secs);
        self.bus.emit(SessionEvent::SleepTick(secs));
    }

    /// Disarm the sleep timer; safe when none is running
    pub fn cancel_sleep_timer(&mut self) {
        self.sleep_deadline = None;
        self.sleep_remaining_secs = None;
        self.bus.emit(SessionEvent::SleepTick(0));
    }

    /// Advance the sleep countdown. Emits a tick when the whole-second
    /// remainder changes; at the deadline forces a pause from any state.
    pub fn poll_sleep_timer(&mut self, now: Instant) {
        let Some(deadline) = self.sleep_deadline else {
            return;
        };
        let remaining = deadline.saturating_duration_since(now).as_secs();
        if remaining == 0 {
            self.sleep_deadline = None;
            self.sleep_remaining_secs = None;
            self.autoplay_pending = false;
            if matches!(self.state, PlaybackState::Playing | PlaybackState::Buffering) {
                if let Err(e) = self.transport.pause() {
                    eprintln!("Sleep timer could not pause the transport: {e}");
                }
            }
            self.pause_was_involuntary = false;
            self.set_state(PlaybackState::Paused);
            self.bus.emit(SessionEvent::SleepTick(0));
        } else if self.sleep_remaining_secs != Some(remaining) {
            self.sleep_remaining_secs = Some(remaining);
            self.bus.emit(SessionEvent::SleepTick(remaining));
        }
    }

    /// Apply a transport status update, discarding results of superseded loads
    pub fn handle_transport_status(&mut self, status: TransportStatus) {
        if status.generation != self.load_generation {
            return;
        }
        match status.kind {
            TransportStatusKind::Ready => match self.state {
                PlaybackState::Loading => {
                    if self.autoplay_pending {
                        self.request_focus();
                        if let Err(e) = self.transport.play() {
                            self.fail_transport(e);
                            return;
                        }
                        self.set_state(PlaybackState::Playing);
                    } else {
                        self.pause_was_involuntary = false;
                        self.set_state(PlaybackState::Paused);
                    }
                }
                PlaybackState::Buffering => self.set_state(PlaybackState::Playing),
                _ => {}
            },
            TransportStatusKind::Buffering => {
                if self.state == PlaybackState::Playing {
                    self.set_state(PlaybackState::Buffering);
                }
            }
            TransportStatusKind::Ended => {
                if matches!(
                    self.state,
                    PlaybackState::Playing | PlaybackState::Paused | PlaybackState::Buffering
                ) {
                    self.set_state(PlaybackState::Ended);
                }
            }
            TransportStatusKind::Error(detail) => {
                self.last_error = Some(detail.clone());
                self.bus.emit(SessionEvent::Error(detail));
                self.set_state(PlaybackState::Error);
            }
        }
    }

    /// Publish the newest capture frame to the bus, if one arrived since the
    /// last call. Lossy by design; intermediate frames are never replayed.
    pub fn forward_capture(&mut self) {
        let frame = self
            .shared_capture
            .lock()
            .ok()
            .and_then(|slot| slot.newer_than(self.last_capture_seq));
        if let Some((seq, data)) = frame {
            self.last_capture_seq = seq;
            self.bus.emit(SessionEvent::Capture(data));
        }
    }

    /// Release everything the session holds: focus grant, capture source,
    /// transport, in that order. Failures are logged and never block the
    /// remaining teardown steps.
    pub fn shutdown(&mut self) {
        if let Err(e) = self.focus.release() {
            eprintln!("Failed to release audio focus: {e}");
        }
        self.focus_held = false;
        if let Err(e) = self.capture.disable() {
            eprintln!("Failed to disable spectrum capture: {e}");
        }
        if let Err(e) = self.transport.stop() {
            eprintln!("Failed to stop transport: {e}");
        }
    }

    fn fallback_station_id(&self) -> Result<String> {
        let last = self.prefs.get_string(pref_keys::LAST_STATION_KEY, "");
        if !last.is_empty() && self.catalog.find(&last).is_some() {
            return Ok(last);
        }
        self.catalog
            .list()
            .first()
            .map(|s| s.id.clone())
            .ok_or(SpectrioError::NoStationAvailable)
    }

    fn request_focus(&mut self) {
        if self.focus_held {
            return;
        }
        match self.focus.request() {
            Ok(granted) => self.focus_held = granted,
            Err(e) => eprintln!("Audio focus request failed: {e}"),
        }
    }

    fn set_state(&mut self, next: PlaybackState) {
        if self.state != next {
            self.state = next;
            self.bus.emit(SessionEvent::StateChanged(next));
        }
    }

    fn fail_transport(&mut self, err: SpectrioError) -> SpectrioError {
        let detail = err.to_string();
        self.last_error = Some(detail.clone());
        self.bus.emit(SessionEvent::Error(detail));
        self.set_state(PlaybackState::Error);
        err
    }
}
