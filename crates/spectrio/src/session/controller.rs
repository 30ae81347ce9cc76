//! Threaded session controller
//!
//! Runs the state machine on a dedicated "playback-session" thread behind a
//! bounded command channel. The thread alternates between draining commands
//! and housekeeping: applying transport statuses, advancing the sleep timer,
//! forwarding capture frames, and refreshing the shared snapshot.

use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender};

use crate::capture::{CaptureSource, SharedCapture};
use crate::catalog::StationCatalog;
use crate::config::session as cfg;
use crate::error::{Result, SpectrioError};
use crate::focus::AudioFocus;
use crate::prefs::PrefStore;
use crate::session::events::{EventBus, SessionEvent};
use crate::session::machine::SessionCore;
use crate::session::types::{SessionCommand, SessionSnapshot, SwitchDirection};
use crate::transport::{Transport, TransportStatus};

/// Handle to the playback session thread.
///
/// All methods are non-blocking command submissions; outcomes surface as
/// session events and through the polled snapshot. Dropping the handle shuts
/// the session down and joins the thread.
pub struct PlaybackSession {
    cmd_tx: Sender<SessionCommand>,
    bus: Arc<EventBus>,
    shared: Arc<Mutex<SessionSnapshot>>,
    thread: Option<JoinHandle<()>>,
}

impl PlaybackSession {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        catalog: Arc<dyn StationCatalog>,
        prefs: Arc<dyn PrefStore>,
        transport: Box<dyn Transport>,
        status_rx: Receiver<TransportStatus>,
        focus: Box<dyn AudioFocus>,
        capture: Box<dyn CaptureSource>,
        shared_capture: SharedCapture,
    ) -> Result<Self> {
        let (cmd_tx, cmd_rx) = bounded(cfg::COMMAND_QUEUE_DEPTH);
        let bus = Arc::new(EventBus::new());
        let shared = Arc::new(Mutex::new(SessionSnapshot::default()));

        let thread_bus = bus.clone();
        let thread_shared = shared.clone();
        let thread = thread::Builder::new()
            .name("playback-session".into())
            .spawn(move || {
                let mut core = SessionCore::new(
                    catalog,
                    prefs,
                    transport,
                    focus,
                    capture,
                    shared_capture,
                    thread_bus,
                );
                core.start();
                run(&mut core, &cmd_rx, &status_rx, &thread_shared);
            })?;

        Ok(Self {
            cmd_tx,
            bus,
            shared,
            thread: Some(thread),
        })
    }

    /// Subscribe to session events. Returns a receiver for all future events.
    pub fn subscribe(&self) -> Receiver<SessionEvent> {
        self.bus.subscribe()
    }

    /// Latest session snapshot, refreshed every session tick
    pub fn snapshot(&self) -> SessionSnapshot {
        self.shared.lock().map(|s| s.clone()).unwrap_or_default()
    }

    pub fn load_station(&self, id: &str, autoplay: bool) -> Result<()> {
        self.send(SessionCommand::Load {
            id: id.to_string(),
            autoplay,
        })
    }

    pub fn play(&self) -> Result<()> {
        self.send(SessionCommand::Play)
    }

    pub fn pause(&self) -> Result<()> {
        self.send(SessionCommand::Pause)
    }

    pub fn switch_station(&self, direction: SwitchDirection) -> Result<()> {
        self.send(SessionCommand::Switch(direction))
    }

    pub fn focus_lost(&self) -> Result<()> {
        self.send(SessionCommand::FocusLost)
    }

    pub fn focus_gained(&self) -> Result<()> {
        self.send(SessionCommand::FocusGained)
    }

    pub fn start_sleep_timer(&self, minutes: u64) -> Result<()> {
        self.send(SessionCommand::StartSleepTimer { minutes })
    }

    pub fn cancel_sleep_timer(&self) -> Result<()> {
        self.send(SessionCommand::CancelSleepTimer)
    }

    /// Shut down and join the session thread, releasing focus, capture, and
    /// transport. Also runs on drop.
    pub fn shutdown(mut self) {
        self.shutdown_inner();
    }

    fn send(&self, cmd: SessionCommand) -> Result<()> {
        self.cmd_tx
            .send(cmd)
            .map_err(|_| SpectrioError::Session("playback session is not running".into()))
    }

    fn shutdown_inner(&mut self) {
        if let Some(handle) = self.thread.take() {
            let _ = self.cmd_tx.send(SessionCommand::Shutdown);
            let _ = handle.join();
        }
    }
}

impl Drop for PlaybackSession {
    fn drop(&mut self) {
        self.shutdown_inner();
    }
}

fn run(
    core: &mut SessionCore,
    cmd_rx: &Receiver<SessionCommand>,
    status_rx: &Receiver<TransportStatus>,
    shared: &Mutex<SessionSnapshot>,
) {
    let tick = Duration::from_millis(cfg::TICK_MS);
    loop {
        match cmd_rx.recv_timeout(tick) {
            Ok(SessionCommand::Shutdown) => break,
            Ok(cmd) => dispatch(core, cmd),
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }
        while let Ok(status) = status_rx.try_recv() {
            core.handle_transport_status(status);
        }
        core.poll_sleep_timer(Instant::now());
        core.forward_capture();
        if let Ok(mut snap) = shared.lock() {
            *snap = core.snapshot();
        }
    }
    core.shutdown();
}

fn dispatch(core: &mut SessionCore, cmd: SessionCommand) {
    let result = match cmd {
        SessionCommand::Load { id, autoplay } => core.load_station(&id, autoplay),
        SessionCommand::Play => core.play(),
        SessionCommand::Pause => core.pause(),
        SessionCommand::Switch(direction) => core.switch_station(direction),
        SessionCommand::FocusLost => {
            core.focus_lost();
            Ok(())
        }
        SessionCommand::FocusGained => {
            core.focus_gained();
            Ok(())
        }
        SessionCommand::StartSleepTimer { minutes } => {
            core.start_sleep_timer(minutes, Instant::now());
            Ok(())
        }
        SessionCommand::CancelSleepTimer => {
            core.cancel_sleep_timer();
            Ok(())
        }
        // Handled by the loop before dispatch
        SessionCommand::Shutdown => Ok(()),
    };
    if let Err(e) = result {
        eprintln!("Session command failed: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};

    use crate::capture::{new_shared_capture, NullCapture};
    use crate::catalog::{StaticCatalog, Station};
    use crate::focus::NoopFocus;
    use crate::prefs::MemoryPrefStore;
    use crate::session::types::PlaybackState;
    use crate::transport::{status_channel, TransportStatusKind};

    /// Transport that immediately reports every load as ready
    struct AckingTransport {
        status_tx: Sender<TransportStatus>,
        stopped: Arc<AtomicBool>,
    }

    impl Transport for AckingTransport {
        fn load_uri(&mut self, _uri: &str, generation: u64) -> Result<()> {
            let _ = self
                .status_tx
                .send(TransportStatus::new(generation, TransportStatusKind::Ready));
            Ok(())
        }

        fn play(&mut self) -> Result<()> {
            Ok(())
        }

        fn pause(&mut self) -> Result<()> {
            Ok(())
        }

        fn stop(&mut self) -> Result<()> {
            self.stopped.store(true, Ordering::SeqCst);
            Ok(())
        }
    }

    struct TestSession {
        session: PlaybackSession,
        capture: SharedCapture,
        stopped: Arc<AtomicBool>,
    }

    fn spawn_session() -> TestSession {
        let (status_tx, status_rx) = status_channel();
        let stopped = Arc::new(AtomicBool::new(false));
        let capture = new_shared_capture();
        let session = PlaybackSession::new(
            Arc::new(StaticCatalog::new(vec![
                Station::new("a", "Alpha FM", "http://a.example/stream"),
                Station::new("b", "Beta Radio", "http://b.example/stream"),
            ])),
            Arc::new(MemoryPrefStore::new()),
            Box::new(AckingTransport {
                status_tx,
                stopped: stopped.clone(),
            }),
            status_rx,
            Box::new(NoopFocus),
            Box::new(NullCapture),
            capture.clone(),
        )
        .unwrap();
        TestSession {
            session,
            capture,
            stopped,
        }
    }

    fn wait_for(
        rx: &Receiver<SessionEvent>,
        timeout_ms: u64,
        pred: impl Fn(&SessionEvent) -> bool,
    ) -> Option<SessionEvent> {
        let deadline = Instant::now() + Duration::from_millis(timeout_ms);
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match rx.recv_timeout(remaining) {
                Ok(ev) if pred(&ev) => return Some(ev),
                Ok(_) => continue,
                Err(_) => return None,
            }
        }
    }

    fn wait_for_state(session: &PlaybackSession, state: PlaybackState, timeout_ms: u64) -> bool {
        let deadline = Instant::now() + Duration::from_millis(timeout_ms);
        while Instant::now() < deadline {
            if session.snapshot().state == state {
                return true;
            }
            thread::sleep(Duration::from_millis(10));
        }
        false
    }

    #[test]
    fn load_reaches_playing_end_to_end() {
        let t = spawn_session();
        let events = t.session.subscribe();
        t.session.load_station("a", true).unwrap();

        let ev = wait_for(&events, 2000, |e| {
            matches!(e, SessionEvent::StateChanged(PlaybackState::Playing))
        });
        assert!(ev.is_some(), "session never reached Playing");
        assert!(wait_for_state(&t.session, PlaybackState::Playing, 1000));
        assert_eq!(t.session.snapshot().station_id.as_deref(), Some("a"));
    }

    #[test]
    fn capture_frames_reach_subscribers() {
        let t = spawn_session();
        let events = t.session.subscribe();
        t.session.load_station("a", true).unwrap();
        assert!(wait_for_state(&t.session, PlaybackState::Playing, 2000));

        t.capture.lock().unwrap().publish(vec![3, 4, 5, 6]);
        let ev = wait_for(&events, 2000, |e| matches!(e, SessionEvent::Capture(_)));
        assert_eq!(ev, Some(SessionEvent::Capture(vec![3, 4, 5, 6])));
    }

    #[test]
    fn unknown_station_leaves_the_snapshot_alone() {
        let t = spawn_session();
        t.session.load_station("zz", true).unwrap();
        thread::sleep(Duration::from_millis(300));

        let snap = t.session.snapshot();
        assert_eq!(snap.state, PlaybackState::Idle);
        assert_eq!(snap.station_id, None);
    }

    #[test]
    fn shutdown_stops_the_transport_and_joins() {
        let t = spawn_session();
        t.session.load_station("a", true).unwrap();
        assert!(wait_for_state(&t.session, PlaybackState::Playing, 2000));

        t.session.shutdown();
        assert!(t.stopped.load(Ordering::SeqCst));
    }
}
