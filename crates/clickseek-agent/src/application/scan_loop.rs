//! ScanSession: the cancellable periodic capture→locate→resolve→act driver.
//!
//! One session owns one template for the duration of a run. `start` spawns a
//! dedicated worker thread (capture, matching, and clicking are synchronous
//! blocking calls, so they stay off the Tokio runtime) and hands back a
//! receiver of [`ScanEvent`]s; `stop` requests a cooperative shutdown.
//!
//! # Lifecycle
//!
//! ```text
//! Idle ──start()──> Running ──stop()──> Stopping ──worker exits──> Idle
//! ```
//!
//! The session is restartable: once the `Finished` event has been delivered,
//! `start` may be called again with a new template.
//!
//! # Cancellation contract
//!
//! `stop` flips a shared atomic flag. The worker checks it at exactly two
//! points: after finishing a cycle (before the inter-cycle sleep) and after
//! waking from that sleep (before the next cycle). An in-flight capture,
//! search, or click is never interrupted, so a stop request can take up to
//! one full cycle plus one sleep interval to take effect. The final status
//! is always `Stopping`, followed by exactly one `Finished` event.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex,
};
use std::time::Duration;

use image::RgbaImage;
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use clickseek_core::{locate_template, resolve_target, ScanEvent, StatusUpdate};

use crate::application::capture_frame::{capture_all, ScreenCapturer};
use crate::application::click_target::{ClickExecutor, PointerDriver};

/// Fixed pause between scan cycles. Deliberately not configurable.
pub const SCAN_INTERVAL: Duration = Duration::from_secs(10);

/// Lifecycle state of a [`ScanSession`], owned exclusively by the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// No worker thread; `start` is allowed.
    Idle,
    /// The worker thread is cycling.
    Running,
    /// A stop was requested; the worker is draining its current cycle.
    Stopping,
}

/// Error type for session lifecycle operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    /// `start` was called while a run was already in progress.
    #[error("scan session is already running")]
    AlreadyRunning,
}

/// A reusable scan session bound to one capture and one pointer backend.
pub struct ScanSession {
    session_id: Uuid,
    capturer: Arc<dyn ScreenCapturer>,
    pointer: Arc<dyn PointerDriver>,
    state: Arc<Mutex<RunState>>,
    keep_running: Arc<AtomicBool>,
    interval: Duration,
}

impl ScanSession {
    /// Creates a session using the fixed production interval.
    pub fn new(capturer: Arc<dyn ScreenCapturer>, pointer: Arc<dyn PointerDriver>) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            capturer,
            pointer,
            state: Arc::new(Mutex::new(RunState::Idle)),
            keep_running: Arc::new(AtomicBool::new(false)),
            interval: SCAN_INTERVAL,
        }
    }

    /// Overrides the inter-cycle interval.
    ///
    /// The production binary always runs at [`SCAN_INTERVAL`]; this hook
    /// exists so the test suites do not sleep for real between cycles.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Returns this session's unique identifier.
    pub fn id(&self) -> Uuid {
        self.session_id
    }

    /// Returns the current lifecycle state.
    pub fn state(&self) -> RunState {
        *self.state.lock().unwrap()
    }

    /// Starts scanning for `template` on a dedicated worker thread.
    ///
    /// Returns the event receiver for this run. The template is owned by the
    /// worker until the run finishes and is never mutated.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::AlreadyRunning`] unless the session is idle.
    pub fn start(
        &self,
        template: RgbaImage,
    ) -> Result<mpsc::UnboundedReceiver<ScanEvent>, SessionError> {
        {
            let mut state = self.state.lock().unwrap();
            if *state != RunState::Idle {
                return Err(SessionError::AlreadyRunning);
            }
            *state = RunState::Running;
            // The flag must flip inside the same critical section as the
            // Idle -> Running transition. Storing it after the unlock opens
            // a window where a concurrent stop() (Running -> Stopping,
            // flag false) is overwritten by this store, leaving a worker
            // that no stop() can ever reach.
            self.keep_running.store(true, Ordering::Relaxed);
        }

        let (tx, rx) = mpsc::unbounded_channel();
        let capturer = Arc::clone(&self.capturer);
        let executor = ClickExecutor::new(Arc::clone(&self.pointer));
        let state = Arc::clone(&self.state);
        let keep_running = Arc::clone(&self.keep_running);
        let interval = self.interval;
        let session_id = self.session_id;

        std::thread::Builder::new()
            .name("clickseek-scan".to_string())
            .spawn(move || {
                info!("scan session {session_id} started");
                scan_loop(&*capturer, &executor, &template, &tx, &keep_running, interval);
                *state.lock().unwrap() = RunState::Idle;
                let _ = tx.send(ScanEvent::Finished);
                info!("scan session {session_id} stopped");
            })
            .expect("failed to spawn scan thread");

        Ok(rx)
    }

    /// Requests a cooperative stop.
    ///
    /// Callable from any thread while the session is running; a no-op
    /// otherwise. Does not interrupt an in-flight cycle — see the module
    /// docs for the cancellation contract.
    pub fn stop(&self) {
        let mut state = self.state.lock().unwrap();
        if *state == RunState::Running {
            *state = RunState::Stopping;
            self.keep_running.store(false, Ordering::Relaxed);
            debug!("stop requested for scan session {}", self.session_id);
        }
    }
}

/// The worker loop. Cycles until the stop flag is observed at a checkpoint.
fn scan_loop(
    capturer: &dyn ScreenCapturer,
    executor: &ClickExecutor,
    template: &RgbaImage,
    tx: &mpsc::UnboundedSender<ScanEvent>,
    keep_running: &AtomicBool,
    interval: Duration,
) {
    loop {
        run_cycle(capturer, executor, template, tx);

        // Checkpoint 1: a stop during the cycle skips the sleep entirely.
        if !keep_running.load(Ordering::Relaxed) {
            emit(tx, StatusUpdate::Stopping);
            return;
        }

        emit(tx, StatusUpdate::Waiting);
        std::thread::sleep(interval);

        // Checkpoint 2: a stop during the sleep prevents the next cycle.
        if !keep_running.load(Ordering::Relaxed) {
            emit(tx, StatusUpdate::Stopping);
            return;
        }
    }
}

/// One full capture→locate→resolve→act pass.
///
/// Every outcome — click, no match, capture failure, mapping failure — is
/// reported as a status and ends the cycle; nothing here terminates the
/// loop.
fn run_cycle(
    capturer: &dyn ScreenCapturer,
    executor: &ClickExecutor,
    template: &RgbaImage,
    tx: &mpsc::UnboundedSender<ScanEvent>,
) {
    emit(tx, StatusUpdate::Capturing);
    let frame = match capture_all(capturer) {
        Ok(frame) => frame,
        Err(e) => {
            warn!("capture failed, skipping cycle: {e}");
            emit(
                tx,
                StatusUpdate::CaptureFailed {
                    reason: e.to_string(),
                },
            );
            return;
        }
    };

    emit(tx, StatusUpdate::Searching);
    let Some(region) = locate_template(&frame.image, template) else {
        emit(tx, StatusUpdate::NotFound);
        return;
    };

    // Second enumeration of the cycle: the match is attributed against a
    // fresh monitor list, not the one used for capture.
    let monitors = match capturer.enumerate_monitors() {
        Ok(monitors) => monitors,
        Err(e) => {
            warn!("monitor re-enumeration failed, skipping cycle: {e}");
            emit(
                tx,
                StatusUpdate::CaptureFailed {
                    reason: e.to_string(),
                },
            );
            return;
        }
    };

    match resolve_target(&region, &monitors) {
        Ok(resolved) => {
            emit(
                tx,
                StatusUpdate::Found {
                    target: resolved.point,
                },
            );
            match executor.click_and_restore(resolved.point) {
                Ok(()) => {
                    emit(
                        tx,
                        StatusUpdate::Clicked {
                            target: resolved.point,
                        },
                    );
                    emit(tx, StatusUpdate::CursorRestored);
                }
                Err(e) => {
                    // Pointer failures are cycle-local like everything else.
                    error!("click sequence failed: {e}");
                }
            }
        }
        Err(e) => {
            debug!("match could not be attributed: {e}");
            emit(tx, StatusUpdate::Unmapped);
        }
    }
}

/// Sends one status event; a dropped receiver is not an error.
fn emit(tx: &mpsc::UnboundedSender<ScanEvent>, status: StatusUpdate) {
    debug!("status: {status}");
    let _ = tx.send(ScanEvent::Status(status));
}

// ── Tests ─────────────────────────────────────────────────────────────────────
