//! Pointer control adapters.
//!
//! The real backend wraps the `enigo` crate for position queries and input
//! synthesis. A [`MockPointerDriver`] is always compiled; it records every
//! call so tests can assert on the exact move/click/restore sequence.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Mutex,
};

use crate::application::click_target::{PointerDriver, PointerError};

pub mod native;

pub use native::EnigoPointerDriver;

// ── Mock implementation (always compiled for tests) ───────────────────────────

/// A mock pointer that records all calls without touching the real cursor.
///
/// All records live in `Mutex` fields so tests can share the driver across
/// threads via `Arc`.
#[derive(Default)]
pub struct MockPointerDriver {
    /// The simulated pointer position; updated by `move_to`.
    pub position: Mutex<(i32, i32)>,
    /// Every position passed to `move_to`, in order.
    pub moves: Mutex<Vec<(i32, i32)>>,
    /// The pointer position at the moment of each `click`.
    pub clicks: Mutex<Vec<(i32, i32)>>,
    /// When `true`, every method fails with an injected platform error.
    pub should_fail: AtomicBool,
}

impl MockPointerDriver {
    /// Creates a mock at position `(0, 0)` with empty records.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mock whose pointer starts at the given position.
    pub fn at(x: i32, y: i32) -> Self {
        let driver = Self::default();
        *driver.position.lock().unwrap() = (x, y);
        driver
    }

    fn check_failure(&self) -> Result<(), PointerError> {
        if self.should_fail.load(Ordering::Relaxed) {
            return Err(PointerError::Platform("mock failure".to_string()));
        }
        Ok(())
    }
}

impl PointerDriver for MockPointerDriver {
    /// Returns the simulated position, or fails if `should_fail` is set.
    fn position(&self) -> Result<(i32, i32), PointerError> {
        self.check_failure()?;
        Ok(*self.position.lock().unwrap())
    }

    /// Records the move and updates the simulated position.
    fn move_to(&self, x: i32, y: i32) -> Result<(), PointerError> {
        self.check_failure()?;
        *self.position.lock().unwrap() = (x, y);
        self.moves.lock().unwrap().push((x, y));
        Ok(())
    }

    /// Records a click at the current simulated position.
    fn click(&self) -> Result<(), PointerError> {
        self.check_failure()?;
        let pos = *self.position.lock().unwrap();
        self.clicks.lock().unwrap().push(pos);
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
