//! Click execution use case: read pointer, move, click, restore.
//!
//! The [`PointerDriver`] trait is the agent's view of the pointer backend.
//! The real implementation wraps `enigo`; tests use the recording mock in
//! `infrastructure::pointer`.
//!
//! The pointer is a global resource shared with the user and every other
//! process — no locking is possible over it. The read-move-click-restore
//! sequence is therefore best-effort: if the user moves the mouse while a
//! click is in flight, the restore still returns to the position read at
//! entry.

use std::sync::Arc;

use thiserror::Error;

use clickseek_core::TargetPoint;

/// Error type for pointer operations.
#[derive(Debug, Error)]
pub enum PointerError {
    /// The OS input-synthesis call failed.
    #[error("platform pointer error: {0}")]
    Platform(String),
}

/// Trait for the platform pointer backend.
pub trait PointerDriver: Send + Sync {
    /// Returns the current pointer position in virtual desktop coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`PointerError::Platform`] if the position cannot be read.
    fn position(&self) -> Result<(i32, i32), PointerError>;

    /// Moves the pointer to an absolute virtual desktop position.
    ///
    /// # Errors
    ///
    /// Returns [`PointerError::Platform`] if the move cannot be synthesised.
    fn move_to(&self, x: i32, y: i32) -> Result<(), PointerError>;

    /// Issues one primary-button click at the current pointer position.
    ///
    /// # Errors
    ///
    /// Returns [`PointerError::Platform`] if the click cannot be synthesised.
    fn click(&self) -> Result<(), PointerError>;
}

/// The Click Target use case.
///
/// Moves to the target, clicks once, and restores the pointer to where it
/// was when the call started. Fire-and-forget: nothing verifies that the
/// click had any effect.
pub struct ClickExecutor {
    driver: Arc<dyn PointerDriver>,
}

impl ClickExecutor {
    /// Creates a new executor with the given pointer backend.
    pub fn new(driver: Arc<dyn PointerDriver>) -> Self {
        Self { driver }
    }

    /// Performs the full read-move-click-restore sequence.
    ///
    /// The restore always targets the position read at entry, even if the
    /// pointer moved externally in between.
    ///
    /// # Errors
    ///
    /// Returns [`PointerError`] if any step fails. A failure after the move
    /// leaves the pointer at the target; the next cycle does not attempt a
    /// compensating restore.
    pub fn click_and_restore(&self, target: TargetPoint) -> Result<(), PointerError> {
        let (origin_x, origin_y) = self.driver.position()?;
        self.driver.move_to(target.x, target.y)?;
        self.driver.click()?;
        self.driver.move_to(origin_x, origin_y)?;
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
