//! Frame capture use case: enumerate monitors, capture each, stitch.
//!
//! The [`ScreenCapturer`] trait is the agent's view of the capture backend.
//! The real implementation wraps `xcap`; tests use the configurable mock in
//! `infrastructure::screen_capture`. The stitching itself is pure and lives
//! in `clickseek_core::domain::stitch`.

use image::RgbaImage;
use thiserror::Error;
use tracing::debug;

use clickseek_core::{compose_frame, Monitor, StitchError, StitchedFrame};

/// Error type for capture operations.
///
/// Every variant aborts the current cycle only; the scan loop reports it as
/// a status message and tries again next cycle.
#[derive(Debug, Error)]
pub enum CaptureError {
    /// The platform API failed while enumerating monitors.
    #[error("platform error while enumerating monitors: {0}")]
    Enumerate(String),

    /// Capturing one monitor's contents failed.
    #[error("failed to capture monitor {monitor_id}: {reason}")]
    Capture { monitor_id: u32, reason: String },

    /// The captures could not be composed into a stitched frame.
    #[error(transparent)]
    Stitch(#[from] StitchError),
}

/// Trait for the platform screen capture backend.
///
/// The monitor list must be stable enough within one cycle to be queried
/// twice consistently: once before capturing and once when resolving a match
/// back to a monitor.
pub trait ScreenCapturer: Send + Sync {
    /// Returns the connected monitors in a stable enumeration order.
    ///
    /// # Errors
    ///
    /// Returns [`CaptureError::Enumerate`] if the OS query fails.
    fn enumerate_monitors(&self) -> Result<Vec<Monitor>, CaptureError>;

    /// Captures one monitor's current contents.
    ///
    /// The returned image is sized exactly to the monitor's width and height.
    ///
    /// # Errors
    ///
    /// Returns [`CaptureError::Capture`] if the OS capture call fails.
    fn capture_monitor(&self, monitor: &Monitor) -> Result<RgbaImage, CaptureError>;
}

/// Captures every monitor and composes the captures into one stitched frame.
///
/// If any single capture fails the whole call fails — a partial frame is
/// never used for matching.
///
/// # Errors
///
/// Propagates enumeration, capture, and composition failures.
pub fn capture_all(capturer: &dyn ScreenCapturer) -> Result<StitchedFrame, CaptureError> {
    let monitors = capturer.enumerate_monitors()?;
    debug!("capturing {} monitor(s)", monitors.len());

    let mut captures = Vec::with_capacity(monitors.len());
    for monitor in monitors {
        let img = capturer.capture_monitor(&monitor)?;
        captures.push((monitor, img));
    }

    Ok(compose_frame(captures)?)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
