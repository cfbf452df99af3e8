//! Screen capture adapters.
//!
//! The real backend wraps the `xcap` crate, which handles the per-OS capture
//! APIs (DXGI on Windows, ScreenCaptureKit on macOS, X11/Wayland portals on
//! Linux) behind one portable interface, so no `#[cfg(target_os)]` plumbing
//! is needed here.
//!
//! A [`MockScreenCapturer`] is always compiled so tests on any platform can
//! drive the full scan pipeline without a physical display.

use std::collections::HashMap;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Mutex,
};

use image::{Rgba, RgbaImage};

use clickseek_core::Monitor;

use crate::application::capture_frame::{CaptureError, ScreenCapturer};

pub mod native;

pub use native::XcapScreenCapturer;

// ── Mock implementation (always compiled for tests) ───────────────────────────

/// A mock capturer serving a configurable monitor set and canned frames.
///
/// Monitors without an explicit frame yield a solid mid-gray capture sized
/// to the monitor. Tests paste a template into a frame with [`set_frame`]
/// and flip [`fail_capture`] to exercise the capture-failure path mid-run.
///
/// [`set_frame`]: MockScreenCapturer::set_frame
/// [`fail_capture`]: MockScreenCapturer::fail_capture
pub struct MockScreenCapturer {
    /// The monitor list returned by every enumeration.
    pub monitors: Mutex<Vec<Monitor>>,
    /// Canned frames by monitor id.
    frames: Mutex<HashMap<u32, RgbaImage>>,
    /// When `true`, `capture_monitor` fails with an injected platform error.
    pub fail_capture: AtomicBool,
}

impl MockScreenCapturer {
    /// Creates a mock with the given monitors and default gray frames.
    pub fn new(monitors: Vec<Monitor>) -> Self {
        Self {
            monitors: Mutex::new(monitors),
            frames: Mutex::new(HashMap::new()),
            fail_capture: AtomicBool::new(false),
        }
    }

    /// A single 640x480 monitor at the origin.
    pub fn single_small() -> Self {
        Self::new(vec![Monitor {
            id: 0,
            x: 0,
            y: 0,
            width: 640,
            height: 480,
        }])
    }

    /// Two side-by-side monitors, 192x108 and 256x144.
    ///
    /// A 1/10-scale model of a 1920x1080 + 2560x1440 desktop: anything past
    /// x=192 belongs to the second monitor.
    pub fn dual_side_by_side() -> Self {
        Self::new(vec![
            Monitor {
                id: 0,
                x: 0,
                y: 0,
                width: 192,
                height: 108,
            },
            Monitor {
                id: 1,
                x: 192,
                y: 0,
                width: 256,
                height: 144,
            },
        ])
    }

    /// Replaces the canned frame for one monitor.
    pub fn set_frame(&self, monitor_id: u32, frame: RgbaImage) {
        self.frames.lock().unwrap().insert(monitor_id, frame);
    }
}

impl ScreenCapturer for MockScreenCapturer {
    /// Returns the configured monitor list (never fails).
    fn enumerate_monitors(&self) -> Result<Vec<Monitor>, CaptureError> {
        Ok(self.monitors.lock().unwrap().clone())
    }

    /// Serves the canned frame for the monitor, or a gray fill.
    fn capture_monitor(&self, monitor: &Monitor) -> Result<RgbaImage, CaptureError> {
        if self.fail_capture.load(Ordering::Relaxed) {
            return Err(CaptureError::Capture {
                monitor_id: monitor.id,
                reason: "mock failure".to_string(),
            });
        }
        let frames = self.frames.lock().unwrap();
        Ok(frames.get(&monitor.id).cloned().unwrap_or_else(|| {
            RgbaImage::from_pixel(monitor.width, monitor.height, Rgba([128, 128, 128, 255]))
        }))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
