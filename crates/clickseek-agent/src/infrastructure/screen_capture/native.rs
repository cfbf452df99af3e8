//! `xcap`-backed screen capture.
//!
//! Monitor handles are re-fetched on every call rather than cached: monitors
//! can be hot-plugged between cycles, and the scan loop's contract is that
//! each cycle sees a fresh view of the hardware.

use image::RgbaImage;

use clickseek_core::Monitor;

use crate::application::capture_frame::{CaptureError, ScreenCapturer};

/// The production capture backend.
#[derive(Debug, Default)]
pub struct XcapScreenCapturer;

impl XcapScreenCapturer {
    pub fn new() -> Self {
        Self
    }
}

impl ScreenCapturer for XcapScreenCapturer {
    fn enumerate_monitors(&self) -> Result<Vec<Monitor>, CaptureError> {
        let handles =
            xcap::Monitor::all().map_err(|e| CaptureError::Enumerate(e.to_string()))?;

        let mut monitors = Vec::with_capacity(handles.len());
        for handle in handles {
            monitors.push(Monitor {
                id: handle.id().map_err(|e| CaptureError::Enumerate(e.to_string()))?,
                x: handle.x().map_err(|e| CaptureError::Enumerate(e.to_string()))?,
                y: handle.y().map_err(|e| CaptureError::Enumerate(e.to_string()))?,
                width: handle
                    .width()
                    .map_err(|e| CaptureError::Enumerate(e.to_string()))?,
                height: handle
                    .height()
                    .map_err(|e| CaptureError::Enumerate(e.to_string()))?,
            });
        }
        Ok(monitors)
    }

    fn capture_monitor(&self, monitor: &Monitor) -> Result<RgbaImage, CaptureError> {
        let handles = xcap::Monitor::all().map_err(|e| CaptureError::Capture {
            monitor_id: monitor.id,
            reason: e.to_string(),
        })?;

        for handle in handles {
            let id = handle.id().map_err(|e| CaptureError::Capture {
                monitor_id: monitor.id,
                reason: e.to_string(),
            })?;
            if id == monitor.id {
                return handle.capture_image().map_err(|e| CaptureError::Capture {
                    monitor_id: monitor.id,
                    reason: e.to_string(),
                });
            }
        }

        // The monitor disappeared between enumeration and capture.
        Err(CaptureError::Capture {
            monitor_id: monitor.id,
            reason: "monitor no longer present".to_string(),
        })
    }
}
