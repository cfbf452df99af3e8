//! Status vocabulary emitted by a scan session.
//!
//! The scan loop reports every decision point as a [`StatusUpdate`] on a
//! one-directional channel; the shell (CLI today, a GUI status label in other
//! frontends) renders the `Display` form. A separate [`ScanEvent::Finished`]
//! marker is emitted exactly once when the loop has fully exited, so the
//! consumer can distinguish "another status line" from "the run is over".
//!
//! The `Display` strings are part of the observable behaviour — existing
//! users read them verbatim — so changes here are user-facing.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::geometry::TargetPoint;

/// One status message from the scan loop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusUpdate {
    /// A cycle started; the desktop is being captured.
    Capturing,
    /// The stitched frame is being searched for the template.
    Searching,
    /// Capturing one of the monitors failed; the cycle was abandoned.
    CaptureFailed { reason: String },
    /// The template was found and attributed to a monitor.
    Found { target: TargetPoint },
    /// A click was issued at the target.
    Clicked { target: TargetPoint },
    /// The pointer was returned to its pre-click position.
    CursorRestored,
    /// The template was found but its coordinates map to no monitor.
    Unmapped,
    /// The template was not found anywhere on the stitched frame.
    NotFound,
    /// The cycle finished and the loop is sleeping until the next one.
    Waiting,
    /// A stop request was observed; the loop is exiting.
    Stopping,
}

impl fmt::Display for StatusUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusUpdate::Capturing => write!(f, "Taking screenshot of all screens..."),
            StatusUpdate::Searching => write!(f, "Searching for target image..."),
            StatusUpdate::CaptureFailed { reason } => {
                write!(f, "Screenshot failed: {reason}")
            }
            StatusUpdate::Found { target } => write!(
                f,
                "Target found at ({}, {}). Moving and clicking...",
                target.x, target.y
            ),
            StatusUpdate::Clicked { target } => {
                write!(f, "Clicked at ({}, {})", target.x, target.y)
            }
            StatusUpdate::CursorRestored => write!(f, "Restored original cursor position"),
            StatusUpdate::Unmapped => {
                write!(f, "Target found but couldn't map to screen coordinates")
            }
            StatusUpdate::NotFound => write!(f, "Target image not found on screen"),
            StatusUpdate::Waiting => write!(f, "Waiting for next iteration..."),
            StatusUpdate::Stopping => write!(f, "Stopping..."),
        }
    }
}

/// An event delivered to the session's consumer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScanEvent {
    /// A status message from the running loop.
    Status(StatusUpdate),
    /// The loop exited and the session is idle again. Sent exactly once per
    /// run, after the final `Stopping` status.
    Finished,
}

// ── Tests ─────────────────────────────────────────────────────────────────────
