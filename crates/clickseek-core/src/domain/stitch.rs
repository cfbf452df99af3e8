//! Stitched frame composition.
//!
//! One scan cycle produces one stitched frame: a single RGBA canvas holding
//! every monitor's capture side by side, plus the offset at which each
//! monitor's pixels were placed. The frame lives for exactly one cycle and is
//! discarded once the cycle completes.
//!
//! # Canvas layout
//!
//! The canvas is sized `(sum of monitor widths, max of monitor heights)` and
//! monitors are pasted left-to-right **in enumeration order**, each at the
//! cumulative width of its predecessors. This is a layout convention, not the
//! true virtual desktop: a monitor whose real origin is `(0, 1080)` (stacked
//! below another) still lands at `(previous widths, 0)` in the canvas.
//!
//! Downstream, the resolver treats stitched-frame coordinates as virtual
//! desktop coordinates directly. The two spaces only coincide for plain
//! left-to-right monitor arrangements; for other arrangements the match can
//! be attributed to the wrong monitor. This is long-standing behaviour that
//! callers rely on, so it is documented here rather than corrected. Stitching
//! at each monitor's true `(x, y)` origin would be the fix if that ever
//! changes.

use image::{imageops, RgbaImage};
use thiserror::Error;

use crate::domain::geometry::Monitor;

/// Where one monitor's pixels were placed in the stitched canvas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    /// The monitor this placement belongs to.
    pub monitor: Monitor,
    /// X offset of the monitor's pixels within the canvas.
    pub offset_x: u32,
    /// Y offset of the monitor's pixels within the canvas (always 0 today).
    pub offset_y: u32,
}

/// One cycle's composite capture of the whole desktop.
#[derive(Debug)]
pub struct StitchedFrame {
    /// The composed canvas.
    pub image: RgbaImage,
    /// Per-monitor placement offsets, in enumeration order.
    pub placements: Vec<Placement>,
}

/// Error type for frame composition.
#[derive(Debug, Error)]
pub enum StitchError {
    /// There are no monitors to stitch.
    #[error("no monitors to stitch")]
    NoMonitors,

    /// A capture's dimensions do not match its monitor's advertised size.
    #[error(
        "capture for monitor {monitor_id} is {actual_w}x{actual_h}, expected {expected_w}x{expected_h}"
    )]
    SizeMismatch {
        monitor_id: u32,
        expected_w: u32,
        expected_h: u32,
        actual_w: u32,
        actual_h: u32,
    },
}

/// Computes the canvas size and per-monitor offsets for a monitor set.
///
/// Pure layout math, split out so it can be tested without allocating any
/// pixel buffers. Offsets are the cumulative widths of preceding monitors.
pub fn plan_layout(monitors: &[Monitor]) -> (u32, u32, Vec<(u32, u32)>) {
    let total_width: u32 = monitors.iter().map(|m| m.width).sum();
    let max_height: u32 = monitors.iter().map(|m| m.height).max().unwrap_or(0);

    let mut offsets = Vec::with_capacity(monitors.len());
    let mut cursor = 0u32;
    for monitor in monitors {
        offsets.push((cursor, 0));
        cursor += monitor.width;
    }

    (total_width, max_height, offsets)
}

/// Composes per-monitor captures into a single stitched frame.
///
/// `captures` must be in monitor-enumeration order; each image must be sized
/// exactly to its monitor's width and height.
///
/// # Errors
///
/// Returns [`StitchError::NoMonitors`] for an empty input and
/// [`StitchError::SizeMismatch`] if any capture disagrees with its monitor's
/// advertised dimensions. No partial frame is ever produced.
pub fn compose_frame(captures: Vec<(Monitor, RgbaImage)>) -> Result<StitchedFrame, StitchError> {
    if captures.is_empty() {
        return Err(StitchError::NoMonitors);
    }

    for (monitor, img) in &captures {
        if img.width() != monitor.width || img.height() != monitor.height {
            return Err(StitchError::SizeMismatch {
                monitor_id: monitor.id,
                expected_w: monitor.width,
                expected_h: monitor.height,
                actual_w: img.width(),
                actual_h: img.height(),
            });
        }
    }

    let monitors: Vec<Monitor> = captures.iter().map(|(m, _)| m.clone()).collect();
    let (total_width, max_height, offsets) = plan_layout(&monitors);

    let mut canvas = RgbaImage::new(total_width, max_height);
    let mut placements = Vec::with_capacity(captures.len());

    for ((monitor, img), (offset_x, offset_y)) in captures.into_iter().zip(offsets) {
        imageops::replace(&mut canvas, &img, i64::from(offset_x), i64::from(offset_y));
        placements.push(Placement {
            monitor,
            offset_x,
            offset_y,
        });
    }

    Ok(StitchedFrame {
        image: canvas,
        placements,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
