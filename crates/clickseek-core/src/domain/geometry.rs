//! Monitor geometry and match-to-monitor coordinate resolution.
//!
//! All positions live in "virtual desktop" coordinates: a single 2D space
//! spanning every connected monitor. Each monitor occupies an axis-aligned
//! rectangle in that space; rectangles may be non-contiguous but are assumed
//! not to overlap.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A connected display and its bounding rectangle in virtual desktop space.
///
/// The monitor set is re-read at the start of every scan cycle — monitors can
/// be hot-plugged between cycles, so nothing here is cached across cycles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Monitor {
    /// Stable identifier assigned by the capture backend.
    pub id: u32,
    /// X coordinate of the top-left corner (may be negative).
    pub x: i32,
    /// Y coordinate of the top-left corner (may be negative).
    pub y: i32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Monitor {
    /// Returns the rightmost X coordinate (exclusive).
    pub fn right(&self) -> i32 {
        self.x + self.width as i32
    }

    /// Returns the bottommost Y coordinate (exclusive).
    pub fn bottom(&self) -> i32 {
        self.y + self.height as i32
    }

    /// Returns `true` if the point lies inside this monitor's rectangle.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }
}

/// The bounding rectangle of a template match within the stitched frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRegion {
    /// X coordinate of the match's top-left corner.
    pub left: i32,
    /// Y coordinate of the match's top-left corner.
    pub top: i32,
    /// Width of the matched rectangle (equals the template width).
    pub width: u32,
    /// Height of the matched rectangle (equals the template height).
    pub height: u32,
}

impl MatchRegion {
    /// Returns the geometric center of the matched rectangle.
    pub fn center(&self) -> TargetPoint {
        TargetPoint {
            x: self.left + (self.width / 2) as i32,
            y: self.top + (self.height / 2) as i32,
        }
    }
}

/// A click target in virtual desktop coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetPoint {
    pub x: i32,
    pub y: i32,
}

/// A match successfully attributed to a monitor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTarget {
    /// The monitor whose rectangle contains the match's top-left corner.
    pub monitor_id: u32,
    /// The center of the matched rectangle, i.e. where the click lands.
    pub point: TargetPoint,
}

/// Error type for coordinate resolution.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MappingError {
    /// The match's top-left corner is outside every known monitor rectangle.
    #[error("match at ({left}, {top}) does not fall inside any monitor")]
    Unmapped { left: i32, top: i32 },
}

/// Attributes a stitched-frame match to the monitor that contains it.
///
/// Monitors are scanned in enumeration order and the first one whose
/// rectangle contains the match's **top-left corner** wins. Only the top-left
/// corner is tested — a match straddling a monitor boundary resolves to
/// whichever monitor holds its top-left corner. That is the behaviour the
/// rest of the pipeline expects, so it is kept as-is rather than testing the
/// center or the full rectangle.
///
/// The match coordinates are taken directly as virtual desktop coordinates.
/// This only holds because the stitcher places monitors left-to-right at
/// cumulative-width offsets; see `domain::stitch` for the full caveat.
///
/// # Errors
///
/// Returns [`MappingError::Unmapped`] if no monitor contains the point.
pub fn resolve_target(
    region: &MatchRegion,
    monitors: &[Monitor],
) -> Result<ResolvedTarget, MappingError> {
    for monitor in monitors {
        if monitor.contains(region.left, region.top) {
            return Ok(ResolvedTarget {
                monitor_id: monitor.id,
                point: region.center(),
            });
        }
    }
    Err(MappingError::Unmapped {
        left: region.left,
        top: region.top,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
