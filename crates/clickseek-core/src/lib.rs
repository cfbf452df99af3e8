//! # clickseek-core
//!
//! Domain logic for ClickSeek: monitor geometry, stitched-frame composition,
//! template localization, and the status event vocabulary.
//!
//! This crate has zero dependencies on OS APIs, UI frameworks, or input
//! synthesis. The agent crate supplies those through capability traits and
//! feeds their outputs (monitor lists, per-monitor captures) into the pure
//! functions defined here.
//!
//! # How a scan cycle uses this crate
//!
//! 1. The agent enumerates monitors and captures each one.
//! 2. `domain::stitch::compose_frame` pastes the captures side by side into
//!    one canvas and records each monitor's placement offset.
//! 3. `matcher::locate_template` searches the canvas for the reference image
//!    and returns the best match above the confidence threshold, or `None`.
//! 4. `domain::geometry::resolve_target` attributes the match to a monitor
//!    and yields the click target at the match center.
//!
//! Each step is a pure function, so the whole pipeline is testable with
//! synthetic buffers and no display attached.

pub mod domain;
pub mod matcher;

// Re-export the most-used types at the crate root so callers can write
// `clickseek_core::Monitor` instead of the full module path.
pub use domain::geometry::{
    resolve_target, MappingError, MatchRegion, Monitor, ResolvedTarget, TargetPoint,
};
pub use domain::status::{ScanEvent, StatusUpdate};
pub use domain::stitch::{compose_frame, plan_layout, Placement, StitchError, StitchedFrame};
pub use matcher::locate_template;
