//! Pure domain logic with no OS dependencies.
//!
//! Everything here is a function of its inputs: monitor rectangles, stitched
//! canvases, match regions, and the status vocabulary. The OS-facing pieces
//! (actual capture, actual pointer control) live in the agent crate behind
//! capability traits.

pub mod geometry;
pub mod status;
pub mod stitch;
