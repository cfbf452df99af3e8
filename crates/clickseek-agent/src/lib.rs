//! clickseek-agent library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/` and
//! the binary entry point in `main.rs` share the same module tree.
//!
//! # What does the agent do? (for beginners)
//!
//! Given one reference image (the *template*), the agent repeatedly:
//!
//! 1. Captures every connected monitor and stitches the captures into a
//!    single wide frame.
//! 2. Searches the stitched frame for the template.
//! 3. If found, works out which physical monitor the match is on, moves the
//!    pointer to the match's center, clicks once, and moves the pointer
//!    back where it was.
//! 4. Reports what happened as a status message, sleeps a fixed interval,
//!    and goes again — until `stop()` is called.
//!
//! The OS-facing pieces (real capture via `xcap`, real pointer control via
//! `enigo`) sit behind capability traits so the entire loop runs in tests
//! against in-memory mocks, with no display attached.

/// Application layer: capability traits and the scan-loop use cases.
pub mod application;

/// Infrastructure layer: OS capture and pointer adapters, plus mocks.
pub mod infrastructure;
