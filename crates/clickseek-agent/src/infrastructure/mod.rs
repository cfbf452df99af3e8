//! Infrastructure layer for the agent.
//!
//! Contains the OS-facing adapters behind the application layer's capability
//! traits.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `clickseek_core`, but MUST NOT be imported by the application layer.
//!
//! # Sub-modules
//!
//! - **`screen_capture`** – monitor enumeration and per-monitor capture via
//!   the `xcap` crate, plus an always-compiled configurable mock.
//!
//! - **`pointer`** – pointer position/move/click via the `enigo` crate, plus
//!   an always-compiled recording mock.

pub mod pointer;
pub mod screen_capture;
