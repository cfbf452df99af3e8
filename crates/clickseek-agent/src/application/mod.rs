//! Application layer for the agent.
//!
//! Use cases depend only on capability traits ([`capture_frame::ScreenCapturer`],
//! [`click_target::PointerDriver`]) and on `clickseek-core` domain functions.
//! Infrastructure implementations are injected at construction time, making
//! every use case unit-testable with recording mocks.
//!
//! **Dependency rule**: this layer must not import anything from
//! `infrastructure`.

pub mod capture_frame;
pub mod click_target;
pub mod scan_loop;
