//! Test module organization
//!
//! Test binaries pull the shared helpers in via `#[path = "mod.rs"]` so the
//! mock-node builders live in one place.

pub mod helpers;
