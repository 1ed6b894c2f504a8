//! Foundational low-level utilities shared across Studio crates.
//!
//! Provides the atomic file-write helper used by catalog snapshot export and
//! the unix-time helpers used to stamp generated artifacts.

pub mod atomic_io;
pub mod time_utils;

pub use atomic_io::write_text_atomic;
pub use time_utils::{current_unix_timestamp, current_unix_timestamp_ms};
