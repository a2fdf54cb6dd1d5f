//! Filesystem utilities.
//!
//! Generated build files are always written through [`atomic_write`], so an
//! interrupted run never leaves a half-written `BUCK` file behind.

pub mod atomic;
pub mod dirs;

pub use atomic::{atomic_write, safe_write};
pub use dirs::ensure_dir;
