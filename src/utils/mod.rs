//! Filesystem helpers shared by the writer and the generator.

pub mod fs;

pub use fs::{atomic_write, ensure_dir, safe_write};
