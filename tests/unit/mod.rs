//! Unit test suite for rulegen
//!
//! Property tests of the public API that span several modules: processor
//! scope caching and grouping, concurrent compute-if-absent, and composition
//! determinism.
//!
//! ```bash
//! cargo test --test unit
//! ```

mod cache_properties;
mod composition;
mod concurrency;
mod end_to_end;
