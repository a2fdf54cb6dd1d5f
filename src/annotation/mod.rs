//! Annotation processor scope caching and grouping.
//!
//! This is the deduplication engine of rule generation. Targets declare their
//! annotation processors as named dependency configurations; the
//! [`ProcessorScopeCache`] partitions those into processor sets, resolves each
//! distinct set once per run, and hands the shared scopes to the processor
//! rule composer at the end of the run.
//!
//! - [`marker`] decides which dependencies must run together in one scope
//! - [`cache`] owns the per-run memoization and the grouping policy

pub mod cache;
pub mod marker;

pub use cache::ProcessorScopeCache;
pub use marker::{AUTO_VALUE_GROUP, AUTO_VALUE_NAME, DependencyMatcher, MarkerCoordinate, NoMarker};
