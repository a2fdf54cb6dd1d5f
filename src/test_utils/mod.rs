//! Test utilities for rulegen
//!
//! Shared by the inline unit tests and by the `unit` and `integration` test
//! harnesses (through the `test-utils` feature).
//!
//! - [`CountingResolver`] wraps a resolver and counts how often it is called
//! - [`StubResolver`] resolves from an in-memory coordinate table
//! - [`fixtures`] holds sample manifests and a temp project helper
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use rulegen::annotation::ProcessorScopeCache;
//! use rulegen::test_utils::{CountingResolver, StubResolver, dep};
//!
//! let stub = StubResolver::new().processor(dep("x", "dagger"), ["dagger.Processor"]);
//! let counting = Arc::new(CountingResolver::new(stub));
//! let cache = ProcessorScopeCache::new(counting.clone());
//!
//! cache.scopes_for([dep("x", "dagger")]).unwrap();
//! cache.scopes_for([dep("x", "dagger")]).unwrap();
//! assert_eq!(counting.calls(), 1);
//! ```

pub mod fixtures;
pub mod resolvers;

pub use fixtures::ProjectFixture;
pub use resolvers::{CountingResolver, StubResolver};

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::models::Dependency;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Only the first call has an effect. Uses `level` if given, otherwise
/// `RUST_LOG`; with neither, logging stays off.
///
/// ```bash
/// RUST_LOG=rulegen=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .with_ansi(true)
            .try_init();
    });
}

/// Dependency `group:name:1.0`.
pub fn dep(group: &str, name: &str) -> Dependency {
    Dependency::new(group, name, "1.0")
}
