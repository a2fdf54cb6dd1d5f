//! rulegen - deduplicated build rule generation
//!
//! rulegen reads a project whose dependencies have already been resolved and
//! emits declarative Buck rules for it. Two things make this more than a
//! template dump:
//!
//! - **Processor deduplication.** Annotation processor configurations are
//!   partitioned into processor sets, each distinct set is resolved once per
//!   run, and every target that uses a set references one shared
//!   `java_annotation_processor` rule. Processors that must share a class
//!   loader (AutoValue and its extensions) are folded into one combined set.
//! - **Deterministic output.** Rule dependencies are deduplicated and sorted,
//!   targets are processed in path order, and processor rule names are
//!   derived from a digest of the set's coordinates, so repeated runs produce
//!   byte-identical files.
//!
//! # Architecture
//!
//! - [`models`] - dependencies, dependency sets, scopes, and the project model
//! - [`resolver`] - the [`ScopeResolver`](resolver::ScopeResolver) seam and the artifact-graph resolver
//! - [`annotation`] - the per-run processor scope cache and marker grouping
//! - [`composer`] - pure rule composition into [`RuleRecord`](composer::RuleRecord)s
//! - [`writer`] - build file rendering and atomic persistence
//! - [`generator`] - orchestration of one run
//! - [`config`] - generator settings
//! - [`cli`] - the `rulegen` command
//!
//! # Example
//!
//! ```rust,no_run
//! use rulegen::config::GeneratorConfig;
//! use rulegen::generator::Generator;
//! use rulegen::models::Project;
//! use std::path::Path;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let project = Project::load(Path::new("rulegen.toml"))?;
//! let summary = Generator::new(project, GeneratorConfig::default(), ".")?.run().await?;
//! println!("{} processor rules", summary.processor_rules);
//! # Ok(())
//! # }
//! ```

pub mod annotation;
pub mod cli;
pub mod composer;
pub mod config;
pub mod core;
pub mod generator;
pub mod models;
pub mod resolver;
pub mod utils;
pub mod writer;

// test_utils module is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
