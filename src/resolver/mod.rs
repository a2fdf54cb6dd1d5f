//! Scope resolution against the host dependency graph.
//!
//! The [`ScopeResolver`] trait is the narrow, synchronous contract between the
//! processor scope cache and whatever engine actually resolves dependencies:
//! given a [`DependencySet`], produce the realized [`Scope`] of that set in
//! isolation, as if a detached configuration containing only those
//! dependencies had been resolved.
//!
//! [`GraphScopeResolver`] is the implementation used by the CLI. It walks the
//! pre-resolved `[[artifacts]]` table of the project manifest.
//!
//! # Example
//!
//! ```rust
//! use rulegen::models::{Dependency, DependencySet, Project};
//! use rulegen::resolver::{GraphScopeResolver, ScopeResolver};
//!
//! # fn example() -> anyhow::Result<()> {
//! let project = Project::parse(r#"
//! [[artifacts]]
//! coordinate = "com.google.dagger:dagger-compiler:2.51"
//! path = "ext/dagger-compiler-2.51.jar"
//! processors = ["dagger.internal.codegen.ComponentProcessor"]
//! dependencies = ["com.google.dagger:dagger:2.51"]
//!
//! [[artifacts]]
//! coordinate = "com.google.dagger:dagger:2.51"
//! path = "ext/dagger-2.51.jar"
//! "#, "rulegen.toml")?;
//!
//! let resolver = GraphScopeResolver::new(&project)?;
//! let compiler: Dependency = "com.google.dagger:dagger-compiler:2.51".parse()?;
//! let scope = resolver.resolve(&DependencySet::single(compiler))?;
//!
//! assert_eq!(scope.classpath().len(), 2);
//! assert_eq!(scope.processors(), ["dagger.internal.codegen.ComponentProcessor"]);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod graph;

pub use graph::ArtifactGraph;

use anyhow::Result;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

use crate::core::RulegenError;
use crate::models::{Artifact, Dependency, DependencySet, Project, Scope};

/// Resolves a dependency set into its realized scope.
///
/// Implementations must be deterministic for a given set and safe to call from
/// several threads at once. Failures are returned, never cached; the caller
/// decides whether to retry.
pub trait ScopeResolver: Send + Sync {
    /// Resolve `dependencies` on an isolated view containing only that set.
    fn resolve(&self, dependencies: &DependencySet) -> Result<Scope>;
}

impl<T: ScopeResolver + ?Sized> ScopeResolver for Arc<T> {
    fn resolve(&self, dependencies: &DependencySet) -> Result<Scope> {
        (**self).resolve(dependencies)
    }
}

/// Scope resolver backed by the project's resolved artifact table.
#[derive(Debug)]
pub struct GraphScopeResolver {
    artifacts: HashMap<Dependency, Artifact>,
    graph: ArtifactGraph,
}

impl GraphScopeResolver {
    /// Index the project's artifacts and build the artifact graph.
    ///
    /// Fails with [`RulegenError::ArtifactCycle`] if the artifact dependencies
    /// form a cycle.
    pub fn new(project: &Project) -> Result<Self> {
        let mut artifacts = HashMap::new();
        let mut graph = ArtifactGraph::new();

        for artifact in &project.artifacts {
            graph.ensure_node(&artifact.coordinate);
            for dependency in &artifact.dependencies {
                graph.add_dependency(&artifact.coordinate, dependency);
            }
            artifacts.insert(artifact.coordinate.clone(), artifact.clone());
        }

        graph.detect_cycles()?;

        debug!(
            "Indexed {} artifacts with {} dependency edges",
            graph.node_count(),
            graph.edge_count()
        );

        Ok(Self {
            artifacts,
            graph,
        })
    }
}

impl ScopeResolver for GraphScopeResolver {
    fn resolve(&self, dependencies: &DependencySet) -> Result<Scope> {
        let closure = self.graph.closure(dependencies.iter());
        let mut builder = Scope::builder(dependencies.clone());

        for coordinate in &closure {
            let artifact =
                self.artifacts.get(coordinate).ok_or_else(|| RulegenError::ResolutionFailure {
                    coordinate: coordinate.coordinate(),
                    reason: format!("no resolved artifact for {dependencies}"),
                })?;

            builder = builder
                .classpath_entry(artifact.path.as_str())
                .processors(artifact.processors.iter().map(String::as_str))
                .extensions(artifact.extensions.iter().map(String::as_str));
        }

        debug!("Resolved {} to {} classpath entries", dependencies, closure.len());
        Ok(builder.build())
    }
}
