//! Realized processor scopes.
//!
//! A [`Scope`] is what a [`DependencySet`] resolves to: the classpath of its
//! transitive closure plus the annotation processor and marker-extension
//! classes that closure provides. Scopes are created once per distinct set,
//! shared as `Arc<Scope>`, and never mutated after publication.

use serde::Serialize;
use std::collections::BTreeSet;

use super::DependencySet;

/// The realized classpath and processor metadata of one dependency set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Scope {
    dependencies: DependencySet,
    classpath: Vec<String>,
    processors: Vec<String>,
    extensions: Vec<String>,
}

impl Scope {
    /// Start building the scope of `dependencies`.
    pub fn builder(dependencies: DependencySet) -> ScopeBuilder {
        ScopeBuilder {
            dependencies,
            classpath: BTreeSet::new(),
            processors: BTreeSet::new(),
            extensions: BTreeSet::new(),
        }
    }

    /// The dependency set this scope was resolved from.
    pub fn dependencies(&self) -> &DependencySet {
        &self.dependencies
    }

    /// Sorted artifact paths of the transitive closure.
    pub fn classpath(&self) -> &[String] {
        &self.classpath
    }

    /// Sorted annotation processor class names.
    pub fn processors(&self) -> &[String] {
        &self.processors
    }

    /// Sorted marker-extension class names.
    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    /// Whether the closure carries extension dependencies of the marker kind.
    pub fn has_extensions(&self) -> bool {
        !self.extensions.is_empty()
    }

    /// Whether the scope contributes no annotation processors at all.
    pub fn has_no_processors(&self) -> bool {
        self.processors.is_empty()
    }
}

/// Accumulates scope contents; duplicates collapse and output is sorted.
#[derive(Debug)]
pub struct ScopeBuilder {
    dependencies: DependencySet,
    classpath: BTreeSet<String>,
    processors: BTreeSet<String>,
    extensions: BTreeSet<String>,
}

impl ScopeBuilder {
    /// Add one classpath entry.
    pub fn classpath_entry(mut self, path: impl Into<String>) -> Self {
        self.classpath.insert(path.into());
        self
    }

    /// Add processor class names.
    pub fn processors<I, S>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.processors.extend(classes.into_iter().map(Into::into));
        self
    }

    /// Add marker-extension class names.
    pub fn extensions<I, S>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions.extend(classes.into_iter().map(Into::into));
        self
    }

    /// Freeze the scope.
    pub fn build(self) -> Scope {
        Scope {
            dependencies: self.dependencies,
            classpath: self.classpath.into_iter().collect(),
            processors: self.processors.into_iter().collect(),
            extensions: self.extensions.into_iter().collect(),
        }
    }
}
