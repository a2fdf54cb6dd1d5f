//! Shared data models for rule generation
//!
//! This module provides the value types that flow between the project model,
//! the scope resolver, the processor scope cache, and the rule composers:
//!
//! - [`Dependency`] - A single coordinate-addressable artifact (`group:name:version`)
//! - [`DependencySet`] - A canonical, order-independent set of dependencies used as a cache key
//! - [`Scope`] - The realized classpath and processor metadata of a dependency set
//! - [`Project`] / [`Target`] / [`Artifact`] - The host project model read from `rulegen.toml`

pub mod project;
pub mod scope;

pub use project::{Artifact, Project, ProjectInfo, Target, TargetKind};
pub use scope::{Scope, ScopeBuilder};

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::core::RulegenError;

/// A single external artifact identified by its coordinate.
///
/// Equality, ordering, and hashing are by coordinate, so two dependencies parsed
/// from the same `group:name:version` string are interchangeable.
///
/// # Examples
///
/// ```rust
/// use rulegen::models::Dependency;
///
/// let dep: Dependency = "com.google.auto.value:auto-value:1.10.4".parse().unwrap();
/// assert_eq!(dep.group(), "com.google.auto.value");
/// assert_eq!(dep.name(), "auto-value");
/// assert_eq!(dep.version(), "1.10.4");
/// assert_eq!(dep.to_string(), "com.google.auto.value:auto-value:1.10.4");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Dependency {
    group: String,
    name: String,
    version: String,
}

impl Dependency {
    /// Create a dependency from its coordinate parts.
    pub fn new(
        group: impl Into<String>,
        name: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            name: name.into(),
            version: version.into(),
        }
    }

    /// The group identifier (e.g. `com.google.auto.value`).
    pub fn group(&self) -> &str {
        &self.group
    }

    /// The artifact name (e.g. `auto-value`).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The version string.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// The full `group:name:version` coordinate.
    pub fn coordinate(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group, self.name, self.version)
    }
}

impl FromStr for Dependency {
    type Err = RulegenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.trim().split(':').collect();
        match parts.as_slice() {
            [group, name, version]
                if !group.is_empty() && !name.is_empty() && !version.is_empty() =>
            {
                Ok(Self::new(*group, *name, *version))
            }
            _ => Err(RulegenError::InvalidCoordinate {
                coordinate: s.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for Dependency {
    type Error = RulegenError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Dependency> for String {
    fn from(dep: Dependency) -> Self {
        dep.to_string()
    }
}

/// A non-empty, deduplicated, unordered set of dependencies.
///
/// Backed by a [`BTreeSet`], so iteration order, equality, and hashing are
/// canonical regardless of the order in which members were supplied. Used as the
/// key of the processor scope cache and never mutated after creation.
///
/// # Examples
///
/// ```rust
/// use rulegen::models::{Dependency, DependencySet};
///
/// let a = Dependency::new("x", "a", "1");
/// let b = Dependency::new("x", "b", "1");
///
/// let forward = DependencySet::new([a.clone(), b.clone()]).unwrap();
/// let backward = DependencySet::new([b, a]).unwrap();
/// assert_eq!(forward, backward);
///
/// assert!(DependencySet::new(Vec::<Dependency>::new()).is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct DependencySet(BTreeSet<Dependency>);

impl DependencySet {
    /// Build a set from any collection of dependencies.
    ///
    /// Returns `None` when the collection is empty.
    pub fn new(dependencies: impl IntoIterator<Item = Dependency>) -> Option<Self> {
        let set: BTreeSet<Dependency> = dependencies.into_iter().collect();
        if set.is_empty() {
            None
        } else {
            Some(Self(set))
        }
    }

    /// Build a singleton set.
    pub fn single(dependency: Dependency) -> Self {
        Self(BTreeSet::from([dependency]))
    }

    /// Number of members (always at least one).
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; present for API symmetry with collections.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate members in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = &Dependency> {
        self.0.iter()
    }

    /// Whether `dependency` is a member.
    pub fn contains(&self, dependency: &Dependency) -> bool {
        self.0.contains(dependency)
    }

    /// The smallest member in canonical order.
    pub fn first(&self) -> &Dependency {
        // Non-empty by construction.
        self.0.iter().next().expect("dependency set is never empty")
    }

    /// Sorted `group:name:version` strings of all members.
    pub fn coordinates(&self) -> Vec<String> {
        self.0.iter().map(Dependency::coordinate).collect()
    }
}

impl fmt::Display for DependencySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.coordinates().join(", "))
    }
}

impl<'a> IntoIterator for &'a DependencySet {
    type Item = &'a Dependency;
    type IntoIter = std::collections::btree_set::Iter<'a, Dependency>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
