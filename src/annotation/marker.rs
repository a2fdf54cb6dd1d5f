//! Marker dependency matching.
//!
//! Some processor families only work when the core processor and all of its
//! extensions run in one processor invocation. AutoValue is the canonical
//! example: `auto-value` discovers `AutoValueExtension`s on its own classpath.
//! The processor scope cache folds every dependency of such a family into one
//! combined scope. Which dependencies belong to the family is decided by a
//! [`DependencyMatcher`] handed to the cache.

use serde::{Deserialize, Serialize};

use crate::models::Dependency;

/// Default marker group (AutoValue).
pub const AUTO_VALUE_GROUP: &str = "com.google.auto.value";

/// Default marker name prefix (AutoValue).
pub const AUTO_VALUE_NAME: &str = "auto-value";

/// Decides whether a dependency belongs to the marker family.
pub trait DependencyMatcher: Send + Sync {
    /// Whether `dependency` belongs to the marker family.
    fn matches(&self, dependency: &Dependency) -> bool;
}

impl<F> DependencyMatcher for F
where
    F: Fn(&Dependency) -> bool + Send + Sync,
{
    fn matches(&self, dependency: &Dependency) -> bool {
        self(dependency)
    }
}

/// Matches dependencies with an exact group and a name prefix.
///
/// # Examples
///
/// ```rust
/// use rulegen::annotation::{DependencyMatcher, MarkerCoordinate};
/// use rulegen::models::Dependency;
///
/// let marker = MarkerCoordinate::default();
/// assert!(marker.matches(&Dependency::new("com.google.auto.value", "auto-value", "1.10.4")));
/// assert!(marker.matches(&Dependency::new(
///     "com.google.auto.value",
///     "auto-value-annotations",
///     "1.10.4",
/// )));
/// assert!(!marker.matches(&Dependency::new("com.google.auto", "auto-common", "1.2")));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerCoordinate {
    /// Exact group the dependency must have.
    pub group: String,
    /// Prefix the dependency name must start with.
    pub name_prefix: String,
}

impl MarkerCoordinate {
    /// Create a matcher for `group` and `name_prefix`.
    pub fn new(group: impl Into<String>, name_prefix: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            name_prefix: name_prefix.into(),
        }
    }
}

impl Default for MarkerCoordinate {
    fn default() -> Self {
        Self::new(AUTO_VALUE_GROUP, AUTO_VALUE_NAME)
    }
}

impl DependencyMatcher for MarkerCoordinate {
    fn matches(&self, dependency: &Dependency) -> bool {
        dependency.group() == self.group && dependency.name().starts_with(&self.name_prefix)
    }
}

/// Matcher that never matches; disables marker grouping.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoMarker;

impl DependencyMatcher for NoMarker {
    fn matches(&self, _dependency: &Dependency) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_custom_marker() {
        let marker = MarkerCoordinate::new("com.example.auto", "auto-value");
        assert!(marker.matches(&Dependency::new("com.example.auto", "auto-value", "1")));
        assert!(!marker.matches(&Dependency::new("com.example", "auto-value", "1")));
        assert!(!marker.matches(&Dependency::new("com.example.auto", "value", "1")));
    }

    #[test]
    fn test_closure_matcher() {
        let matcher = |dep: &Dependency| dep.name().ends_with("-compiler");
        assert!(matcher.matches(&Dependency::new("g", "dagger-compiler", "1")));
        assert!(!matcher.matches(&Dependency::new("g", "dagger", "1")));
    }

    #[test]
    fn test_no_marker() {
        assert!(!NoMarker.matches(&Dependency::new(AUTO_VALUE_GROUP, AUTO_VALUE_NAME, "1")));
    }
}
