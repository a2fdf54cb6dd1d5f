//! Processor scope cache.
//!
//! Resolving a processor dependency is the expensive step of rule generation,
//! and the same processors show up in the configurations of many targets. The
//! [`ProcessorScopeCache`] memoizes [`ScopeResolver`] results per
//! [`DependencySet`] for the lifetime of one generation run, so every distinct
//! set is resolved once and every target that uses it shares one `Arc<Scope>`
//! and, later, one generated processor rule.
//!
//! # Grouping
//!
//! Processors are independent by default, so a configuration is split into
//! singleton sets. Dependencies of the marker family (see
//! [`DependencyMatcher`]) and dependencies whose scope carries marker
//! extensions are pulled out of that split and folded into one combined set
//! for the whole configuration. The two signals are OR'd.
//!
//! # Concurrency
//!
//! Each key owns a slot guarded by its own mutex. The map shard lock is held
//! only while the slot is fetched or inserted, never while resolving, so
//! threads working on different keys never wait on each other. Threads that
//! ask for the same uncached key block on the slot until the first one has
//! published its scope, and all of them receive the same `Arc`.
//!
//! A failed resolution publishes nothing. Its slot is removed again unless
//! another caller is already waiting on it, and an empty slot is invisible to
//! [`get`](ProcessorScopeCache::get), [`len`](ProcessorScopeCache::len)
//! and [`scopes`](ProcessorScopeCache::scopes); the next request for the key
//! resolves again.

use anyhow::{Context, Result};
use dashmap::DashMap;
use std::collections::BTreeSet;
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, info};

use super::marker::{DependencyMatcher, MarkerCoordinate};
use crate::composer::ProcessorRuleComposer;
use crate::models::{Dependency, DependencySet, Project, Scope, Target};
use crate::resolver::ScopeResolver;
use crate::writer::RuleWriter;

/// Per-key slot; `None` until a resolution succeeds.
type ScopeSlot = Arc<Mutex<Option<Arc<Scope>>>>;

/// Memoizes processor scopes per dependency set for one generation run.
///
/// The cache is append-only: published scopes are never evicted or replaced.
/// Construct one per run and drop it when the run ends.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use rulegen::annotation::ProcessorScopeCache;
/// use rulegen::models::{Dependency, DependencySet, Project};
/// use rulegen::resolver::GraphScopeResolver;
///
/// # fn example() -> anyhow::Result<()> {
/// let project = Project::parse(r#"
/// [[artifacts]]
/// coordinate = "com.google.dagger:dagger-compiler:2.51"
/// path = "ext/dagger-compiler-2.51.jar"
/// processors = ["dagger.internal.codegen.ComponentProcessor"]
/// "#, "rulegen.toml")?;
///
/// let cache = ProcessorScopeCache::new(Arc::new(GraphScopeResolver::new(&project)?));
/// let dagger: Dependency = "com.google.dagger:dagger-compiler:2.51".parse()?;
///
/// let scopes = cache.scopes_for([dagger.clone()])?;
/// assert_eq!(scopes.len(), 1);
/// assert!(!cache.has_empty_processors([dagger])?);
/// # Ok(())
/// # }
/// # example().unwrap();
/// ```
pub struct ProcessorScopeCache {
    resolver: Arc<dyn ScopeResolver>,
    matcher: Box<dyn DependencyMatcher>,
    scopes: DashMap<DependencySet, ScopeSlot>,
}

impl ProcessorScopeCache {
    /// Create a cache that groups the default AutoValue marker family.
    pub fn new(resolver: Arc<dyn ScopeResolver>) -> Self {
        Self::with_matcher(resolver, MarkerCoordinate::default())
    }

    /// Create a cache with an explicit marker matcher.
    pub fn with_matcher(
        resolver: Arc<dyn ScopeResolver>,
        matcher: impl DependencyMatcher + 'static,
    ) -> Self {
        Self {
            resolver,
            matcher: Box::new(matcher),
            scopes: DashMap::new(),
        }
    }

    /// Scope of `dependencies`, resolving it if no scope has been published yet.
    ///
    /// Concurrent callers for the same key observe exactly one resolution and
    /// receive the same `Arc`. Errors propagate unchanged and are not cached.
    pub fn scope(&self, dependencies: &DependencySet) -> Result<Arc<Scope>> {
        let slot = self.slot(dependencies);
        let mut guard = slot.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(scope) = guard.as_ref() {
            debug!("Scope cache hit for {dependencies}");
            return Ok(Arc::clone(scope));
        }

        debug!("Scope cache miss for {dependencies}, resolving");
        let scope = match self.resolver.resolve(dependencies) {
            Ok(scope) => Arc::new(scope),
            Err(e) => {
                drop(guard);
                self.release_slot(dependencies, &slot);
                return Err(e)
                    .with_context(|| format!("Failed to resolve processor scope {dependencies}"));
            }
        };
        *guard = Some(Arc::clone(&scope));
        Ok(scope)
    }

    /// Scopes needed to generate one processor rule per logical group.
    ///
    /// Every dependency gets its own singleton scope, except marker-family
    /// dependencies and dependencies whose scope reports marker extensions,
    /// which are folded into one combined scope appended last.
    pub fn scopes_for(
        &self,
        dependencies: impl IntoIterator<Item = Dependency>,
    ) -> Result<Vec<Arc<Scope>>> {
        let mut scopes = Vec::new();
        let mut accumulated: BTreeSet<Dependency> = BTreeSet::new();

        for (set, scope) in self.singleton_scopes(dependencies)? {
            let is_marker = set.iter().any(|dep| self.matcher.matches(dep));

            if is_marker || scope.has_extensions() {
                accumulated.extend(set.iter().cloned());
            } else {
                scopes.push(scope);
            }
        }

        if let Some(combined) = DependencySet::new(accumulated) {
            debug!("Grouping marker dependencies into {combined}");
            scopes.push(self.scope(&combined)?);
        }

        Ok(scopes)
    }

    /// Whether any dependency resolves to a scope with no processors.
    ///
    /// Uses the same singleton split and cache as [`scopes_for`](Self::scopes_for)
    /// but skips marker grouping.
    pub fn has_empty_processors(
        &self,
        dependencies: impl IntoIterator<Item = Dependency>,
    ) -> Result<bool> {
        Ok(self
            .singleton_scopes(dependencies)?
            .iter()
            .any(|(_, scope)| scope.has_no_processors()))
    }

    /// Dependencies whose singleton scope has no processors, in sorted order.
    pub fn empty_processors(
        &self,
        dependencies: impl IntoIterator<Item = Dependency>,
    ) -> Result<Vec<Dependency>> {
        Ok(self
            .singleton_scopes(dependencies)?
            .into_iter()
            .filter(|(_, scope)| scope.has_no_processors())
            .map(|(set, _)| set.first().clone())
            .collect())
    }

    /// [`scopes_for`](Self::scopes_for) on a named configuration of `target`.
    ///
    /// Fails with [`RulegenError::ConfigurationNotFound`](crate::core::RulegenError::ConfigurationNotFound)
    /// if the target has no such configuration.
    pub fn scopes_for_configuration(
        &self,
        project: &Project,
        target: &Target,
        configuration: &str,
    ) -> Result<Vec<Arc<Scope>>> {
        let dependencies = project.configuration(target, configuration)?;
        self.scopes_for(dependencies.iter().cloned()).with_context(|| {
            format!(
                "Failed to compute processor scopes for '{configuration}' of '{}'",
                project.display_name(target)
            )
        })
    }

    /// [`has_empty_processors`](Self::has_empty_processors) on a named configuration of `target`.
    pub fn has_empty_processors_for_configuration(
        &self,
        project: &Project,
        target: &Target,
        configuration: &str,
    ) -> Result<bool> {
        let dependencies = project.configuration(target, configuration)?;
        self.has_empty_processors(dependencies.iter().cloned())
    }

    /// Published scope of `dependencies`, if any.
    pub fn get(&self, dependencies: &DependencySet) -> Option<Arc<Scope>> {
        let slot = self.scopes.get(dependencies).map(|entry| Arc::clone(entry.value()))?;
        let guard = slot.lock().unwrap_or_else(PoisonError::into_inner);
        guard.clone()
    }

    /// Every published scope, sorted by dependency set.
    pub fn scopes(&self) -> Vec<Arc<Scope>> {
        let slots: Vec<ScopeSlot> =
            self.scopes.iter().map(|entry| Arc::clone(entry.value())).collect();

        let mut scopes: Vec<Arc<Scope>> = slots
            .iter()
            .filter_map(|slot| slot.lock().unwrap_or_else(PoisonError::into_inner).clone())
            .collect();
        scopes.sort_by(|a, b| a.dependencies().cmp(b.dependencies()));
        scopes
    }

    /// Number of published scopes.
    pub fn len(&self) -> usize {
        self.scopes().len()
    }

    /// Whether no scope has been published yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Write one processor rule per published scope.
    ///
    /// Intended to run once, after every target of the run has been processed.
    /// Returns the number of rules written.
    pub fn finalize_processors(&self, writer: &dyn RuleWriter, path: &Path) -> Result<usize> {
        let scopes = self.scopes();
        let rules = ProcessorRuleComposer::compose(&scopes);

        writer
            .write(&rules, path)
            .with_context(|| format!("Failed to write processor rules to {}", path.display()))?;

        info!("Wrote {} processor rules to {}", rules.len(), path.display());
        Ok(rules.len())
    }

    fn slot(&self, dependencies: &DependencySet) -> ScopeSlot {
        if let Some(entry) = self.scopes.get(dependencies) {
            return Arc::clone(entry.value());
        }
        Arc::clone(self.scopes.entry(dependencies.clone()).or_default().value())
    }

    /// Drop the empty slot of a failed key unless another caller still waits on it.
    fn release_slot(&self, dependencies: &DependencySet, slot: &ScopeSlot) {
        // One reference held by the map, one by `slot`.
        self.scopes.remove_if(dependencies, |_, current| {
            Arc::ptr_eq(current, slot) && Arc::strong_count(current) == 2
        });
    }

    /// Singleton split of `dependencies` in sorted order, each with its scope.
    fn singleton_scopes(
        &self,
        dependencies: impl IntoIterator<Item = Dependency>,
    ) -> Result<Vec<(DependencySet, Arc<Scope>)>> {
        let unique: BTreeSet<Dependency> = dependencies.into_iter().collect();

        unique
            .into_iter()
            .map(|dependency| {
                let set = DependencySet::single(dependency);
                let scope = self.scope(&set)?;
                Ok((set, scope))
            })
            .collect()
    }
}

impl std::fmt::Debug for ProcessorScopeCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProcessorScopeCache").field("scopes", &self.len()).finish()
    }
}
