//! Resolver doubles for cache and generator tests.

use anyhow::Result;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use crate::core::RulegenError;
use crate::models::{Dependency, DependencySet, Scope};
use crate::resolver::ScopeResolver;

#[derive(Debug, Clone, Default)]
struct StubEntry {
    processors: Vec<String>,
    extensions: Vec<String>,
}

/// Resolver backed by an in-memory table of dependencies.
///
/// A set resolves to the union of its members' entries; each member adds
/// `ext/<group>/<name>-<version>.jar` to the classpath. Unknown members and
/// members marked failing produce [`RulegenError::ResolutionFailure`].
#[derive(Debug, Default)]
pub struct StubResolver {
    entries: BTreeMap<Dependency, StubEntry>,
    failing: Mutex<BTreeSet<Dependency>>,
}

impl StubResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `dependency` as contributing `processors`.
    pub fn processor<I, S>(mut self, dependency: Dependency, processors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entries
            .entry(dependency)
            .or_default()
            .processors
            .extend(processors.into_iter().map(Into::into));
        self
    }

    /// Register `dependency` as carrying marker `extensions`.
    pub fn extension<I, S>(mut self, dependency: Dependency, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entries
            .entry(dependency)
            .or_default()
            .extensions
            .extend(extensions.into_iter().map(Into::into));
        self
    }

    /// Register `dependency` as contributing nothing but a classpath entry.
    pub fn empty(mut self, dependency: Dependency) -> Self {
        self.entries.entry(dependency).or_default();
        self
    }

    /// Make resolutions that involve `dependency` fail until cleared.
    pub fn set_failing(&self, dependency: &Dependency, failing: bool) {
        let mut set = self.failing.lock().unwrap_or_else(PoisonError::into_inner);
        if failing {
            set.insert(dependency.clone());
        } else {
            set.remove(dependency);
        }
    }
}

impl ScopeResolver for StubResolver {
    fn resolve(&self, dependencies: &DependencySet) -> Result<Scope> {
        let failing = self.failing.lock().unwrap_or_else(PoisonError::into_inner).clone();
        let mut builder = Scope::builder(dependencies.clone());

        for dep in dependencies {
            if failing.contains(dep) {
                return Err(RulegenError::ResolutionFailure {
                    coordinate: dep.coordinate(),
                    reason: "stubbed failure".to_string(),
                }
                .into());
            }
            let entry = self.entries.get(dep).ok_or_else(|| RulegenError::ResolutionFailure {
                coordinate: dep.coordinate(),
                reason: "not registered with stub resolver".to_string(),
            })?;

            let path = format!("ext/{}/{}-{}.jar", dep.group(), dep.name(), dep.version());
            builder = builder
                .classpath_entry(path)
                .processors(entry.processors.iter().map(String::as_str))
                .extensions(entry.extensions.iter().map(String::as_str));
        }

        Ok(builder.build())
    }
}

/// Wraps a resolver and records every call.
///
/// An optional delay widens race windows in concurrency tests.
#[derive(Debug)]
pub struct CountingResolver<R> {
    inner: R,
    delay: Option<Duration>,
    calls: AtomicUsize,
    per_set: Mutex<HashMap<DependencySet, usize>>,
}

impl<R: ScopeResolver> CountingResolver<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            delay: None,
            calls: AtomicUsize::new(0),
            per_set: Mutex::new(HashMap::new()),
        }
    }

    /// Sleep for `delay` before every resolution.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Total number of resolutions.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Number of resolutions of `dependencies`.
    pub fn calls_for(&self, dependencies: &DependencySet) -> usize {
        self.per_set
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(dependencies)
            .copied()
            .unwrap_or(0)
    }

    /// The wrapped resolver.
    pub fn inner(&self) -> &R {
        &self.inner
    }
}

impl<R: ScopeResolver> ScopeResolver for CountingResolver<R> {
    fn resolve(&self, dependencies: &DependencySet) -> Result<Scope> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self
            .per_set
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(dependencies.clone())
            .or_insert(0) += 1;

        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }
        self.inner.resolve(dependencies)
    }
}
