//! One rule generation run.
//!
//! The [`Generator`] owns the per-run [`ProcessorScopeCache`] and drives the
//! whole pipeline:
//!
//! 1. every target is processed on a blocking worker thread, in sorted path
//!    order, with all workers sharing the cache
//! 2. each worker computes the target's processor scopes, checks for
//!    processor dependencies that contribute nothing, composes the resource
//!    rule of Android targets, and writes the target's build file
//! 3. once every worker has finished, the cache is finalized into the shared
//!    processor build file
//!
//! Processor resolution is synchronous, so workers run under
//! [`tokio::task::spawn_blocking`] and are joined with
//! [`futures::future::try_join_all`]. The first failing target aborts the run.

use anyhow::{Context, Result};
use futures::future::try_join_all;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::annotation::ProcessorScopeCache;
use crate::composer::{ProcessorRuleComposer, ResourceRuleComposer};
use crate::config::GeneratorConfig;
use crate::core::RulegenError;
use crate::models::{Dependency, Project, Target};
use crate::resolver::{GraphScopeResolver, ScopeResolver};
use crate::writer::{BuckFileWriter, RuleWriter};

/// Outcome of one target.
#[derive(Debug, Clone, Serialize)]
pub struct TargetReport {
    /// Display name, `project:path`.
    pub target: String,
    /// Name of the generated resource rule, for Android targets.
    pub resource_rule: Option<String>,
    /// Processor rules the target's configurations use.
    pub processor_rules: Vec<String>,
    /// Processor dependencies that contribute no processors.
    pub empty_processors: Vec<EmptyProcessors>,
    /// Build file written for the target, if any.
    pub file: Option<PathBuf>,
}

/// Processor dependencies of one configuration that contribute no processors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmptyProcessors {
    pub target: String,
    pub configuration: String,
    pub dependencies: Vec<Dependency>,
}

/// Result of [`Generator::run`].
#[derive(Debug, Clone, Serialize)]
pub struct GenerateSummary {
    /// Per-target outcomes in sorted path order.
    pub targets: Vec<TargetReport>,
    /// Number of `android_resource` rules written.
    pub resource_rules: usize,
    /// Number of shared processor rules written.
    pub processor_rules: usize,
    /// Every file written, in write order.
    pub files_written: Vec<PathBuf>,
}

impl GenerateSummary {
    /// Every empty-processor finding across all targets.
    pub fn empty_processors(&self) -> Vec<&EmptyProcessors> {
        self.targets.iter().flat_map(|t| &t.empty_processors).collect()
    }
}

/// Drives one generation run.
#[derive(Clone)]
pub struct Generator {
    project: Arc<Project>,
    config: Arc<GeneratorConfig>,
    root: PathBuf,
    cache: Arc<ProcessorScopeCache>,
    writer: Arc<dyn RuleWriter>,
}

impl Generator {
    /// Create a generator resolving against the project's artifact table.
    ///
    /// Output files are written below `root`.
    pub fn new(
        project: Project,
        config: GeneratorConfig,
        root: impl Into<PathBuf>,
    ) -> Result<Self> {
        let resolver =
            GraphScopeResolver::new(&project).context("Failed to index resolved artifacts")?;
        Ok(Self::with_resolver(project, config, root, Arc::new(resolver)))
    }

    /// Create a generator with an injected resolver.
    pub fn with_resolver(
        project: Project,
        config: GeneratorConfig,
        root: impl Into<PathBuf>,
        resolver: Arc<dyn ScopeResolver>,
    ) -> Self {
        let cache = ProcessorScopeCache::with_matcher(resolver, config.marker());
        Self {
            project: Arc::new(project),
            config: Arc::new(config),
            root: root.into(),
            cache: Arc::new(cache),
            writer: Arc::new(BuckFileWriter::new()),
        }
    }

    /// Replace the build file writer.
    pub fn with_writer(mut self, writer: Arc<dyn RuleWriter>) -> Self {
        self.writer = writer;
        self
    }

    /// The per-run processor scope cache.
    pub fn cache(&self) -> &ProcessorScopeCache {
        &self.cache
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    /// Generate every build file.
    pub async fn run(self) -> Result<GenerateSummary> {
        let paths = self.target_paths();
        info!("Generating rules for {} targets", paths.len());

        let tasks = paths.into_iter().map(|path| {
            let generator = self.clone();
            tokio::task::spawn_blocking(move || generator.process_target(&path))
        });

        let targets = try_join_all(tasks)
            .await
            .context("Target worker panicked")?
            .into_iter()
            .collect::<Result<Vec<_>>>()?;

        let processor_file = self.root.join(&self.config.processor_rule_file);
        let processor_rules = {
            let generator = self.clone();
            let path = processor_file.clone();
            tokio::task::spawn_blocking(move || {
                generator.cache.finalize_processors(generator.writer.as_ref(), &path)
            })
            .await
            .context("Processor finalization panicked")??
        };

        let mut files_written: Vec<PathBuf> =
            targets.iter().filter_map(|t| t.file.clone()).collect();
        files_written.push(processor_file);

        let summary = GenerateSummary {
            resource_rules: targets.iter().filter(|t| t.resource_rule.is_some()).count(),
            processor_rules,
            files_written,
            targets,
        };

        info!(
            "Generated {} resource rules and {} processor rules",
            summary.resource_rules, summary.processor_rules
        );
        Ok(summary)
    }

    /// Report processor dependencies that contribute no processors, without writing files.
    pub async fn check(self) -> Result<Vec<EmptyProcessors>> {
        let tasks = self.target_paths().into_iter().map(|path| {
            let generator = self.clone();
            tokio::task::spawn_blocking(move || -> Result<Vec<EmptyProcessors>> {
                let target = generator.target(&path)?;
                generator
                    .processor_configurations(target)
                    .map(|configuration| generator.find_empty_processors(target, configuration))
                    .collect::<Result<Vec<_>>>()
                    .map(|found| found.into_iter().flatten().collect())
            })
        });

        let findings = try_join_all(tasks)
            .await
            .context("Target worker panicked")?
            .into_iter()
            .collect::<Result<Vec<_>>>()?;

        Ok(findings.into_iter().flatten().collect())
    }

    fn target_paths(&self) -> Vec<String> {
        self.project.sorted_targets().into_iter().map(|t| t.path.clone()).collect()
    }

    fn target(&self, path: &str) -> Result<&Target> {
        self.project.target(path).ok_or_else(|| {
            RulegenError::TargetNotFound {
                path: path.to_string(),
            }
            .into()
        })
    }

    /// Configured processor configurations present on `target`.
    fn processor_configurations<'a>(&'a self, target: &'a Target) -> impl Iterator<Item = &'a str> {
        self.config
            .processor_configurations
            .iter()
            .map(String::as_str)
            .filter(|name| target.configurations.contains_key(*name))
    }

    fn process_target(&self, path: &str) -> Result<TargetReport> {
        let target = self.target(path)?;
        let display_name = self.project.display_name(target);
        debug!("Processing {display_name}");

        let mut processor_rules = Vec::new();
        let mut empty_processors = Vec::new();

        for configuration in self.processor_configurations(target) {
            let scopes = self.cache.scopes_for_configuration(&self.project, target, configuration)?;
            processor_rules.extend(
                scopes.iter().map(|scope| ProcessorRuleComposer::rule_name(scope.dependencies())),
            );

            if let Some(found) = self.find_empty_processors(target, configuration)? {
                if self.config.fail_on_empty_processors {
                    return Err(RulegenError::EmptyProcessors {
                        configuration: configuration.to_string(),
                        project: display_name,
                    }
                    .into());
                }
                let coordinates: Vec<String> =
                    found.dependencies.iter().map(Dependency::coordinate).collect();
                warn!(
                    "{}: '{}' has dependencies without annotation processors: {}",
                    display_name,
                    configuration,
                    coordinates.join(", ")
                );
                empty_processors.push(found);
            }
        }

        let (resource_rule, file) = if target.kind.is_android() {
            let rule = ResourceRuleComposer::compose_default(&self.project, target, &self.config)
                .with_context(|| format!("Failed to compose resource rule for {display_name}"))?;
            let file = self.rule_file(target);
            self.writer.write(std::slice::from_ref(&rule), &file)?;
            (Some(rule.name().to_string()), Some(file))
        } else {
            (None, None)
        };

        Ok(TargetReport {
            target: display_name,
            resource_rule,
            processor_rules,
            empty_processors,
            file,
        })
    }

    fn find_empty_processors(
        &self,
        target: &Target,
        configuration: &str,
    ) -> Result<Option<EmptyProcessors>> {
        let dependencies = self.project.configuration(target, configuration)?;
        if !self.cache.has_empty_processors(dependencies.iter().cloned())? {
            return Ok(None);
        }

        Ok(Some(EmptyProcessors {
            target: self.project.display_name(target),
            configuration: configuration.to_string(),
            dependencies: self.cache.empty_processors(dependencies.iter().cloned())?,
        }))
    }

    fn rule_file(&self, target: &Target) -> PathBuf {
        target_dir(&self.root, target).join(&self.config.rule_file_name)
    }
}

fn target_dir(root: &Path, target: &Target) -> PathBuf {
    if target.path.is_empty() || target.path == "." {
        root.to_path_buf()
    } else {
        root.join(&target.path)
    }
}
