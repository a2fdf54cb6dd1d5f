//! Project model read from `rulegen.toml`.
//!
//! The project manifest stands in for the host build tool's project model. It
//! declares the targets to generate rules for, their resource metadata and
//! target-to-target edges, the named processor configurations, and the table of
//! already-resolved external artifacts that the
//! [`GraphScopeResolver`](crate::resolver::GraphScopeResolver) walks.
//!
//! # Format
//!
//! ```toml
//! [project]
//! name = "shop"
//!
//! [[targets]]
//! name = "app"
//! path = "app"
//! kind = "android_app"
//! package = "com.example.shop"
//! res_dirs = ["src/main/res"]
//! asset_dirs = ["src/main/assets"]
//! external_deps = [".rulegen/ext/com.google.android.material/material-1.9.0.aar"]
//! deps = ["libs/ui", "libs/annotations"]
//! provided = ["libs/annotations"]
//!
//! [targets.configurations]
//! annotationProcessor = ["com.google.auto.value:auto-value:1.10.4"]
//!
//! [[artifacts]]
//! coordinate = "com.google.auto.value:auto-value:1.10.4"
//! path = ".rulegen/ext/com.google.auto.value/auto-value-1.10.4.jar"
//! processors = ["com.google.auto.value.processor.AutoValueProcessor"]
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::path::Path;

use super::Dependency;
use crate::core::RulegenError;

/// The whole project: metadata, targets, and resolved artifacts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Project {
    /// Project-level metadata.
    #[serde(rename = "project", default)]
    pub info: ProjectInfo,

    /// Targets that rules are generated for.
    #[serde(default)]
    pub targets: Vec<Target>,

    /// Pre-resolved external artifacts keyed by coordinate.
    #[serde(default)]
    pub artifacts: Vec<Artifact>,
}

/// Project-level metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectInfo {
    /// Display name of the root project.
    pub name: String,
}

impl Default for ProjectInfo {
    fn default() -> Self {
        Self {
            name: "root".to_string(),
        }
    }
}

/// Kind of a target, which decides which rules it produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetKind {
    /// Android library module
    AndroidLibrary,
    /// Android application module
    AndroidApp,
    /// Plain Java library module
    JavaLibrary,
}

impl TargetKind {
    /// Whether targets of this kind produce an `android_resource` rule.
    pub const fn is_android(self) -> bool {
        matches!(self, Self::AndroidLibrary | Self::AndroidApp)
    }
}

/// A single buildable target and its resolved metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Target {
    /// Logical target name, used to derive rule names.
    pub name: String,

    /// Project-relative path; also the package path of rule references.
    pub path: String,

    /// Target kind.
    pub kind: TargetKind,

    /// Java/Android package of the target.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package: Option<String>,

    /// Resource directories relative to the target path.
    #[serde(default)]
    pub res_dirs: Vec<String>,

    /// Asset directories relative to the target path.
    #[serde(default)]
    pub asset_dirs: Vec<String>,

    /// Paths of externally resolved artifacts the target depends on.
    #[serde(default)]
    pub external_deps: Vec<String>,

    /// Paths of sibling targets this target depends on.
    #[serde(default)]
    pub deps: Vec<String>,

    /// Paths of sibling targets that are compile-only (provided) dependencies.
    #[serde(default)]
    pub provided: Vec<String>,

    /// Named dependency configurations, e.g. `annotationProcessor`.
    #[serde(default)]
    pub configurations: BTreeMap<String, Vec<Dependency>>,
}

/// A resolved external artifact as reported by the host resolution engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artifact {
    /// Coordinate of the artifact.
    pub coordinate: Dependency,

    /// Cached path of the artifact file.
    pub path: String,

    /// Annotation processor classes registered by the artifact.
    #[serde(default)]
    pub processors: Vec<String>,

    /// Marker-extension classes registered by the artifact.
    #[serde(default)]
    pub extensions: Vec<String>,

    /// Direct runtime dependencies of the artifact.
    #[serde(default)]
    pub dependencies: Vec<Dependency>,
}

impl Project {
    /// Load and parse a project manifest.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(RulegenError::ManifestNotFound.into());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read project manifest {}", path.display()))?;

        Self::parse(&content, &path.display().to_string())
    }

    /// Parse manifest content; `file` is used in error messages only.
    pub fn parse(content: &str, file: &str) -> Result<Self> {
        let project: Self =
            toml::from_str(content).map_err(|e| RulegenError::ManifestParseError {
                file: file.to_string(),
                reason: e.to_string(),
            })?;

        let mut paths = BTreeSet::new();
        for target in &project.targets {
            if !paths.insert(target.path.as_str()) {
                return Err(RulegenError::DuplicateTarget {
                    path: target.path.clone(),
                    file: file.to_string(),
                }
                .into());
            }
        }

        Ok(project)
    }

    /// Look up a target by path.
    pub fn target(&self, path: &str) -> Option<&Target> {
        self.targets.iter().find(|t| t.path == path)
    }

    /// All targets, sorted by path.
    pub fn sorted_targets(&self) -> Vec<&Target> {
        let mut targets: Vec<&Target> = self.targets.iter().collect();
        targets.sort_by(|a, b| a.path.cmp(&b.path));
        targets
    }

    /// Display name of a target, `project:path`.
    pub fn display_name(&self, target: &Target) -> String {
        format!("{}:{}", self.info.name, target.path)
    }

    /// Sibling targets reachable from `target` through runtime edges.
    ///
    /// Walks `deps` breadth-first from `target`. At every visited target the
    /// edges also listed in its `provided` are skipped, since compile-only
    /// dependencies do not propagate. The result excludes `target` itself and
    /// is sorted by path.
    pub fn target_deps(&self, target: &Target) -> Result<Vec<&Target>> {
        let mut visited: BTreeSet<&str> = BTreeSet::from([target.path.as_str()]);
        let mut reachable: BTreeMap<&str, &Target> = BTreeMap::new();
        let mut queue: VecDeque<&Target> = VecDeque::from([target]);

        while let Some(current) = queue.pop_front() {
            let provided: BTreeSet<&str> = current.provided.iter().map(String::as_str).collect();

            for path in current.deps.iter().map(String::as_str) {
                if provided.contains(path) || !visited.insert(path) {
                    continue;
                }

                let dep = self.target(path).ok_or_else(|| RulegenError::TargetNotFound {
                    path: path.to_string(),
                })?;
                reachable.insert(dep.path.as_str(), dep);
                queue.push_back(dep);
            }
        }

        Ok(reachable.into_values().collect())
    }

    /// Dependencies of a named configuration on a target.
    pub fn configuration<'a>(&self, target: &'a Target, name: &str) -> Result<&'a [Dependency]> {
        target.configurations.get(name).map(Vec::as_slice).ok_or_else(|| {
            RulegenError::ConfigurationNotFound {
                configuration: name.to_string(),
                project: self.display_name(target),
            }
            .into()
        })
    }
}
