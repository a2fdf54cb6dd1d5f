//! `java_annotation_processor` rule composition.
//!
//! Every cached processor scope becomes exactly one shared rule. Targets that
//! use the same processor set reference the same rule, so the processor
//! classpath is declared once per run instead of once per target.
//!
//! Rule names are derived from the scope's dependency set alone:
//!
//! ```text
//! processor_<first member name>_<first 12 hex chars of sha256(sorted coordinates)>
//! ```
//!
//! The digest covers the canonical coordinate list, so names are stable across
//! runs and independent of the order in which dependencies were declared.

use sha2::{Digest, Sha256};
use std::sync::Arc;

use super::external;
use super::rule::{RuleRecord, RuleType, Visibility};
use crate::models::{DependencySet, Scope};

/// Prefix of processor rule names.
pub const PROCESSOR_PREFIX: &str = "processor_";

/// Option key listing the processor classes to run.
pub const PROCESSOR_CLASSES: &str = "processor_classes";

/// Option key requesting an isolated class loader for the processor run.
pub const ISOLATE_CLASS_LOADER: &str = "isolate_class_loader";

const DIGEST_LEN: usize = 12;

/// Composes processor rules from cached scopes.
pub struct ProcessorRuleComposer;

impl ProcessorRuleComposer {
    /// Build one rule per scope, sorted by rule name.
    pub fn compose(scopes: &[Arc<Scope>]) -> Vec<RuleRecord> {
        let mut rules: Vec<RuleRecord> =
            scopes.iter().map(|scope| Self::compose_one(scope)).collect();
        rules.sort_by(|a, b| a.name().cmp(b.name()));
        rules
    }

    /// Build the rule of a single scope.
    pub fn compose_one(scope: &Scope) -> RuleRecord {
        let name = Self::rule_name(scope.dependencies());
        RuleRecord::builder(RuleType::JavaAnnotationProcessor, name)
            .option(PROCESSOR_CLASSES, scope.processors().to_vec())
            .option(ISOLATE_CLASS_LOADER, scope.has_extensions())
            .deps(scope.classpath().iter().map(|path| external(path)))
            .visibility(Visibility::Public)
            .build()
    }

    /// Stable rule name of the processor rule for `dependencies`.
    ///
    /// ```rust
    /// use rulegen::composer::ProcessorRuleComposer;
    /// use rulegen::models::{Dependency, DependencySet};
    ///
    /// let dep = Dependency::new("com.google.dagger", "dagger-compiler", "2.51");
    /// let set = DependencySet::single(dep);
    /// let name = ProcessorRuleComposer::rule_name(&set);
    /// assert!(name.starts_with("processor_dagger_compiler_"));
    /// assert_eq!(name.len(), "processor_dagger_compiler_".len() + 12);
    /// ```
    pub fn rule_name(dependencies: &DependencySet) -> String {
        let mut hasher = Sha256::new();
        for coordinate in dependencies.coordinates() {
            hasher.update(coordinate.as_bytes());
            hasher.update(b"\n");
        }
        let digest = hex::encode(hasher.finalize());

        format!(
            "{PROCESSOR_PREFIX}{}_{}",
            sanitize(dependencies.first().name()),
            &digest[..DIGEST_LEN]
        )
    }
}

/// Replace characters that are not valid in rule names.
fn sanitize(name: &str) -> String {
    name.chars().map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' }).collect()
}
