//! `android_resource` rule composition.

use anyhow::Result;
use std::collections::BTreeSet;

use super::rule::{RuleRecord, RuleType, Visibility};
use super::{external, res_rule_name, res_rule_ref};
use crate::config::GeneratorConfig;
use crate::models::{Project, Target};

/// Option key controlling resource merging across dependencies.
pub const RESOURCE_UNION: &str = "resource_union";

/// Composes the resource rule of an Android target.
pub struct ResourceRuleComposer;

impl ResourceRuleComposer {
    /// Build the `android_resource` rule of `target`.
    ///
    /// Dependencies are the union of the target's external `.aar` artifacts,
    /// the resource rules of the Android sibling targets reachable through
    /// non-provided edges, and `extra_res_deps`; the result is deduplicated and
    /// sorted.
    ///
    /// Fails with [`RulegenError::TargetNotFound`](crate::core::RulegenError::TargetNotFound)
    /// if a sibling path is unknown to the project.
    pub fn compose(
        project: &Project,
        target: &Target,
        config: &GeneratorConfig,
        extra_res_deps: &[String],
    ) -> Result<RuleRecord> {
        let mut res_deps: BTreeSet<String> = target
            .external_deps
            .iter()
            .filter(|dep| dep.ends_with(".aar"))
            .map(|dep| external(dep))
            .collect();

        res_deps.extend(
            project
                .target_deps(target)?
                .into_iter()
                .filter(|dep| dep.kind.is_android())
                .map(res_rule_ref),
        );

        res_deps.extend(extra_res_deps.iter().cloned());

        Ok(RuleRecord::builder(RuleType::AndroidResource, res_rule_name(target))
            .package(target.package.as_deref())
            .res(&target.res_dirs)
            .assets(&target.asset_dirs)
            .option(RESOURCE_UNION, config.resource_union)
            .visibility(Visibility::Public)
            .deps(res_deps)
            .build())
    }

    /// [`compose`](Self::compose) without extra dependencies.
    pub fn compose_default(
        project: &Project,
        target: &Target,
        config: &GeneratorConfig,
    ) -> Result<RuleRecord> {
        Self::compose(project, target, config, &[])
    }
}
