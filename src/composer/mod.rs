//! Rule composers.
//!
//! Composers are pure functions from the project model (or from cached
//! processor scopes) to [`RuleRecord`]s. They never touch the filesystem;
//! persisting records is the job of the [`writer`](crate::writer) module.
//!
//! - [`ResourceRuleComposer`] builds one `android_resource` rule per Android target
//! - [`ProcessorRuleComposer`] builds one `java_annotation_processor` rule per scope
//!
//! The helpers in this module produce the rule references shared by both.

pub mod processor;
pub mod resource;
pub mod rule;

pub use processor::ProcessorRuleComposer;
pub use resource::ResourceRuleComposer;
pub use rule::{OptionValue, RuleBuilder, RuleRecord, RuleType, Visibility};

use crate::models::Target;

/// Prefix of resource rule names.
pub const RES_PREFIX: &str = "res_";

/// Reference to an externally resolved artifact.
///
/// The directory of the artifact becomes the package and the file name the
/// rule name: `a/b/c.aar` maps to `//a/b:c.aar`, `c.aar` to `//:c.aar`.
///
/// ```rust
/// use rulegen::composer::external;
///
/// assert_eq!(external(".rulegen/ext/material-1.9.0.aar"), "//.rulegen/ext:material-1.9.0.aar");
/// assert_eq!(external("lib.aar"), "//:lib.aar");
/// ```
pub fn external(dep: &str) -> String {
    let dep = dep.trim_start_matches("./");
    match dep.rsplit_once('/') {
        Some((dir, file)) => format!("//{dir}:{file}"),
        None => format!("//:{dep}"),
    }
}

/// Name of the resource rule of `target`.
pub fn res_rule_name(target: &Target) -> String {
    format!("{RES_PREFIX}{}", target.name)
}

/// Fully qualified reference to the resource rule of `target`.
///
/// A target at the project root (`"."` or `""`) lives in the root package.
pub fn res_rule_ref(target: &Target) -> String {
    let package = match target.path.as_str() {
        "." | "" => "",
        path => path,
    };
    format!("//{package}:{}", res_rule_name(target))
}
