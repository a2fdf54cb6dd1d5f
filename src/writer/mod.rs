//! Build file serialization.
//!
//! A [`RuleWriter`] turns composed [`RuleRecord`]s into a build-definition
//! file. [`BuckFileWriter`] is the shipped implementation; it renders records
//! as Starlark-style function calls through a `tera` template and persists the
//! result with [`atomic_write`](crate::utils::fs::atomic_write).
//!
//! # Output format
//!
//! ```text
//! # @generated by rulegen. Do not edit by hand.
//!
//! android_resource(
//!     name = "res_app",
//!     package = "com.example.shop",
//!     res = [
//!         "src/main/res",
//!     ],
//!     resource_union = False,
//!     deps = [
//!         "//libs/ui:res_ui",
//!     ],
//!     visibility = [
//!         "PUBLIC",
//!     ],
//! )
//! ```
//!
//! Attributes are emitted in a fixed order: `name`, `package`, `res`,
//! `assets`, the options in key order, `deps`, `visibility`. Empty lists and
//! a missing package are omitted. Option lists are always emitted.

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;
use tera::Tera;
use tracing::debug;

use crate::composer::{OptionValue, RuleRecord};
use crate::utils::fs::safe_write;

/// First line of every generated file.
pub const GENERATED_HEADER: &str = "# @generated by rulegen. Do not edit by hand.";

const BUILD_FILE_TEMPLATE: &str = "{{ header }}\n{% for rule in rules %}\n{{ rule.function }}(\n{% for attr in rule.attributes %}    {{ attr.key }} = {{ attr.value }},\n{% endfor %})\n{% endfor %}";

const INDENT: &str = "    ";

/// Persists rule records as a build-definition file.
pub trait RuleWriter: Send + Sync {
    /// Write `rules` to `path`, replacing any previous content.
    fn write(&self, rules: &[RuleRecord], path: &Path) -> Result<()>;
}

/// Writes Buck `BUCK` files.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuckFileWriter;

impl BuckFileWriter {
    pub fn new() -> Self {
        Self
    }

    /// Render `rules` to build file text without touching the filesystem.
    pub fn render(&self, rules: &[RuleRecord]) -> Result<String> {
        let rendered: Vec<RenderedRule> = rules.iter().map(RenderedRule::from_record).collect();

        let mut context = tera::Context::new();
        context.insert("header", GENERATED_HEADER);
        context.insert("rules", &rendered);

        let mut tera = Tera::default();
        tera.autoescape_on(vec![]);
        tera.render_str(BUILD_FILE_TEMPLATE, &context)
            .context("Failed to render build file template")
    }
}

impl RuleWriter for BuckFileWriter {
    fn write(&self, rules: &[RuleRecord], path: &Path) -> Result<()> {
        let content = self.render(rules)?;
        safe_write(path, &content)?;
        debug!("Wrote {} rules to {}", rules.len(), path.display());
        Ok(())
    }
}

/// Template view of one rule: function name plus pre-formatted attributes.
#[derive(Debug, Serialize)]
struct RenderedRule {
    function: &'static str,
    attributes: Vec<Attribute>,
}

#[derive(Debug, Serialize)]
struct Attribute {
    key: String,
    value: String,
}

impl RenderedRule {
    fn from_record(rule: &RuleRecord) -> Self {
        let mut attributes = vec![Attribute::new("name", quote(rule.name()))];

        if let Some(package) = rule.package() {
            attributes.push(Attribute::new("package", quote(package)));
        }
        if !rule.res().is_empty() {
            attributes.push(Attribute::new("res", list(rule.res())));
        }
        if !rule.assets().is_empty() {
            attributes.push(Attribute::new("assets", list(rule.assets())));
        }
        for (key, value) in rule.options() {
            attributes.push(Attribute::new(key, option(value)));
        }
        if !rule.deps().is_empty() {
            attributes.push(Attribute::new("deps", list(rule.deps())));
        }
        attributes.push(Attribute::new("visibility", list(&rule.visibility().patterns())));

        Self {
            function: rule.rule_type().buck_name(),
            attributes,
        }
    }
}

impl Attribute {
    fn new(key: impl Into<String>, value: String) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}

fn list(values: &[String]) -> String {
    if values.is_empty() {
        return "[]".to_string();
    }
    let mut out = String::from("[\n");
    for value in values {
        out.push_str(INDENT);
        out.push_str(INDENT);
        out.push_str(&quote(value));
        out.push_str(",\n");
    }
    out.push_str(INDENT);
    out.push(']');
    out
}

fn option(value: &OptionValue) -> String {
    match value {
        OptionValue::Bool(true) => "True".to_string(),
        OptionValue::Bool(false) => "False".to_string(),
        OptionValue::Text(text) => quote(text),
        OptionValue::List(values) => list(values),
    }
}
