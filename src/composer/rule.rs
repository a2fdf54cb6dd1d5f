//! Rule records and their builder.
//!
//! A [`RuleRecord`] is the immutable, build-system-neutral description of one
//! generated rule. Composers assemble records through [`RuleBuilder`]; once
//! built, a record only exposes read accessors and is handed to a
//! [`RuleWriter`](crate::writer::RuleWriter) for serialization.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Type tag of a generated rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleType {
    /// Android resource bundle
    AndroidResource,
    /// Shared annotation processor invocation
    JavaAnnotationProcessor,
}

impl RuleType {
    /// Name of the rule function in the generated build file.
    pub const fn buck_name(self) -> &'static str {
        match self {
            Self::AndroidResource => "android_resource",
            Self::JavaAnnotationProcessor => "java_annotation_processor",
        }
    }
}

impl fmt::Display for RuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.buck_name())
    }
}

/// Who may depend on a generated rule.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub enum Visibility {
    /// Visible to every package (`PUBLIC`).
    #[default]
    Public,
    /// Visible only to the listed target patterns.
    Restricted(Vec<String>),
}

impl Visibility {
    /// Visibility patterns as written in the build file.
    pub fn patterns(&self) -> Vec<String> {
        match self {
            Self::Public => vec!["PUBLIC".to_string()],
            Self::Restricted(patterns) => patterns.clone(),
        }
    }
}

/// Value of a rule option attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum OptionValue {
    /// Boolean flag
    Bool(bool),
    /// Single string
    Text(String),
    /// List of strings
    List(Vec<String>),
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<String>> for OptionValue {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

/// An immutable generated rule description.
///
/// `deps` are deduplicated and sorted; options are kept in key order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleRecord {
    rule_type: RuleType,
    name: String,
    package: Option<String>,
    res: Vec<String>,
    assets: Vec<String>,
    deps: Vec<String>,
    visibility: Visibility,
    options: BTreeMap<String, OptionValue>,
}

impl RuleRecord {
    /// Start building a rule of `rule_type` named `name`.
    pub fn builder(rule_type: RuleType, name: impl Into<String>) -> RuleBuilder {
        RuleBuilder {
            rule_type,
            name: name.into(),
            package: None,
            res: Vec::new(),
            assets: Vec::new(),
            deps: BTreeSet::new(),
            visibility: Visibility::default(),
            options: BTreeMap::new(),
        }
    }

    pub fn rule_type(&self) -> RuleType {
        self.rule_type
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn package(&self) -> Option<&str> {
        self.package.as_deref()
    }

    pub fn res(&self) -> &[String] {
        &self.res
    }

    pub fn assets(&self) -> &[String] {
        &self.assets
    }

    /// Deduplicated, sorted dependency references.
    pub fn deps(&self) -> &[String] {
        &self.deps
    }

    pub fn visibility(&self) -> &Visibility {
        &self.visibility
    }

    /// Option attributes in key order.
    pub fn options(&self) -> &BTreeMap<String, OptionValue> {
        &self.options
    }

    /// Look up a single option.
    pub fn option(&self, key: &str) -> Option<&OptionValue> {
        self.options.get(key)
    }
}

/// Builder for [`RuleRecord`].
#[derive(Debug)]
pub struct RuleBuilder {
    rule_type: RuleType,
    name: String,
    package: Option<String>,
    res: Vec<String>,
    assets: Vec<String>,
    deps: BTreeSet<String>,
    visibility: Visibility,
    options: BTreeMap<String, OptionValue>,
}

impl RuleBuilder {
    pub fn package(mut self, package: Option<impl Into<String>>) -> Self {
        self.package = package.map(Into::into);
        self
    }

    pub fn res<I, S>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.res = dirs.into_iter().map(Into::into).collect();
        self
    }

    pub fn assets<I, S>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.assets = dirs.into_iter().map(Into::into).collect();
        self
    }

    /// Add dependency references; duplicates collapse.
    pub fn deps<I, S>(mut self, deps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.deps.extend(deps.into_iter().map(Into::into));
        self
    }

    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Set an option attribute, replacing any previous value for `key`.
    pub fn option(mut self, key: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    pub fn build(self) -> RuleRecord {
        RuleRecord {
            rule_type: self.rule_type,
            name: self.name,
            package: self.package,
            res: self.res,
            assets: self.assets,
            deps: self.deps.into_iter().collect(),
            visibility: self.visibility,
            options: self.options,
        }
    }
}
