//! `rulegen scopes`.

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use colored::Colorize;
use serde::Serialize;
use std::sync::Arc;

use super::CliConfig;
use crate::annotation::ProcessorScopeCache;
use crate::composer::ProcessorRuleComposer;
use crate::config::DEFAULT_PROCESSOR_CONFIGURATION;
use crate::core::RulegenError;
use crate::models::Scope;
use crate::resolver::GraphScopeResolver;

/// Output format for `rulegen scopes`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable listing
    Text,
    /// JSON array of scopes
    Json,
}

/// Show the grouped processor scopes of one target configuration.
#[derive(Args, Debug)]
pub struct ScopesCommand {
    /// Target path as declared in the manifest
    pub target: String,

    /// Configuration to inspect (defaults to the first configured processor configuration)
    #[arg(long, value_name = "NAME")]
    pub configuration: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Serialize)]
struct ScopeView<'a> {
    rule: String,
    #[serde(flatten)]
    scope: &'a Scope,
}

impl ScopesCommand {
    pub async fn execute(self, cli: &CliConfig) -> Result<()> {
        let project = cli.load_project()?;
        let config = cli.load_config().await?;

        let configuration = self.configuration.clone().unwrap_or_else(|| {
            config
                .processor_configurations
                .first()
                .cloned()
                .unwrap_or_else(|| DEFAULT_PROCESSOR_CONFIGURATION.to_string())
        });

        let target = project.target(&self.target).ok_or_else(|| RulegenError::TargetNotFound {
            path: self.target.clone(),
        })?;

        let resolver = GraphScopeResolver::new(&project)?;
        let cache = ProcessorScopeCache::with_matcher(Arc::new(resolver), config.marker());
        let scopes = cache.scopes_for_configuration(&project, target, &configuration)?;

        let views: Vec<ScopeView<'_>> = scopes
            .iter()
            .map(|scope| ScopeView {
                rule: ProcessorRuleComposer::rule_name(scope.dependencies()),
                scope: scope.as_ref(),
            })
            .collect();

        match self.format {
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(&views)
                    .context("Failed to serialize scopes")?;
                println!("{json}");
            }
            OutputFormat::Text => {
                println!(
                    "{} '{}' of {}",
                    "Scopes for".bold(),
                    configuration,
                    project.display_name(target)
                );
                for view in &views {
                    println!("\n  {}", view.rule.cyan());
                    println!("    dependencies: {}", view.scope.dependencies());
                    println!("    processors:   {}", view.scope.processors().join(", "));
                    if view.scope.has_extensions() {
                        println!("    extensions:   {}", view.scope.extensions().join(", "));
                    }
                    println!("    classpath:    {} entries", view.scope.classpath().len());
                }
            }
        }
        Ok(())
    }
}
