//! `rulegen check`.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use super::CliConfig;
use crate::core::RulegenError;
use crate::generator::Generator;

/// Report processor dependencies that contribute no processors.
///
/// Exits with an error when any are found. No files are written.
#[derive(Args, Debug)]
pub struct CheckCommand {}

impl CheckCommand {
    pub async fn execute(self, cli: &CliConfig) -> Result<()> {
        let project = cli.load_project()?;
        let config = cli.load_config().await?;

        let findings = Generator::new(project, config, cli.project_root())?.check().await?;

        let Some(first) = findings.first() else {
            println!("{} every processor dependency contributes processors", "✓".green());
            return Ok(());
        };

        for finding in &findings {
            println!("{} {} '{}':", "⚠".yellow(), finding.target, finding.configuration);
            for dependency in &finding.dependencies {
                println!("    {dependency}");
            }
        }

        Err(RulegenError::EmptyProcessors {
            configuration: first.configuration.clone(),
            project: first.target.clone(),
        }
        .into())
    }
}
