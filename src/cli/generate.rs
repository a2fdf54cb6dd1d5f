//! `rulegen generate`.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

use super::CliConfig;
use crate::generator::Generator;

/// Write every target build file and the shared processor file.
#[derive(Args, Debug)]
pub struct GenerateCommand {
    /// Output root (defaults to the directory holding the manifest)
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,
}

impl GenerateCommand {
    pub async fn execute(self, cli: &CliConfig) -> Result<()> {
        let project = cli.load_project()?;
        let config = cli.load_config().await?;
        let root = self.root.unwrap_or_else(|| cli.project_root());

        let summary = Generator::new(project, config, &root)?.run().await?;

        for report in &summary.targets {
            match &report.resource_rule {
                Some(rule) => println!("  {} {} ({rule})", "✓".green(), report.target),
                None => println!("  {} {}", "✓".green(), report.target),
            }
        }
        for finding in summary.empty_processors() {
            println!(
                "  {} {} '{}' has dependencies without processors",
                "⚠".yellow(),
                finding.target,
                finding.configuration
            );
        }

        println!(
            "{} {} targets, {} resource rules, {} processor rules, {} files written",
            "Generated".green().bold(),
            summary.targets.len(),
            summary.resource_rules,
            summary.processor_rules,
            summary.files_written.len()
        );
        Ok(())
    }
}
