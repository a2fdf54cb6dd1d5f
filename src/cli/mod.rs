//! Command-line interface for rulegen.
//!
//! # Commands
//!
//! - `generate` - Write every target build file and the shared processor file
//! - `scopes` - Show the grouped processor scopes of one target configuration
//! - `check` - List processor dependencies that contribute no processors
//!
//! # Global Options
//!
//! - `--verbose` / `-v` - Debug logging
//! - `--quiet` / `-q` - Errors only
//! - `--config` / `-c` - Generator configuration file
//! - `--manifest-path` - Project manifest (defaults to `./rulegen.toml`)
//!
//! `RUST_LOG` overrides the level chosen by `--verbose` and `--quiet`.
//!
//! # Examples
//!
//! ```bash
//! rulegen generate
//! rulegen --config rulegen-config.toml generate --root out/
//! rulegen scopes app --format json
//! rulegen check
//! ```

mod check;
mod generate;
mod scopes;

pub use check::CheckCommand;
pub use generate::GenerateCommand;
pub use scopes::{OutputFormat, ScopesCommand};

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::config::GeneratorConfig;
use crate::models::Project;

/// Default project manifest file name.
pub const MANIFEST_FILE: &str = "rulegen.toml";

/// Settings derived from the global flags.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Log filter directive; `None` falls back to `RUST_LOG` or `error`.
    pub log_level: Option<String>,

    /// Generator configuration file.
    pub config_path: Option<PathBuf>,

    /// Project manifest file.
    pub manifest_path: Option<PathBuf>,
}

impl CliConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the global tracing subscriber. Later calls are no-ops.
    pub fn init_logging(&self) {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            EnvFilter::new(self.log_level.as_deref().unwrap_or("error"))
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .without_time()
            .with_target(false)
            .try_init();
    }

    /// Manifest path from the flags, or `./rulegen.toml`.
    pub fn manifest_path(&self) -> PathBuf {
        self.manifest_path.clone().unwrap_or_else(|| PathBuf::from(MANIFEST_FILE))
    }

    /// Load the project manifest.
    pub fn load_project(&self) -> Result<Project> {
        Project::load(&self.manifest_path())
    }

    /// Load the generator configuration, defaulting when no file was given.
    pub async fn load_config(&self) -> Result<GeneratorConfig> {
        GeneratorConfig::load_with_optional(self.config_path.clone()).await
    }

    /// Directory holding the manifest; the default output root.
    pub fn project_root(&self) -> PathBuf {
        let manifest = self.manifest_path();
        match manifest.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }
}

/// Generate deduplicated Buck rules from a resolved project dependency graph.
#[derive(Parser)]
#[command(name = "rulegen", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to the generator configuration file
    #[arg(short, long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Path to the project manifest (rulegen.toml)
    #[arg(long, global = true, value_name = "PATH")]
    manifest_path: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write all rule files
    Generate(GenerateCommand),

    /// Show the processor scopes of one target configuration
    Scopes(ScopesCommand),

    /// Report processor dependencies that contribute no processors
    Check(CheckCommand),
}

impl Cli {
    /// Execute the parsed command with settings derived from the global flags.
    pub async fn execute(self) -> Result<()> {
        let config = self.build_config();
        self.execute_with_config(config).await
    }

    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            Some("debug".to_string())
        } else if self.quiet {
            Some("error".to_string())
        } else {
            Some("info".to_string())
        };

        CliConfig {
            log_level,
            config_path: self.config.clone(),
            manifest_path: self.manifest_path.clone(),
        }
    }

    pub async fn execute_with_config(self, config: CliConfig) -> Result<()> {
        config.init_logging();

        match self.command {
            Commands::Generate(cmd) => cmd.execute(&config).await,
            Commands::Scopes(cmd) => cmd.execute(&config).await,
            Commands::Check(cmd) => cmd.execute(&config).await,
        }
    }
}
