//! Command-line interface for Tessera.
//!
//! The CLI renders templates from a project directory, mainly for previewing
//! pages and debugging view trees outside the web server.
//!
//! # Available Commands
//!
//! - `render` - Render a template (optionally with child views) to stdout
//! - `document` - Render a full document: document template, shell and views
//! - `tree` - Print the assembled view tree as JSON
//!
//! # Global Options
//!
//! - `--verbose` / `--quiet` - Log level (debug / error; default warn).
//!   `RUST_LOG` takes precedence when set.
//! - `--config` - Configuration file, also read from `TESSERA_CONFIG`
//! - `--root` - Project root (defaults to the current directory)
//!
//! # Examples
//!
//! ```bash
//! tessera render views/home.tmpl --data '{"title": "Home"}'
//! tessera --root ./site document shells/app.tmpl --view views/home.tmpl
//! tessera tree shells/app.tmpl --view views/home.tmpl
//! ```

pub mod common;
mod document;
mod render;
mod tree;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::config::CONFIG_ENV_VAR;
use common::CommandContext;

/// Runtime configuration for CLI execution.
///
/// Built from the parsed flags by [`Cli::build_config`]; tests can construct
/// one directly and pass it to [`Cli::execute_with_config`].
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Log level used when `RUST_LOG` is not set (`None` keeps logging off).
    pub log_level: Option<String>,

    /// Explicit configuration file.
    pub config_path: Option<PathBuf>,

    /// Project root directory.
    pub project_root: PathBuf,
}

impl CliConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the global tracing subscriber, writing to stderr.
    ///
    /// `RUST_LOG` wins over `log_level`. Calling this more than once is
    /// harmless; later calls are ignored.
    pub fn init_logging(&self) {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else if let Some(level) = &self.log_level {
            EnvFilter::new(level)
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }
}

/// Tessera - nested view templating
#[derive(Parser, Debug)]
#[command(
    name = "tessera",
    about = "Render nested template views into HTML documents",
    version,
    long_about = "Tessera assembles pages from a tree of templates, partials and child views, \
                  collecting their styles and scripts into one document."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Show debug logging
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to tessera.toml (defaults to <root>/tessera.toml)
    #[arg(short, long, global = true, env = CONFIG_ENV_VAR)]
    config: Option<PathBuf>,

    /// Project root directory
    #[arg(long, global = true, default_value = ".")]
    root: PathBuf,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render a template with optional child views
    Render(render::RenderCommand),

    /// Render a full document around a shell and its views
    Document(document::DocumentCommand),

    /// Print the resolved view tree as JSON
    Tree(tree::TreeCommand),
}

impl Cli {
    /// Execute the parsed command.
    pub async fn execute(self) -> Result<()> {
        let config = self.build_config();
        self.execute_with_config(config).await
    }

    /// Build a [`CliConfig`] from the parsed flags.
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "warn"
        };

        CliConfig {
            log_level: Some(log_level.to_string()),
            config_path: self.config.clone(),
            project_root: self.root.clone(),
        }
    }

    /// Execute with an explicit configuration.
    pub async fn execute_with_config(self, config: CliConfig) -> Result<()> {
        config.init_logging();

        let ctx = CommandContext::load(&config.project_root, config.config_path.clone()).await?;

        match self.command {
            Commands::Render(cmd) => cmd.execute(&ctx).await,
            Commands::Document(cmd) => cmd.execute(&ctx).await,
            Commands::Tree(cmd) => cmd.execute(&ctx).await,
        }
    }
}
