//! Common helpers for CLI commands

use anyhow::{Context, Result};
use serde_json::Value;
use std::path::{Path, PathBuf};

use crate::config::ProjectConfig;
use crate::views::{ViewEngine, ViewSpec};

/// Common context for commands that render from a project directory
#[derive(Debug)]
pub struct CommandContext {
    /// Engine configured from the project's `tessera.toml` (or defaults)
    pub engine: ViewEngine,
}

impl CommandContext {
    /// Load the project at `project_root`, reading its configuration from
    /// `config_path` when given.
    pub async fn load(project_root: &Path, config_path: Option<PathBuf>) -> Result<Self> {
        if !project_root.is_dir() {
            anyhow::bail!("Project root {} is not a directory", project_root.display());
        }

        let config = ProjectConfig::load(project_root, config_path).await?;
        let engine = ViewEngine::from_config(&config, project_root);
        tracing::debug!("Templates directory: {}", engine.config().templates_dir.display());

        Ok(Self {
            engine,
        })
    }
}

/// Parse `--view` arguments.
///
/// A value starting with `{` is a JSON view description
/// (`{"templatePath": ..., "data": ..., "views": [...]}`); anything else is a
/// template path.
pub fn parse_views(values: &[String]) -> Result<Vec<ViewSpec>> {
    values
        .iter()
        .map(|value| {
            if value.trim_start().starts_with('{') {
                serde_json::from_str(value)
                    .with_context(|| format!("Invalid --view JSON: {value}"))
            } else {
                Ok(ViewSpec::new(value.clone()))
            }
        })
        .collect()
}

/// Parse the `--data` argument, defaulting to `null`.
pub fn parse_data(value: Option<&str>) -> Result<Value> {
    match value {
        Some(json) => serde_json::from_str(json).context("Invalid --data JSON"),
        None => Ok(Value::Null),
    }
}
