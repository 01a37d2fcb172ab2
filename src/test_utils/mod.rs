//! Test utilities for Tessera
//!
//! Helpers shared by unit and integration tests: one-time logging setup and
//! a temporary project directory that templates can be written into.
//!
//! # Example
//!
//! ```rust,no_run
//! use tessera::test_utils::TestProject;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let project = TestProject::new()?;
//! project.write_template("views/home.tmpl", "<h1>{{data.title}}</h1>")?;
//! let html = project.engine().render_view("views/home.tmpl", serde_json::json!({"title": "Hi"})).await?;
//! assert_eq!(html, "<h1>Hi</h1>");
//! # Ok(())
//! # }
//! ```

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::Once;
use tempfile::TempDir;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::config::ProjectConfig;
use crate::views::ViewEngine;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Only the first call has an effect. Uses `level` if given, otherwise
/// `RUST_LOG`; with neither, logging stays off.
///
/// ```bash
/// RUST_LOG=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer() // Important: uses test-compatible writer
            .with_target(true)
            .with_thread_ids(false)
            .try_init();
    });
}

/// A temporary project directory with the default layout.
///
/// The directory is removed when the value is dropped.
pub struct TestProject {
    temp_dir: TempDir,
    config: ProjectConfig,
}

impl TestProject {
    /// Create an empty project with `templates/` and `static/` directories.
    pub fn new() -> Result<Self> {
        Self::with_config(ProjectConfig::default())
    }

    /// Create an empty project using `config` for the layout.
    pub fn with_config(config: ProjectConfig) -> Result<Self> {
        let temp_dir = TempDir::new().context("Failed to create temp dir")?;
        std::fs::create_dir_all(temp_dir.path().join(&config.templates_dir))?;
        std::fs::create_dir_all(temp_dir.path().join(&config.static_dir))?;
        Ok(Self {
            temp_dir,
            config,
        })
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn templates_dir(&self) -> PathBuf {
        self.config.templates_path(self.root())
    }

    pub fn static_dir(&self) -> PathBuf {
        self.config.static_path(self.root())
    }

    /// Write `content` to `name` under the templates directory.
    pub fn write_template(&self, name: &str, content: &str) -> Result<PathBuf> {
        write_file(&self.templates_dir().join(name), content)
    }

    /// Write `content` to `name` under the static directory.
    pub fn write_static(&self, name: &str, content: &str) -> Result<PathBuf> {
        write_file(&self.static_dir().join(name), content)
    }

    /// Write `content` to `name` relative to the project root.
    pub fn write_file(&self, name: &str, content: &str) -> Result<PathBuf> {
        write_file(&self.root().join(name), content)
    }

    /// Engine for this project.
    pub fn engine(&self) -> ViewEngine {
        ViewEngine::from_config(&self.config, self.root())
    }
}

fn write_file(path: &Path, content: &str) -> Result<PathBuf> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path.to_path_buf())
}
