//! Project configuration (`tessera.toml`).
//!
//! A project is a directory laid out like this:
//!
//! ```text
//! my-site/
//! ├── tessera.toml          (optional)
//! ├── templates/
//! │   ├── documents/html.tmpl
//! │   └── ...
//! └── static/
//! ```
//!
//! Every key in `tessera.toml` is optional:
//!
//! ```toml
//! templates_dir = "templates"        # relative to the project root
//! static_dir = "static"              # relative to the project root
//! document = "documents/html.tmpl"   # relative to templates_dir
//! static_partials = false            # expose static files as partials
//! max_inline_asset_size = 1048576    # bytes
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::core::TesseraError;

/// File name looked up in the project root.
pub const CONFIG_FILE_NAME: &str = "tessera.toml";

/// Environment variable that overrides the configuration file location.
pub const CONFIG_ENV_VAR: &str = "TESSERA_CONFIG";

/// Default maximum size of a single inline asset.
///
/// Default: 1 MB (1,048,576 bytes)
const fn default_max_inline_asset_size() -> u64 {
    1024 * 1024 // 1 MB
}

fn default_templates_dir() -> PathBuf {
    PathBuf::from("templates")
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("static")
}

fn default_document() -> String {
    "documents/html.tmpl".to_string()
}

/// Settings read from `tessera.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    /// Directory holding all templates, relative to the project root.
    #[serde(default = "default_templates_dir")]
    pub templates_dir: PathBuf,

    /// Directory holding static files, relative to the project root.
    ///
    /// Root-relative inline assets (`/styles/a-inline.css`) are read from here.
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,

    /// Document template wrapping every shell, relative to `templates_dir`.
    #[serde(default = "default_document")]
    pub document: String,

    /// Expose every file under `static_dir` as a partial.
    #[serde(default)]
    pub static_partials: bool,

    /// Largest inline asset, in bytes, that will be embedded.
    #[serde(default = "default_max_inline_asset_size")]
    pub max_inline_asset_size: u64,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            templates_dir: default_templates_dir(),
            static_dir: default_static_dir(),
            document: default_document(),
            static_partials: false,
            max_inline_asset_size: default_max_inline_asset_size(),
        }
    }
}

impl ProjectConfig {
    /// Load the configuration for the project at `project_root`.
    ///
    /// `path` overrides the default location (`<root>/tessera.toml`). A
    /// missing file at the default location yields the defaults; an explicit
    /// `path` must exist.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit `path` is missing, or if the file
    /// cannot be read, is not valid TOML, or holds invalid values.
    pub async fn load(project_root: &Path, path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load_from(&path).await;
        }

        let path = project_root.join(CONFIG_FILE_NAME);
        if path.exists() {
            Self::load_from(&path).await
        } else {
            tracing::debug!("No configuration at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Load the configuration from a specific file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid TOML, or
    /// holds invalid values.
    pub async fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read configuration from {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse configuration from {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check values that parse but can't work.
    ///
    /// # Errors
    ///
    /// [`TesseraError::ConfigError`] describing the first invalid value.
    pub fn validate(&self) -> Result<(), TesseraError> {
        if self.document.trim().is_empty() {
            return Err(TesseraError::ConfigError {
                message: "document must name a template".to_string(),
            });
        }
        if self.max_inline_asset_size == 0 {
            return Err(TesseraError::ConfigError {
                message: "max_inline_asset_size must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    /// Absolute templates directory for `project_root`.
    pub fn templates_path(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.templates_dir)
    }

    /// Absolute static directory for `project_root`.
    pub fn static_path(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.static_dir)
    }
}
