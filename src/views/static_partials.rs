//! Legacy static partials.
//!
//! Older sites referenced static files directly as partials, e.g.
//! `{{> static/svg/logo.svg}}`. When enabled, every file under the static
//! directory matching `**/*.*` is loaded once per render and keyed by its
//! path relative to the project root, always with `/` separators.

use glob::Pattern;
use std::path::{Path, PathBuf};

use crate::core::TesseraError;
use crate::views::builder::PartialMap;

/// Load every static file as a partial.
///
/// Entries are sorted by path so the result doesn't depend on directory
/// iteration order. A missing static directory yields an empty map.
///
/// # Errors
///
/// [`TesseraError::StaticScan`] if the directory can't be walked or a file
/// can't be read.
pub async fn load_static_partials(
    project_root: &Path,
    static_dir: &Path,
) -> Result<PartialMap, TesseraError> {
    let pattern = format!("{}/**/*.*", Pattern::escape(&static_dir.to_string_lossy()));

    let mut files: Vec<PathBuf> = glob::glob(&pattern)
        .map_err(|e| TesseraError::StaticScan {
            message: format!("Invalid pattern '{pattern}': {e}"),
        })?
        .collect::<Result<_, _>>()
        .map_err(|e| TesseraError::StaticScan {
            message: e.to_string(),
        })?;
    files.sort();

    let mut partials = PartialMap::new();
    for file in files {
        if !tokio::fs::metadata(&file).await.is_ok_and(|m| m.is_file()) {
            continue;
        }

        let bytes = tokio::fs::read(&file).await.map_err(|e| TesseraError::StaticScan {
            message: format!("Failed to read {}: {e}", file.display()),
        })?;
        partials.insert(partial_key(project_root, &file), String::from_utf8_lossy(&bytes).into_owned());
    }

    tracing::debug!("Loaded {} static partials from {}", partials.len(), static_dir.display());
    Ok(partials)
}

fn partial_key(project_root: &Path, file: &Path) -> String {
    let relative = file.strip_prefix(project_root).unwrap_or(file);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
