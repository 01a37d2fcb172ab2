//! File system helpers for template and asset loading.
//!
//! All template reads go through [`read_template_file`] so that a missing file
//! is always reported as [`TesseraError::TemplateNotFound`], with suggestions
//! of similarly named files when the author made a typo.

use std::path::{Component, Path, PathBuf};
use strsim::levenshtein;

use crate::core::TesseraError;

/// Maximum allowed Levenshtein distance as a percentage of the file name length
/// for "did you mean" suggestions.
const SIMILARITY_THRESHOLD_PERCENT: usize = 50;

/// Maximum number of suggestions attached to a not-found error.
const MAX_SUGGESTIONS: usize = 3;

/// Normalizes a path by resolving `.` and `..` components lexically.
///
/// The file system is not consulted, so symlinks are not followed and the path
/// does not need to exist.
///
/// # Examples
///
/// ```rust
/// use tessera::utils::fs::normalize_path;
/// use std::path::{Path, PathBuf};
///
/// assert_eq!(
///     normalize_path(Path::new("/site/templates/views/../partials/./a.tmpl")),
///     PathBuf::from("/site/templates/partials/a.tmpl")
/// );
/// ```
#[must_use]
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut components = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match components.last() {
                Some(Component::Normal(_)) => {
                    components.pop();
                }
                // `..` above the root stays at the root
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => components.push(component),
            },
            c => components.push(c),
        }
    }

    components.iter().collect()
}

/// Read a template file as UTF-8 text.
///
/// # Errors
///
/// - [`TesseraError::TemplateNotFound`] if the file does not exist
/// - [`TesseraError::Io`] for any other read failure
pub async fn read_template_file(path: &Path) -> Result<String, TesseraError> {
    tracing::debug!("Reading template {}", path.display());
    tokio::fs::read_to_string(path)
        .await
        .map_err(|e| TesseraError::from_read_error(path.to_path_buf(), e))
}

/// Find file names in `path`'s directory that look like `path`'s file name.
///
/// Used to build "did you mean" suggestions. Returns an empty list if the
/// directory can't be read.
#[must_use]
pub fn similar_file_names(path: &Path) -> Vec<String> {
    let (Some(parent), Some(target)) = (path.parent(), path.file_name().and_then(|n| n.to_str()))
    else {
        return Vec::new();
    };

    let Ok(entries) = std::fs::read_dir(parent) else {
        return Vec::new();
    };

    let mut scored: Vec<(String, usize)> = entries
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_ok_and(|t| t.is_file()))
        .filter_map(|entry| entry.file_name().to_str().map(str::to_string))
        .map(|name| {
            let distance = levenshtein(target, &name);
            (name, distance)
        })
        .collect();

    // Sort by distance, then by name so suggestions are stable
    scored.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)));

    scored
        .into_iter()
        .filter(|(_, dist)| *dist <= target.len() * SIMILARITY_THRESHOLD_PERCENT / 100)
        .take(MAX_SUGGESTIONS)
        .map(|(name, _)| name)
        .collect()
}
