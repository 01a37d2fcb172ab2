//! Render-scoped diagnostics.
//!
//! A [`Diagnostics`] value is created per render call and passed explicitly
//! through the view factory. It deduplicates per-file warnings (a malformed
//! front matter block included by several views is reported once) and keeps
//! the warnings so callers can surface them, for example in a development
//! error overlay.
//!
//! # Example
//!
//! ```rust
//! use tessera::core::Diagnostics;
//! use std::path::Path;
//!
//! let diagnostics = Diagnostics::new();
//!
//! assert!(diagnostics.warn_file(Path::new("views/a.tmpl"), "bad front matter"));
//! assert!(!diagnostics.warn_file(Path::new("views/a.tmpl"), "bad front matter"));
//! assert_eq!(diagnostics.warnings().len(), 1);
//! ```

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Warning sink for a single render operation.
///
/// Uses [`Mutex`] for interior mutability because child views are assembled
/// concurrently and share the same diagnostics.
#[derive(Debug, Default)]
pub struct Diagnostics {
    warned_files: Mutex<HashSet<PathBuf>>,
    warnings: Mutex<Vec<String>>,
}

impl Diagnostics {
    /// Create an empty diagnostics sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a warning about `path` unless one was already recorded.
    ///
    /// Returns `true` if the warning was emitted, `false` if it was a duplicate.
    pub fn warn_file(&self, path: &Path, message: &str) -> bool {
        let first = self
            .warned_files
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .insert(path.to_path_buf());

        if first {
            tracing::warn!("{}: {}", path.display(), message);
            self.warnings
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner)
                .push(format!("{}: {}", path.display(), message));
        }

        first
    }

    /// All warnings recorded so far, in the order they were emitted.
    #[must_use]
    pub fn warnings(&self) -> Vec<String> {
        self.warnings.lock().unwrap_or_else(std::sync::PoisonError::into_inner).clone()
    }

    /// Number of distinct files warned about.
    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.warned_files.lock().unwrap_or_else(std::sync::PoisonError::into_inner).len()
    }
}
