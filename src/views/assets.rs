//! Style and script aggregation.
//!
//! Every node in a view tree declares stylesheets and scripts. They are split
//! into categories by a file name convention and merged up the tree into
//! insertion-ordered, deduplicating sets:
//!
//! | Declared as                | Category |
//! |----------------------------|----------|
//! | style `*-inline.css`       | `inline` |
//! | any other style            | `async` (remote, loaded asynchronously) |
//! | script `*-sync.js`         | `sync`   |
//! | any other script           | `async`  |
//!
//! Front matter may also name the categories explicitly:
//!
//! ```yaml
//! styles:
//!   inline: [./critical.css]
//!   sync: [/styles/blocking.css]
//!   async: [/styles/lazy.css]
//! ```
//!
//! Inline entries are file system paths that get read into the page later, so
//! they are resolved when declared: relative paths against the directory of
//! the declaring file, root-relative paths (`/styles/x-inline.css`) against the
//! static directory. All other entries are URLs and are kept verbatim.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::utils::fs::normalize_path;

const INLINE_SUFFIX: &str = "-inline";
const SYNC_SUFFIX: &str = "-sync";

/// The three categories a style or script can land in.
///
/// Each category keeps the position of the first declaration of an entry;
/// later duplicates are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetGroup {
    /// Resolved file paths until the inline fetcher replaces them with contents.
    #[serde(default)]
    pub inline: IndexSet<String>,
    #[serde(default)]
    pub sync: IndexSet<String>,
    #[serde(default, rename = "async")]
    pub asynchronous: IndexSet<String>,
}

impl AssetGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge `other` into `self` category by category, keeping first-seen order.
    pub fn merge(&mut self, other: &AssetGroup) {
        self.inline.extend(other.inline.iter().cloned());
        self.sync.extend(other.sync.iter().cloned());
        self.asynchronous.extend(other.asynchronous.iter().cloned());
    }

    pub fn is_empty(&self) -> bool {
        self.inline.is_empty() && self.sync.is_empty() && self.asynchronous.is_empty()
    }
}

/// Whether declared paths are stylesheets or scripts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Style,
    Script,
}

/// Styles split by the classifier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleClasses {
    /// Resolved paths of `-inline` stylesheets
    pub inline: Vec<String>,
    /// Everything else, verbatim
    pub remote: Vec<String>,
}

/// Scripts split by the classifier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptClasses {
    pub sync: Vec<String>,
    pub asynchronous: Vec<String>,
}

/// Resolves inline asset paths for one declaring file.
#[derive(Debug, Clone)]
pub struct InlineResolver {
    base_dir: PathBuf,
    static_dir: Option<PathBuf>,
}

impl InlineResolver {
    /// `base_dir` is the directory of the declaring file.
    pub fn new(base_dir: impl Into<PathBuf>, static_dir: Option<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            static_dir,
        }
    }

    /// Resolver for the file at `declaring_file`.
    pub fn for_file(declaring_file: &Path, static_dir: Option<PathBuf>) -> Self {
        let base_dir = declaring_file.parent().map(Path::to_path_buf).unwrap_or_default();
        Self::new(base_dir, static_dir)
    }

    /// Resolve a declared inline path to the file that will be read.
    pub fn resolve(&self, declared: &str) -> String {
        let declared_path = Path::new(declared);
        let resolved = if declared_path.has_root() {
            match &self.static_dir {
                Some(static_dir) => static_dir.join(declared.trim_start_matches(['/', '\\'])),
                None => declared_path.to_path_buf(),
            }
        } else {
            self.base_dir.join(declared_path)
        };

        normalize_path(&resolved).to_string_lossy().into_owned()
    }
}

fn stem_ends_with(declared: &str, suffix: &str) -> bool {
    Path::new(declared)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .is_some_and(|stem| stem.ends_with(suffix))
}

/// Split declared stylesheets into inline and remote.
pub fn classify_styles(declared: &[String], resolver: &InlineResolver) -> StyleClasses {
    let mut classes = StyleClasses::default();
    for path in declared {
        if stem_ends_with(path, INLINE_SUFFIX) {
            classes.inline.push(resolver.resolve(path));
        } else {
            classes.remote.push(path.clone());
        }
    }
    classes
}

/// Split declared scripts into sync and async.
pub fn classify_scripts(declared: &[String]) -> ScriptClasses {
    let mut classes = ScriptClasses::default();
    for path in declared {
        if stem_ends_with(path, SYNC_SUFFIX) {
            classes.sync.push(path.clone());
        } else {
            classes.asynchronous.push(path.clone());
        }
    }
    classes
}

/// Styles or scripts as written in front matter.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum AssetDeclaration {
    /// A plain list, classified by file name suffix.
    List(Vec<String>),
    /// Explicit categories, taken verbatim.
    Categorized {
        #[serde(default)]
        inline: Vec<String>,
        #[serde(default)]
        sync: Vec<String>,
        #[serde(default, rename = "async")]
        asynchronous: Vec<String>,
    },
}

impl Default for AssetDeclaration {
    fn default() -> Self {
        AssetDeclaration::List(Vec::new())
    }
}

impl AssetDeclaration {
    /// Classify the declaration into an [`AssetGroup`].
    pub fn to_group(&self, kind: AssetKind, resolver: &InlineResolver) -> AssetGroup {
        let mut group = AssetGroup::new();
        match self {
            AssetDeclaration::List(paths) => match kind {
                AssetKind::Style => {
                    let classes = classify_styles(paths, resolver);
                    group.inline.extend(classes.inline);
                    group.asynchronous.extend(classes.remote);
                }
                AssetKind::Script => {
                    let classes = classify_scripts(paths);
                    group.sync.extend(classes.sync);
                    group.asynchronous.extend(classes.asynchronous);
                }
            },
            AssetDeclaration::Categorized {
                inline,
                sync,
                asynchronous,
            } => {
                group.inline.extend(inline.iter().map(|p| resolver.resolve(p)));
                group.sync.extend(sync.iter().cloned());
                group.asynchronous.extend(asynchronous.iter().cloned());
            }
        }
        group
    }

    pub fn is_empty(&self) -> bool {
        match self {
            AssetDeclaration::List(paths) => paths.is_empty(),
            AssetDeclaration::Categorized {
                inline,
                sync,
                asynchronous,
            } => inline.is_empty() && sync.is_empty() && asynchronous.is_empty(),
        }
    }
}
