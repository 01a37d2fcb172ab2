//! Front matter extraction for template files.
//!
//! A template may start with a `---` delimited YAML block declaring the assets
//! and sub-templates it needs:
//!
//! ```yaml
//! ---
//! styles:
//!   - /styles/main.css
//!   - ./header-inline.css
//! scripts:
//!   - /scripts/polyfill-sync.js
//! partials:
//!   - ../partials/nav.tmpl
//! views:
//!   - templatePath: ./sidebar.tmpl
//!     data: { collapsed: true }
//! ---
//! <header>{{> ../partials/nav.tmpl}}</header>
//! ```
//!
//! The block is split off with gray_matter using an engine that keeps the raw
//! text, so a YAML syntax error can be reported as a warning instead of
//! failing the render. Well-formed YAML with values of the wrong shape is a
//! configuration mistake and is returned as an error.
//!
//! # Example
//!
//! ```rust
//! use tessera::core::Diagnostics;
//! use tessera::views::frontmatter::FrontmatterParser;
//! use std::path::Path;
//!
//! let parser = FrontmatterParser::new();
//! let diagnostics = Diagnostics::new();
//! let parsed = parser
//!     .parse("---\npartials:\n  - nav.tmpl\n---\n\n{{> nav.tmpl}}\n", Path::new("a.tmpl"), &diagnostics)
//!     .unwrap();
//!
//! assert_eq!(parsed.body, "{{> nav.tmpl}}");
//! assert_eq!(parsed.front_matter.partials, vec!["nav.tmpl".to_string()]);
//! ```

use gray_matter::{Matter, Pod, engine::Engine};
use serde::Deserialize;
use std::fmt::Debug;
use std::path::Path;

use crate::core::{Diagnostics, TesseraError};
use crate::views::assets::AssetDeclaration;
use crate::views::spec::ViewSpec;

/// gray_matter engine that hands back the front matter text unparsed.
///
/// YAML parsing happens afterwards so syntax errors can be told apart from
/// shape errors.
struct RawFrontmatter;

impl Engine for RawFrontmatter {
    fn parse(content: &str) -> Result<Pod, gray_matter::Error> {
        Ok(Pod::String(content.to_string()))
    }
}

/// Metadata declared at the top of a template.
///
/// Unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    pub styles: AssetDeclaration,
    pub scripts: AssetDeclaration,
    /// Partial references in declaration order, relative to the declaring file.
    pub partials: Vec<String>,
    /// Child views, relative to the declaring file.
    pub views: Vec<ViewSpec>,
}

/// A template split into its metadata and body.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedTemplate {
    pub front_matter: FrontMatter,
    /// Body with the front matter removed, trimmed.
    pub body: String,
    /// Whether a front matter block was found and used.
    pub has_front_matter: bool,
}

/// Splits template files into [`FrontMatter`] and body.
pub struct FrontmatterParser {
    raw_matter: Matter<RawFrontmatter>,
}

impl Clone for FrontmatterParser {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl Debug for FrontmatterParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrontmatterParser").finish()
    }
}

impl Default for FrontmatterParser {
    fn default() -> Self {
        Self::new()
    }
}

impl FrontmatterParser {
    pub fn new() -> Self {
        Self {
            raw_matter: Matter::new(),
        }
    }

    /// Parse `content`, read from `file_path`.
    ///
    /// A front matter block that is not valid YAML is reported once per file
    /// through `diagnostics` and the whole text is used as the body.
    ///
    /// # Errors
    ///
    /// Returns [`TesseraError::InvalidFrontMatter`] if the YAML is valid but
    /// a known key has the wrong shape, for example `partials: 5`.
    pub fn parse(
        &self,
        content: &str,
        file_path: &Path,
        diagnostics: &Diagnostics,
    ) -> Result<ParsedTemplate, TesseraError> {
        let Some((raw, body)) = self.split(content) else {
            return Ok(ParsedTemplate {
                front_matter: FrontMatter::default(),
                body: content.trim().to_string(),
                has_front_matter: false,
            });
        };

        let value = match serde_yaml::from_str::<serde_yaml::Value>(&raw) {
            Ok(value) => value,
            Err(e) => {
                diagnostics.warn_file(
                    file_path,
                    &format!(
                        "Unable to parse YAML front matter, treating the whole file as template body.\nParse error: {e}"
                    ),
                );
                return Ok(ParsedTemplate {
                    front_matter: FrontMatter::default(),
                    body: content.trim().to_string(),
                    has_front_matter: false,
                });
            }
        };

        let front_matter = if value.is_null() {
            FrontMatter::default()
        } else {
            serde_yaml::from_value::<FrontMatter>(value).map_err(|e| {
                TesseraError::InvalidFrontMatter {
                    path: file_path.to_path_buf(),
                    reason: e.to_string(),
                }
            })?
        };

        Ok(ParsedTemplate {
            front_matter,
            body: body.trim().to_string(),
            has_front_matter: true,
        })
    }

    /// Check if content starts with a front matter block.
    pub fn has_frontmatter(&self, content: &str) -> bool {
        self.split(content).is_some()
    }

    /// Raw front matter text and remaining body, if a block is present.
    fn split(&self, content: &str) -> Option<(String, String)> {
        let result = self.raw_matter.parse::<String>(content).ok()?;
        let raw = result.data?;
        Some((raw, result.content))
    }
}
