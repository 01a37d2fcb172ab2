//! Per-file view nodes and their merge rules.
//!
//! A [`ViewBuilder`] holds one template file while the factory pulls in its
//! partials and child views. Partials are flattened into the builder's
//! [`PartialMap`]; child views stay separate nodes. Both contribute their
//! styles and scripts. Once everything is attached, [`ViewBuilder::collapse`]
//! produces the immutable [`ResolvedView`] the renderer consumes.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::core::TesseraError;
use crate::views::assets::{AssetDeclaration, AssetGroup, AssetKind, InlineResolver};

/// Partial key to partial body, in the order partials were pulled in.
///
/// Keys are the exact strings used in `{{> key}}` tags.
pub type PartialMap = IndexMap<String, String>;

/// A fully assembled view tree node.
///
/// `content` is `None` for a node without a template; such a node renders as
/// the concatenation of its children. `Some("")` is a template whose body is
/// empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedView {
    /// Template file this node was read from, used in error messages.
    #[serde(skip)]
    pub source: Option<PathBuf>,
    pub content: Option<String>,
    #[serde(default)]
    pub partial_contents: PartialMap,
    #[serde(default)]
    pub styles: AssetGroup,
    #[serde(default)]
    pub scripts: AssetGroup,
    #[serde(default)]
    pub data: Value,
    #[serde(default)]
    pub views: Vec<ResolvedView>,
}

/// Mutable node used while a template and its dependencies are loaded.
#[derive(Debug, Clone, Default)]
pub struct ViewBuilder {
    source: Option<PathBuf>,
    content: Option<String>,
    partial_paths: Vec<String>,
    partials: PartialMap,
    // Source file of every partial key, for telling a re-include from a clash.
    partial_sources: HashMap<String, Option<PathBuf>>,
    styles: AssetGroup,
    scripts: AssetGroup,
    data: Value,
    views: Vec<ViewBuilder>,
}

impl ViewBuilder {
    /// Builder for the template at `source`.
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: Some(source.into()),
            ..Self::default()
        }
    }

    /// Builder for a node that has no template of its own.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    pub fn partial_paths(&self) -> &[String] {
        &self.partial_paths
    }

    pub fn partials(&self) -> &PartialMap {
        &self.partials
    }

    pub fn styles(&self) -> &AssetGroup {
        &self.styles
    }

    pub fn scripts(&self) -> &AssetGroup {
        &self.scripts
    }

    pub fn set_content(&mut self, body: impl Into<String>) {
        self.content = Some(body.into());
    }

    pub fn set_data(&mut self, data: Value) {
        self.data = data;
    }

    /// Queue partial references; order and repeats are kept.
    pub fn add_partial_paths<I, S>(&mut self, paths: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.partial_paths.extend(paths.into_iter().map(Into::into));
    }

    /// Classify declared styles and scripts into this node's sets.
    pub fn read_data_into_sets(
        &mut self,
        styles: &AssetDeclaration,
        scripts: &AssetDeclaration,
        resolver: &InlineResolver,
    ) {
        self.styles.merge(&styles.to_group(AssetKind::Style, resolver));
        self.scripts.merge(&scripts.to_group(AssetKind::Script, resolver));
    }

    /// Inline `partial` under `key` and flatten its own partials.
    ///
    /// Adding the same file under the same key again is a no-op.
    ///
    /// # Errors
    ///
    /// [`TesseraError::DuplicatePartial`] if `key`, or any key nested in
    /// `partial`, is already used by a different file. Nothing is changed
    /// when this is returned.
    pub fn add_partial(&mut self, key: &str, partial: ViewBuilder) -> Result<(), TesseraError> {
        if let Some(existing) = self.partial_sources.get(key) {
            if existing.is_some() && *existing == partial.source {
                tracing::debug!("Partial '{}' already included", key);
                return Ok(());
            }
            return Err(TesseraError::DuplicatePartial {
                partial_path: key.to_string(),
            });
        }

        for nested in partial.partials.keys() {
            let nested_source = partial.partial_sources.get(nested).cloned().flatten();
            match self.partial_sources.get(nested) {
                Some(existing) if existing.is_some() && *existing == nested_source => {}
                Some(_) => {
                    return Err(TesseraError::DuplicatePartial {
                        partial_path: nested.to_string(),
                    });
                }
                None if nested == key => {
                    return Err(TesseraError::DuplicatePartial {
                        partial_path: nested.to_string(),
                    });
                }
                None => {}
            }
        }

        tracing::debug!("Adding partial '{}' ({} nested)", key, partial.partials.len());

        self.partials.insert(key.to_string(), partial.content.clone().unwrap_or_default());
        self.partial_sources.insert(key.to_string(), partial.source.clone());

        for (nested, content) in &partial.partials {
            if !self.partials.contains_key(nested) {
                self.partials.insert(nested.clone(), content.clone());
                let nested_source = partial.partial_sources.get(nested).cloned().flatten();
                self.partial_sources.insert(nested.to_string(), nested_source);
            }
        }

        self.styles.merge(&partial.styles);
        self.scripts.merge(&partial.scripts);
        Ok(())
    }

    /// Attach `child` as the next child view and merge its assets.
    pub fn add_child_view(&mut self, child: ViewBuilder) {
        tracing::debug!(
            "Attaching child view {}",
            child.source.as_deref().map_or_else(|| "<none>".into(), |p| p.display().to_string())
        );
        self.styles.merge(&child.styles);
        self.scripts.merge(&child.scripts);
        self.views.push(child);
    }

    /// Snapshot this node and its children.
    pub fn collapse(self) -> ResolvedView {
        ResolvedView {
            source: self.source,
            content: self.content,
            partial_contents: self.partials,
            styles: self.styles,
            scripts: self.scripts,
            data: self.data,
            views: self.views.into_iter().map(ViewBuilder::collapse).collect(),
        }
    }
}
