//! Nested view composition.
//!
//! A page is assembled from a tree of template files. Each file may declare
//! in its front matter the styles and scripts it needs, the partials it
//! includes and child views it wraps. The [`ViewEngine`] reads the tree,
//! merges assets into deduplicated ordered lists, embeds inline assets and
//! renders everything into one string.
//!
//! # Pipeline
//!
//! 1. [`factory::ViewFactory`] reads every file ([`frontmatter`]), classifies
//!    assets ([`assets`]) and merges partials and child views into
//!    [`builder::ViewBuilder`] nodes, collapsed into a [`ResolvedView`].
//! 2. [`inline::fetch_inline_assets`] replaces inline asset paths on the root
//!    with file contents.
//! 3. [`renderer::ViewRenderer`] renders children first, then each parent
//!    with `{{{content}}}` bound to its rendered children.
//!
//! # Example
//!
//! ```rust,no_run
//! use tessera::views::{EngineConfig, RenderOptions, ViewEngine, ViewSpec};
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), tessera::core::TesseraError> {
//! let engine = ViewEngine::new(EngineConfig::new("./my-site"));
//! let html = engine
//!     .render_document(
//!         "shells/app.tmpl",
//!         &[ViewSpec::new("views/home.tmpl").with_data(json!({"title": "Home"}))],
//!         &RenderOptions::default(),
//!     )
//!     .await?;
//! println!("{html}");
//! # Ok(())
//! # }
//! ```

pub mod assets;
pub mod builder;
pub mod factory;
pub mod frontmatter;
pub mod inline;
pub mod renderer;
pub mod spec;
pub mod static_partials;

pub use assets::AssetGroup;
pub use builder::{PartialMap, ResolvedView};
pub use spec::{ControllerResponse, RenderOptions, ViewResponse, ViewSpec};

use serde_json::Value;
use std::path::PathBuf;

use crate::config::ProjectConfig;
use crate::core::{Diagnostics, TesseraError};
use factory::ViewFactory;
use renderer::ViewRenderer;

/// Paths and limits used by a [`ViewEngine`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Project root; static partial keys are relative to it.
    pub project_root: PathBuf,
    /// Base directory for caller-supplied template paths.
    pub templates_dir: PathBuf,
    /// Directory for root-relative inline assets and static partials.
    pub static_dir: PathBuf,
    /// Document template, relative to `templates_dir`.
    pub document: String,
    /// Expose static files as partials.
    pub static_partials: bool,
    /// Largest inline asset in bytes.
    pub max_inline_asset_size: u64,
}

impl EngineConfig {
    /// Default layout for a project rooted at `project_root`.
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self::from_project(&ProjectConfig::default(), project_root)
    }

    /// Layout described by `config` for a project rooted at `project_root`.
    pub fn from_project(config: &ProjectConfig, project_root: impl Into<PathBuf>) -> Self {
        let project_root = project_root.into();
        Self {
            templates_dir: config.templates_path(&project_root),
            static_dir: config.static_path(&project_root),
            document: config.document.clone(),
            static_partials: config.static_partials,
            max_inline_asset_size: config.max_inline_asset_size,
            project_root,
        }
    }
}

/// Entry point for rendering view trees.
///
/// The engine holds no state between calls: every render re-reads all
/// templates and builds its own tree, so one engine can serve concurrent
/// requests.
#[derive(Debug, Clone)]
pub struct ViewEngine {
    config: EngineConfig,
}

impl ViewEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
        }
    }

    pub fn from_config(config: &ProjectConfig, project_root: impl Into<PathBuf>) -> Self {
        Self::new(EngineConfig::from_project(config, project_root))
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Assemble the tree for `template_path` without rendering it.
    ///
    /// Inline asset entries are still paths.
    pub async fn build(
        &self,
        template_path: &str,
        views: &[ViewSpec],
        options: &RenderOptions,
    ) -> Result<ResolvedView, TesseraError> {
        let diagnostics = Diagnostics::new();
        self.factory(&diagnostics).build(template_path, views, options).await
    }

    /// Assemble, embed inline assets and render `template_path`.
    ///
    /// # Errors
    ///
    /// Fails if any template, partial or inline asset is missing, if partial
    /// keys collide or loop, or if any template is malformed.
    pub async fn render(
        &self,
        template_path: &str,
        views: &[ViewSpec],
        options: &RenderOptions,
    ) -> Result<String, TesseraError> {
        let diagnostics = Diagnostics::new();
        self.render_with_diagnostics(template_path, views, options, &diagnostics).await
    }

    /// Like [`ViewEngine::render`], recording warnings into `diagnostics`.
    pub async fn render_with_diagnostics(
        &self,
        template_path: &str,
        views: &[ViewSpec],
        options: &RenderOptions,
        diagnostics: &Diagnostics,
    ) -> Result<String, TesseraError> {
        tracing::debug!(template = template_path, views = views.len(), "Rendering view tree");
        let mut root = self.factory(diagnostics).build(template_path, views, options).await?;
        inline::fetch_inline_assets(&mut root, self.config.max_inline_asset_size).await?;
        let output = self.render_tree(&root).await?;
        if diagnostics.warning_count() > 0 {
            tracing::debug!(
                template = template_path,
                warnings = diagnostics.warning_count(),
                "Rendered with warnings"
            );
        }
        Ok(output)
    }

    /// Render a single template with `data` and no child views.
    pub async fn render_view(&self, template_path: &str, data: Value) -> Result<String, TesseraError> {
        self.render(template_path, &[], &RenderOptions::with_data(data)).await
    }

    /// Render a full document: the document template wraps `shell`, which
    /// wraps `views`.
    ///
    /// `options.data` is given to both the document and the shell.
    ///
    /// # Errors
    ///
    /// [`TesseraError::ShellRequired`] if `shell` is empty, otherwise the same
    /// errors as [`ViewEngine::render`].
    pub async fn render_document(
        &self,
        shell: &str,
        views: &[ViewSpec],
        options: &RenderOptions,
    ) -> Result<String, TesseraError> {
        if shell.trim().is_empty() {
            return Err(TesseraError::ShellRequired);
        }

        let shell_view =
            ViewSpec::new(shell).with_data(options.data.clone()).with_views(views.to_vec());
        let document = self.config.document.clone();
        self.render(&document, &[shell_view], options).await
    }

    /// Turn a controller response into the response body.
    pub async fn respond(&self, response: ControllerResponse) -> Result<String, TesseraError> {
        match response {
            ControllerResponse::Raw(body) => Ok(body),
            ControllerResponse::View(view) => {
                let (template_path, views, options) = view.into_parts();
                self.render(&template_path, &views, &options).await
            }
        }
    }

    fn factory<'a>(&self, diagnostics: &'a Diagnostics) -> ViewFactory<'a> {
        ViewFactory::new(
            self.config.templates_dir.clone(),
            Some(self.config.static_dir.clone()),
            diagnostics,
        )
    }

    async fn render_tree(&self, root: &ResolvedView) -> Result<String, TesseraError> {
        if self.config.static_partials {
            let shared =
                static_partials::load_static_partials(&self.config.project_root, &self.config.static_dir)
                    .await?;
            ViewRenderer::new().with_static_partials(&shared).render(root)
        } else {
            ViewRenderer::new().render(root)
        }
    }
}
