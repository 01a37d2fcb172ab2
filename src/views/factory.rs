//! Recursive assembly of view trees from template files.
//!
//! [`ViewFactory::build`] reads the root template, resolves its partials one
//! at a time in declaration order, then attaches child views. Partials and
//! front-matter views are resolved relative to the file that declares them;
//! caller-supplied views are resolved relative to the templates directory.
//!
//! Sibling child views are loaded concurrently but always attached in the
//! order they were declared. Partial resolution stays sequential so the first
//! colliding key in declaration order is the one reported.
//!
//! A partial is inlined as a plain string and has no `content` of its own, so
//! a file included as a partial may not declare `views`.

use futures::future::{BoxFuture, try_join_all};
use std::path::{Path, PathBuf};

use crate::core::{Diagnostics, TesseraError};
use crate::utils::fs::{normalize_path, read_template_file};
use crate::views::assets::{AssetDeclaration, InlineResolver};
use crate::views::builder::{ResolvedView, ViewBuilder};
use crate::views::frontmatter::FrontmatterParser;
use crate::views::spec::{RenderOptions, ViewSpec};

/// How a template file is pulled into the tree.
#[derive(Debug, Clone, Copy)]
enum Inclusion<'b> {
    /// The root template; caller assets are merged after its own.
    Root(&'b RenderOptions),
    Partial,
    View,
}

/// Builds [`ResolvedView`] trees for one render operation.
#[derive(Debug)]
pub struct ViewFactory<'a> {
    parser: FrontmatterParser,
    templates_dir: PathBuf,
    static_dir: Option<PathBuf>,
    diagnostics: &'a Diagnostics,
}

impl<'a> ViewFactory<'a> {
    /// Create a factory reading templates under `templates_dir`.
    ///
    /// Root-relative inline assets (`/styles/x-inline.css`) resolve under
    /// `static_dir` when one is given.
    pub fn new(
        templates_dir: impl Into<PathBuf>,
        static_dir: Option<PathBuf>,
        diagnostics: &'a Diagnostics,
    ) -> Self {
        Self {
            parser: FrontmatterParser::new(),
            templates_dir: templates_dir.into(),
            static_dir,
            diagnostics,
        }
    }

    /// Assemble the tree rooted at `template_path` with `views` as children.
    ///
    /// `options.styles`/`options.scripts` are merged right after the root's
    /// own assets and `options.data` becomes the root's data.
    ///
    /// # Errors
    ///
    /// Any missing file, partial collision, partial loop or invalid front
    /// matter anywhere in the tree aborts the build.
    pub async fn build(
        &self,
        template_path: &str,
        views: &[ViewSpec],
        options: &RenderOptions,
    ) -> Result<ResolvedView, TesseraError> {
        let root_path = resolve_template_path(&self.templates_dir, template_path);
        tracing::debug!("Building view tree for {}", root_path.display());

        let mut root = self.create_view(root_path, Vec::new(), Inclusion::Root(options)).await?;
        root.set_data(options.data.clone());

        for child in self.build_views(views.to_vec(), self.templates_dir.clone(), Vec::new()).await? {
            root.add_child_view(child);
        }

        Ok(root.collapse())
    }

    /// Load one template with its partials and front-matter views.
    ///
    /// `chain` holds the files currently being resolved above this one.
    fn create_view<'b>(
        &'b self,
        path: PathBuf,
        mut chain: Vec<PathBuf>,
        inclusion: Inclusion<'b>,
    ) -> BoxFuture<'b, Result<ViewBuilder, TesseraError>> {
        Box::pin(async move {
            if chain.contains(&path) {
                return Err(TesseraError::PartialsLoop {
                    template: path,
                    chain,
                });
            }

            let raw = read_template_file(&path).await?;
            let parsed = self.parser.parse(&raw, &path, self.diagnostics)?;
            let front_matter = parsed.front_matter;
            if matches!(inclusion, Inclusion::Partial) && !front_matter.views.is_empty() {
                return Err(TesseraError::InvalidFrontMatter {
                    path,
                    reason: "a template included as a partial cannot declare views".to_string(),
                });
            }

            let resolver = InlineResolver::for_file(&path, self.static_dir.clone());
            let base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();

            let mut builder = ViewBuilder::new(path.clone());
            builder.set_content(parsed.body);
            builder.add_partial_paths(front_matter.partials);
            builder.read_data_into_sets(&front_matter.styles, &front_matter.scripts, &resolver);

            if let Inclusion::Root(options) = inclusion {
                builder.read_data_into_sets(
                    &AssetDeclaration::List(options.styles.clone()),
                    &AssetDeclaration::List(options.scripts.clone()),
                    &resolver,
                );
            }

            chain.push(path);

            let partial_paths = builder.partial_paths().to_vec();
            for key in partial_paths {
                let partial_path = resolve_template_path(&base_dir, &key);
                let partial =
                    self.create_view(partial_path, chain.clone(), Inclusion::Partial).await?;
                builder.add_partial(&key, partial)?;
            }

            for child in self.build_views(front_matter.views, base_dir, chain).await? {
                builder.add_child_view(child);
            }

            Ok(builder)
        })
    }

    /// Build sibling views concurrently, returned in declaration order.
    async fn build_views(
        &self,
        specs: Vec<ViewSpec>,
        base_dir: PathBuf,
        chain: Vec<PathBuf>,
    ) -> Result<Vec<ViewBuilder>, TesseraError> {
        try_join_all(
            specs
                .into_iter()
                .map(|spec| self.build_view_spec(spec, base_dir.clone(), chain.clone())),
        )
        .await
    }

    fn build_view_spec<'b>(
        &'b self,
        spec: ViewSpec,
        base_dir: PathBuf,
        chain: Vec<PathBuf>,
    ) -> BoxFuture<'b, Result<ViewBuilder, TesseraError>> {
        Box::pin(async move {
            let mut builder = match &spec.template_path {
                Some(template_path) => {
                    let path = resolve_template_path(&base_dir, template_path);
                    self.create_view(path, chain.clone(), Inclusion::View).await?
                }
                None => ViewBuilder::empty(),
            };
            builder.set_data(spec.data);

            for child in self.build_views(spec.views, base_dir, chain).await? {
                builder.add_child_view(child);
            }

            Ok(builder)
        })
    }
}

/// Join `reference` onto `base_dir` and normalize the result.
fn resolve_template_path(base_dir: &Path, reference: &str) -> PathBuf {
    normalize_path(&base_dir.join(reference))
}
