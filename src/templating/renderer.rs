//! Template renderer backed by Handlebars.

use handlebars::Handlebars;
use serde_json::Value;

use super::error::TemplateError;
use super::sections::{BLOCK_HELPER_MISSING, SectionHelper};

/// A Handlebars registry configured for logic-less view templates.
///
/// Partials are registered by the exact key used in `{{> key}}`. Registering
/// a key again replaces the earlier partial, which lets a per-view map shadow
/// a shared one:
///
/// ```rust
/// use serde_json::json;
/// use tessera::templating::TemplateRenderer;
///
/// let mut renderer = TemplateRenderer::new();
/// renderer.register_partial("example/partial", "Partial.").unwrap();
///
/// let out = renderer
///     .render("example/main", "Hello.{{> example/partial}}Goodbye.", &json!({}))
///     .unwrap();
/// assert_eq!(out, "Hello.Partial.Goodbye.");
/// ```
#[derive(Clone)]
pub struct TemplateRenderer {
    registry: Handlebars<'static>,
}

impl std::fmt::Debug for TemplateRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateRenderer").finish_non_exhaustive()
    }
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRenderer {
    /// Create a renderer with HTML escaping and mustache-style sections.
    pub fn new() -> Self {
        let mut registry = Handlebars::new();
        // Partials are spliced in verbatim, not re-indented to the tag's column.
        registry.set_prevent_indent(true);
        registry.register_helper(BLOCK_HELPER_MISSING, Box::new(SectionHelper));

        Self {
            registry,
        }
    }

    /// Register `content` as the partial `key`.
    ///
    /// # Errors
    ///
    /// [`TemplateError::SyntaxError`] naming `key` if the partial does not
    /// compile.
    pub fn register_partial(&mut self, key: &str, content: &str) -> Result<(), TemplateError> {
        self.registry
            .register_partial(key, content)
            .map_err(|source| TemplateError::syntax(key, source))
    }

    /// Register every `(key, content)` pair, stopping at the first failure.
    pub fn register_partials<'a, I>(&mut self, partials: I) -> Result<(), TemplateError>
    where
        I: IntoIterator<Item = (&'a String, &'a String)>,
    {
        for (key, content) in partials {
            self.register_partial(key, content)?;
        }
        Ok(())
    }

    pub fn has_partial(&self, key: &str) -> bool {
        self.registry.has_template(key)
    }

    /// Render `template` against `data`; `name` identifies it in errors.
    ///
    /// # Errors
    ///
    /// [`TemplateError::SyntaxError`] if `template` does not compile and
    /// [`TemplateError::RenderFailed`] if rendering fails, for example on a
    /// `{{> key}}` with no registered partial.
    pub fn render(
        &mut self,
        name: &str,
        template: &str,
        data: &Value,
    ) -> Result<String, TemplateError> {
        self.registry
            .register_template_string(name, template)
            .map_err(|source| TemplateError::syntax(name, source))?;

        let rendered =
            self.registry.render(name, data).map_err(|source| TemplateError::render(name, source));
        self.registry.unregister_template(name);
        rendered
    }
}
