//! Rendering of assembled view trees.
//!
//! Each node is rendered with this context:
//!
//! | Name        | Value |
//! |-------------|-------|
//! | `content`   | rendered children, concatenated in order |
//! | `content-N` | rendered child `N` (zero based) |
//! | `data`      | the node's own data |
//! | `styles`    | `{inline, sync, async}` lists |
//! | `scripts`   | `{inline, sync, async}` lists |
//!
//! Children are rendered before their parent, so `{{{content}}}` nests
//! depth-first. Child markup is a plain string in the context, so `{{content}}`
//! HTML-escapes it; use `{{{content}}}` to embed it.
//!
//! `{{> key}}` tags resolve through the node's flattened partial map, then
//! through the shared static partials when they are enabled.

use serde_json::{Map, Value, json};

use crate::core::TesseraError;
use crate::templating::TemplateRenderer;
use crate::views::assets::AssetGroup;
use crate::views::builder::{PartialMap, ResolvedView};

/// Template used for nodes that have no template file.
const PASS_THROUGH_TEMPLATE: &str = "{{{content}}}";

/// Renders [`ResolvedView`] trees to strings.
#[derive(Debug, Clone, Default)]
pub struct ViewRenderer {
    shared: TemplateRenderer,
}

impl ViewRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fall back to `partials` for keys missing from a node's own map.
    ///
    /// Static files that don't compile as templates are skipped with a
    /// warning; referencing one then fails like any unknown partial.
    pub fn with_static_partials(mut self, partials: &PartialMap) -> Self {
        for (key, content) in partials {
            if let Err(e) = self.shared.register_partial(key, content) {
                tracing::warn!("Skipping static partial '{}': {}", key, e);
            }
        }
        self
    }

    /// Render `view` and all of its children.
    ///
    /// # Errors
    ///
    /// [`TesseraError::Template`] if any template or partial in the tree is
    /// malformed, or a `{{> key}}` names an unknown partial.
    pub fn render(&self, view: &ResolvedView) -> Result<String, TesseraError> {
        let children = view
            .views
            .iter()
            .map(|child| self.render(child))
            .collect::<Result<Vec<_>, _>>()?;

        let name = view
            .source
            .as_deref()
            .map_or_else(|| "<view group>".to_string(), |p| p.display().to_string());
        let context = render_context(view, &children);
        let template = view.content.as_deref().unwrap_or(PASS_THROUGH_TEMPLATE);

        // Own partials are registered last so they shadow static ones.
        let mut renderer = self.shared.clone();
        let rendered = match renderer.register_partials(&view.partial_contents) {
            Ok(()) => renderer.render(&name, template, &context),
            Err(e) => Err(e),
        };
        rendered.map_err(|source| TesseraError::Template {
            name,
            source,
        })
    }
}

fn render_context(view: &ResolvedView, children: &[String]) -> Value {
    let mut context = Map::new();
    context.insert("content".to_string(), Value::String(children.concat()));
    for (index, child) in children.iter().enumerate() {
        context.insert(format!("content-{index}"), Value::String(child.clone()));
    }
    context.insert("data".to_string(), view.data.clone());
    context.insert("styles".to_string(), asset_value(&view.styles));
    context.insert("scripts".to_string(), asset_value(&view.scripts));
    Value::Object(context)
}

fn asset_value(group: &AssetGroup) -> Value {
    json!({
        "inline": group.inline,
        "sync": group.sync,
        "async": group.asynchronous,
    })
}
