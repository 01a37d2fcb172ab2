//! Requests handed to the view engine.
//!
//! These are the shapes a controller returns: either a raw string or a view
//! description naming a template, its child views and document-level assets.
//! All of them deserialize from JSON/YAML using the `templatePath` spelling.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One node of a caller-described view tree.
///
/// `template_path` may be absent, in which case the node only concatenates
/// its children. In front matter a bare string is accepted as shorthand for
/// `{templatePath: <string>}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "ViewSpecRepr")]
#[serde(rename_all = "camelCase")]
pub struct ViewSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_path: Option<String>,
    #[serde(skip_serializing_if = "Value::is_null")]
    pub data: Value,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub views: Vec<ViewSpec>,
}

impl ViewSpec {
    /// A view for `template_path` with no data and no children.
    pub fn new(template_path: impl Into<String>) -> Self {
        Self {
            template_path: Some(template_path.into()),
            ..Self::default()
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = data;
        self
    }

    pub fn with_views(mut self, views: Vec<ViewSpec>) -> Self {
        self.views = views;
        self
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ViewSpecRepr {
    Path(String),
    #[serde(rename_all = "camelCase")]
    Full {
        #[serde(default)]
        template_path: Option<String>,
        #[serde(default)]
        data: Value,
        #[serde(default)]
        views: Vec<ViewSpec>,
    },
}

impl From<ViewSpecRepr> for ViewSpec {
    fn from(repr: ViewSpecRepr) -> Self {
        match repr {
            ViewSpecRepr::Path(path) => ViewSpec::new(path),
            ViewSpecRepr::Full {
                template_path,
                data,
                views,
            } => ViewSpec {
                template_path,
                data,
                views,
            },
        }
    }
}

/// Document-level additions supplied by the caller of a render.
///
/// `styles` and `scripts` are classified as if the root template had declared
/// them. `data` becomes the root node's data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    pub styles: Vec<String>,
    pub scripts: Vec<String>,
    pub data: Value,
}

impl RenderOptions {
    pub fn with_data(data: Value) -> Self {
        Self {
            data,
            ..Self::default()
        }
    }
}

/// What a controller action hands back to the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ControllerResponse {
    /// Returned to the client verbatim.
    Raw(String),
    /// Rendered through the view engine.
    View(ViewResponse),
}

/// The view form of a [`ControllerResponse`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewResponse {
    pub template_path: String,
    #[serde(default)]
    pub views: Vec<ViewSpec>,
    #[serde(default)]
    pub styles: Vec<String>,
    #[serde(default)]
    pub scripts: Vec<String>,
    #[serde(default)]
    pub data: Value,
}

impl ViewResponse {
    /// Split into the arguments of [`crate::views::ViewEngine::render`].
    pub fn into_parts(self) -> (String, Vec<ViewSpec>, RenderOptions) {
        let options = RenderOptions {
            styles: self.styles,
            scripts: self.scripts,
            data: self.data,
        };
        (self.template_path, self.views, options)
    }
}
