//! Render a template with optional child views.
//!
//! # Examples
//!
//! ```bash
//! # Render a single template
//! tessera render views/home.tmpl --data '{"title": "Home"}'
//!
//! # Render a layout with two child views
//! tessera render layouts/two-col.tmpl --view views/left.tmpl --view views/right.tmpl
//!
//! # Render a controller response saved as JSON
//! tessera render --spec response.json
//! ```

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use super::common::{CommandContext, parse_data, parse_views};
use crate::views::{ControllerResponse, RenderOptions};

/// Command to render a template to stdout.
#[derive(Args, Debug)]
pub struct RenderCommand {
    /// Template path, relative to the templates directory
    #[arg(required_unless_present = "spec")]
    template: Option<String>,

    /// Child view (template path or JSON view description); repeatable
    #[arg(long = "view", value_name = "VIEW")]
    views: Vec<String>,

    /// JSON data for the root template
    #[arg(long)]
    data: Option<String>,

    /// Document-level stylesheet; repeatable
    #[arg(long = "style", value_name = "PATH")]
    styles: Vec<String>,

    /// Document-level script; repeatable
    #[arg(long = "script", value_name = "PATH")]
    scripts: Vec<String>,

    /// JSON file holding a controller response (raw string or view object)
    #[arg(long, conflicts_with_all = ["template", "views", "data"])]
    spec: Option<PathBuf>,
}

impl RenderCommand {
    pub async fn execute(self, ctx: &CommandContext) -> Result<()> {
        let output = if let Some(spec_path) = &self.spec {
            let content = tokio::fs::read_to_string(spec_path)
                .await
                .with_context(|| format!("Failed to read {}", spec_path.display()))?;
            let response: ControllerResponse = serde_json::from_str(&content)
                .with_context(|| format!("Invalid controller response in {}", spec_path.display()))?;
            ctx.engine.respond(response).await?
        } else {
            let template = self.template.as_deref().unwrap_or_default();
            let views = parse_views(&self.views)?;
            let options = RenderOptions {
                styles: self.styles,
                scripts: self.scripts,
                data: parse_data(self.data.as_deref())?,
            };
            ctx.engine.render(template, &views, &options).await?
        };

        println!("{output}");
        Ok(())
    }
}
