//! Print the assembled view tree as JSON.
//!
//! Useful for checking which partials, styles and scripts a template pulls
//! in without rendering it. Inline entries are shown as resolved paths.
//!
//! ```bash
//! tessera tree shells/app.tmpl --view views/home.tmpl
//! ```

use anyhow::{Context, Result};
use clap::Args;

use super::common::{CommandContext, parse_data, parse_views};
use crate::views::RenderOptions;

/// Command to display the resolved tree.
#[derive(Args, Debug)]
pub struct TreeCommand {
    /// Template path, relative to the templates directory
    template: String,

    /// Child view (template path or JSON view description); repeatable
    #[arg(long = "view", value_name = "VIEW")]
    views: Vec<String>,

    /// JSON data for the root template
    #[arg(long)]
    data: Option<String>,

    /// Print compact JSON on one line
    #[arg(long)]
    compact: bool,
}

impl TreeCommand {
    pub async fn execute(self, ctx: &CommandContext) -> Result<()> {
        let views = parse_views(&self.views)?;
        let options = RenderOptions::with_data(parse_data(self.data.as_deref())?);
        let tree = ctx.engine.build(&self.template, &views, &options).await?;

        let json = if self.compact {
            serde_json::to_string(&tree)
        } else {
            serde_json::to_string_pretty(&tree)
        }
        .context("Failed to serialize view tree")?;

        println!("{json}");
        Ok(())
    }
}
