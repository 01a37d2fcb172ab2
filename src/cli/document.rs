//! Render a full HTML document.
//!
//! The configured document template (`documents/html.tmpl` by default) wraps
//! the shell, which wraps the given views. Inline styles and scripts from the
//! whole tree are embedded in the document.
//!
//! ```bash
//! tessera document shells/app.tmpl --view views/home.tmpl --data '{"title": "Home"}'
//! ```

use anyhow::Result;
use clap::Args;

use super::common::{CommandContext, parse_data, parse_views};
use crate::views::RenderOptions;

/// Command to render a document to stdout.
#[derive(Args, Debug)]
pub struct DocumentCommand {
    /// Shell template path, relative to the templates directory
    shell: String,

    /// Child view of the shell (template path or JSON view description); repeatable
    #[arg(long = "view", value_name = "VIEW")]
    views: Vec<String>,

    /// JSON data for the document and shell
    #[arg(long)]
    data: Option<String>,

    /// Document-level stylesheet; repeatable
    #[arg(long = "style", value_name = "PATH")]
    styles: Vec<String>,

    /// Document-level script; repeatable
    #[arg(long = "script", value_name = "PATH")]
    scripts: Vec<String>,
}

impl DocumentCommand {
    pub async fn execute(self, ctx: &CommandContext) -> Result<()> {
        let views = parse_views(&self.views)?;
        let options = RenderOptions {
            styles: self.styles,
            scripts: self.scripts,
            data: parse_data(self.data.as_deref())?,
        };

        let html = ctx.engine.render_document(&self.shell, &views, &options).await?;
        println!("{html}");
        Ok(())
    }
}
