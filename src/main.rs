//! Tessera CLI entry point
//!
//! Parses arguments, runs the command and prints errors with suggestions.
//! Commands:
//! - `render` - Render a template with optional child views
//! - `document` - Render a full document around a shell
//! - `tree` - Print the resolved view tree as JSON

use anyhow::Result;
use clap::Parser;
use tessera::cli;
use tessera::core::error::user_friendly_error;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = cli::Cli::parse();

    // Set up colored output for Windows
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    match cli.execute().await {
        Ok(()) => Ok(()),
        Err(e) => {
            // Convert to user-friendly error with context and suggestions
            let error_ctx = user_friendly_error(e);
            error_ctx.display();
            std::process::exit(1);
        }
    }
}
