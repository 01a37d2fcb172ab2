//! Tessera - nested view templating
//!
//! Tessera assembles HTML documents from a tree of template files. Each file
//! may carry a front matter block declaring the stylesheets and scripts it
//! needs, the partials it includes and the child views it wraps. The engine
//! reads the whole tree, merges assets into deduplicated ordered lists,
//! embeds inline assets and renders the result with a logic-less,
//! mustache-style substitution.
//!
//! # Architecture Overview
//!
//! A render request flows through these stages:
//! - **Front matter** - each file is split into metadata and body
//! - **Assets** - styles and scripts are classified by file name
//!   (`*-inline.css`, `*-sync.js`) and merged in first-seen order
//! - **Assembly** - partials are flattened into one collision-checked map per
//!   node; child views stay separate nodes rendered into `{{{content}}}`
//! - **Inline fetch** - inline asset paths on the root become file contents
//! - **Rendering** - children first, then parents, through [`templating`]
//!
//! # Core Modules
//!
//! - [`views`] - [`views::ViewEngine`] and the assembly pipeline
//! - [`templating`] - mustache-style substitution over Handlebars
//! - [`core`] - error types and per-render diagnostics
//! - [`config`] - `tessera.toml` project configuration
//! - [`cli`] - the `tessera` command-line interface
//! - [`utils`] - file system helpers
//!
//! # Example
//!
//! ```rust,no_run
//! use tessera::views::{EngineConfig, RenderOptions, ViewEngine, ViewSpec};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let engine = ViewEngine::new(EngineConfig::new("./site"));
//! let html = engine
//!     .render("layouts/main.tmpl", &[ViewSpec::new("views/home.tmpl")], &RenderOptions::default())
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod templating;
pub mod utils;
pub mod views;

// test_utils is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
