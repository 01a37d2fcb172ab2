//! Logic-less template substitution.
//!
//! Views are rendered with [Handlebars](https://docs.rs/handlebars), restricted
//! by convention to its mustache-compatible subset:
//!
//! - `{{name}}` - HTML-escaped variable
//! - `{{{name}}}` - raw variable
//! - `{{#name}}...{{/name}}` - section (iterates arrays, skips falsy values)
//! - `{{#name}}...{{else}}...{{/name}}` - section with a fallback branch
//! - `{{> key}}` - partial expansion by exact key
//! - `{{! comment}}`
//!
//! Names may be dotted (`data.hello`) and `{{this}}` refers to the current
//! item inside a section. Section behavior is provided by a
//! `blockHelperMissing` hook, so no helper has to be registered per name.

pub mod error;
mod renderer;
mod sections;

pub use error::TemplateError;
pub use renderer::TemplateRenderer;
