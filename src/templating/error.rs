//! Template substitution errors
//!
//! Wraps the errors reported by Handlebars with the name of the template or
//! partial that failed, so a template author can find the offending file.

/// Errors raised while compiling or rendering a template.
#[derive(Debug)]
pub enum TemplateError {
    /// The template or a partial does not compile (unclosed block, bad tag).
    SyntaxError {
        /// Template name or partial key
        template: String,
        source: Box<handlebars::TemplateError>,
    },

    /// The template compiled but rendering failed (e.g. an unknown partial).
    RenderFailed {
        /// Template name
        template: String,
        source: Box<handlebars::RenderError>,
    },
}

impl TemplateError {
    pub(crate) fn syntax(template: &str, source: handlebars::TemplateError) -> Self {
        TemplateError::SyntaxError {
            template: template.to_string(),
            source: Box::new(source),
        }
    }

    pub(crate) fn render(template: &str, source: handlebars::RenderError) -> Self {
        TemplateError::RenderFailed {
            template: template.to_string(),
            source: Box::new(source),
        }
    }

    /// Name of the template or partial that failed.
    pub fn template(&self) -> &str {
        match self {
            TemplateError::SyntaxError {
                template,
                ..
            }
            | TemplateError::RenderFailed {
                template,
                ..
            } => template,
        }
    }

    /// Generate a multi-line message for terminal output.
    pub fn format_with_context(&self, template_name: &str) -> String {
        let mut msg = String::new();

        match self {
            TemplateError::SyntaxError {
                ..
            } => msg.push_str("ERROR: Template Syntax Error\n\n"),
            TemplateError::RenderFailed {
                ..
            } => msg.push_str("ERROR: Template Render Error\n\n"),
        }
        msg.push_str(&format!("Error: {}\n", self));
        msg.push_str(&format!("Template: {}\n", template_name));

        match self {
            TemplateError::SyntaxError {
                ..
            } => {
                msg.push_str(
                    "\nSUGGESTION: Check that every '{{#name}}' block has a matching '{{/name}}'.\n",
                );
            }
            TemplateError::RenderFailed {
                ..
            } => {
                msg.push_str(
                    "\nSUGGESTION: Every '{{> key}}' must be declared under 'partials' in the front matter.\n",
                );
            }
        }

        msg
    }
}

impl std::fmt::Display for TemplateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TemplateError::SyntaxError {
                template,
                source,
            } => write!(f, "Syntax error in '{}': {}", template, source),
            TemplateError::RenderFailed {
                template,
                source,
            } => write!(f, "Failed to render '{}': {}", template, source),
        }
    }
}

impl std::error::Error for TemplateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TemplateError::SyntaxError {
                source,
                ..
            } => Some(source.as_ref()),
            TemplateError::RenderFailed {
                source,
                ..
            } => Some(source.as_ref()),
        }
    }
}
