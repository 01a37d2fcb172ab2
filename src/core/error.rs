//! Error handling for Tessera
//!
//! This module provides the error types surfaced by the view engine and the
//! user-friendly reporting used by the CLI. The error system is designed around
//! two core principles:
//! 1. **Strongly-typed errors** so the HTTP layer can map failures to responses
//! 2. **User-friendly messages** with actionable suggestions for template authors
//!
//! # Error Categories
//!
//! - **Not found**: [`TesseraError::TemplateNotFound`] for a missing template or partial
//! - **Collisions**: [`TesseraError::DuplicatePartial`] when two files share a partial key
//! - **Loops**: [`TesseraError::PartialsLoop`] when partials include each other
//! - **Configuration**: [`TesseraError::InvalidFrontMatter`], [`TesseraError::ConfigError`]
//! - **Assets**: [`TesseraError::InlineAssetRead`] when an inline style or script can't be read
//!
//! None of these are retried: every read is local and a failure means the
//! project on disk is wrong.
//!
//! # Examples
//!
//! ```rust,no_run
//! use tessera::core::{TesseraError, user_friendly_error};
//!
//! let error = TesseraError::DuplicatePartial {
//!     partial_path: "./same-name.tmpl".to_string(),
//! };
//! assert_eq!(error.status_code(), 500);
//!
//! let ctx = user_friendly_error(anyhow::Error::from(error));
//! ctx.display(); // Shows colored error with suggestions
//! ```

use colored::Colorize;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use crate::templating::TemplateError;

/// The main error type for view engine operations.
///
/// Each variant carries enough context to report the failure to a template
/// author or to map it onto an HTTP status via [`TesseraError::status_code`].
#[derive(Error, Debug)]
pub enum TesseraError {
    /// A template, partial or child view file does not exist.
    ///
    /// # Fields
    /// - `template_path`: The path as it was resolved on disk
    /// - `suggestions`: Similarly named files in the same directory
    #[error("Template not found: {}", .template_path.display())]
    TemplateNotFound {
        /// Resolved path of the missing template
        template_path: PathBuf,
        /// Similarly named templates that do exist
        suggestions: Vec<String>,
    },

    /// Two different files were pulled into one view under the same partial key.
    #[error(
        "Two partials have been referenced in the same view tree. Please rename the partials or use relative paths for: '{partial_path}'"
    )]
    DuplicatePartial {
        /// The `{{> key}}` string shared by both partials
        partial_path: String,
    },

    /// A partial includes itself through a chain of partials.
    #[error("Found a partials loop for template: '{}'", .template.display())]
    PartialsLoop {
        /// The file that was reached a second time
        template: PathBuf,
        /// Files being resolved when the loop was found, outermost first
        chain: Vec<PathBuf>,
    },

    /// Front matter parsed as YAML but declares values of the wrong shape.
    #[error("Invalid front matter in {}: {reason}", .path.display())]
    InvalidFrontMatter {
        /// Template whose front matter is invalid
        path: PathBuf,
        /// What was wrong with it
        reason: String,
    },

    /// An inline style or script could not be read.
    #[error("Failed to read inline asset {}", .path.display())]
    InlineAssetRead {
        /// Resolved path of the asset
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// An inline asset exceeded the configured size limit.
    #[error("Inline asset {} is {size} bytes, larger than the limit of {limit} bytes", .path.display())]
    InlineAssetTooLarge {
        /// Resolved path of the asset
        path: PathBuf,
        /// Actual size in bytes
        size: u64,
        /// Configured limit in bytes
        limit: u64,
    },

    /// A document render was requested without a shell template.
    #[error("A shell template is required to render a document")]
    ShellRequired,

    /// The substitution step rejected a template.
    #[error("Failed to render template {name}: {source}")]
    Template {
        /// Template (or partial key) being rendered
        name: String,
        /// Underlying syntax or rendering error
        #[source]
        source: TemplateError,
    },

    /// Scanning the static directory for legacy partials failed.
    #[error("Failed to scan static directory: {message}")]
    StaticScan {
        /// Description of the failure
        message: String,
    },

    /// Configuration file issues.
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration error
        message: String,
    },

    /// Any other file system error while reading templates.
    #[error("Failed to read {}", .path.display())]
    Io {
        /// Path being read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl TesseraError {
    /// Build the right error for a failed template read.
    ///
    /// `NotFound` becomes [`TesseraError::TemplateNotFound`], everything else is
    /// reported as [`TesseraError::Io`].
    pub fn from_read_error(path: PathBuf, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            let suggestions = crate::utils::fs::similar_file_names(&path);
            TesseraError::TemplateNotFound {
                template_path: path,
                suggestions,
            }
        } else {
            TesseraError::Io {
                path,
                source,
            }
        }
    }

    /// HTTP status the routing layer should answer with.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            TesseraError::TemplateNotFound {
                ..
            } => 404,
            _ => 500,
        }
    }
}

/// Error context wrapper that provides user-friendly error information.
///
/// Wraps a [`TesseraError`] with an optional suggestion (printed in green) and
/// optional details (printed in yellow).
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: anyhow::Error,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no suggestion or details.
    #[must_use]
    pub fn new(error: impl Into<anyhow::Error>) -> Self {
        Self {
            error: error.into(),
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Display the error context to stderr with terminal colors.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

/// Convert any error to a user-friendly [`ErrorContext`] with actionable suggestions.
///
/// Recognizes [`TesseraError`] variants (possibly wrapped in anyhow context),
/// [`std::io::Error`] and [`toml::de::Error`]; anything else is passed through
/// with its cause chain as details.
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(tessera_error) = error.downcast_ref::<TesseraError>() {
        let (suggestion, details) = describe(tessera_error);
        let mut ctx = ErrorContext::new(error);
        if let Some(suggestion) = suggestion {
            ctx = ctx.with_suggestion(suggestion);
        }
        if let Some(details) = details {
            ctx = ctx.with_details(details);
        }
        return ctx;
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        let suggestion = match io_error.kind() {
            std::io::ErrorKind::NotFound => {
                Some("Check that the file or directory exists and the path is correct")
            }
            std::io::ErrorKind::PermissionDenied => {
                Some("Check the file permissions of the project directory")
            }
            _ => None,
        };
        let mut ctx = ErrorContext::new(error);
        if let Some(suggestion) = suggestion {
            ctx = ctx.with_suggestion(suggestion);
        }
        return ctx;
    }

    if error.downcast_ref::<toml::de::Error>().is_some() {
        return ErrorContext::new(error)
            .with_suggestion("Check the TOML syntax in tessera.toml")
            .with_details("All keys in tessera.toml are optional; remove a key to use its default");
    }

    let chain: Vec<String> = error.chain().skip(1).map(ToString::to_string).collect();
    let mut ctx = ErrorContext::new(error);
    if !chain.is_empty() {
        ctx = ctx.with_details(format!("Caused by: {}", chain.join(": ")));
    }
    ctx
}

fn describe(error: &TesseraError) -> (Option<String>, Option<String>) {
    match error {
        TesseraError::TemplateNotFound {
            suggestions,
            ..
        } => {
            let suggestion = if suggestions.is_empty() {
                "Check the template path; partials resolve relative to the file that declares them"
                    .to_string()
            } else {
                format!("Did you mean: {}?", suggestions.join(", "))
            };
            (Some(suggestion), None)
        }
        TesseraError::DuplicatePartial {
            partial_path,
        } => (
            Some(format!("Rename one of the files referenced as '{partial_path}'")),
            Some("Partials are flattened into one map per view, so keys must be unique".to_string()),
        ),
        TesseraError::PartialsLoop {
            chain,
            ..
        } => {
            let chain =
                chain.iter().map(|p| p.display().to_string()).collect::<Vec<_>>().join(" -> ");
            (
                Some("Remove the partial reference that closes the loop".to_string()),
                Some(format!("Partial chain: {chain}")),
            )
        }
        TesseraError::InvalidFrontMatter {
            ..
        } => (
            Some("styles, scripts and partials must be lists of strings".to_string()),
            None,
        ),
        TesseraError::InlineAssetRead {
            ..
        }
        | TesseraError::InlineAssetTooLarge {
            ..
        } => (
            Some(
                "Inline assets are embedded in the page; make sure the file exists or drop the -inline suffix"
                    .to_string(),
            ),
            None,
        ),
        TesseraError::ShellRequired => {
            (Some("Pass a shell template, e.g. 'shells/app.tmpl'".to_string()), None)
        }
        TesseraError::Template {
            name,
            source,
        } => (None, Some(source.format_with_context(name))),
        TesseraError::StaticScan {
            ..
        }
        | TesseraError::ConfigError {
            ..
        }
        | TesseraError::Io {
            ..
        } => (None, None),
    }
}
