//! Core types shared across Tessera.
//!
//! - [`error`] - [`TesseraError`], [`ErrorContext`] and [`user_friendly_error`]
//! - [`diagnostics`] - per-render warning sink passed through the view factory

pub mod diagnostics;
pub mod error;

pub use diagnostics::Diagnostics;
pub use error::{ErrorContext, TesseraError, user_friendly_error};
