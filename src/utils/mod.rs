//! Shared utilities.
//!
//! - [`fs`] - template reads, lexical path normalization and "did you mean"
//!   suggestions for missing files

pub mod fs;

pub use fs::{normalize_path, read_template_file};
