//! Integration test suite for Tessera
//!
//! End-to-end tests that build real template trees in temporary project
//! directories and render them through the public API and the CLI binary.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **assets**: Style/script classification, deduplication and inline embedding
//! - **cli**: The `tessera` binary
//! - **composition**: Partials, child views and `{{{content}}}` placeholders
//! - **document**: Document rendering, controller responses, configuration
//! - **errors**: Failures that abort a render

// Shared test utilities (from parent tests/ directory)
#[path = "../common/mod.rs"]
mod common;

mod assets;
mod cli;
mod composition;
mod errors;
