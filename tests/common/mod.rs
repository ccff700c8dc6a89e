//! Common test utilities for Keel scenario tests.
//!
//! This module provides:
//! - `TestEnv`: Isolated workspace and home directories plus CLI helpers
//! - Fixtures: Reusable workspace documents and config content

pub mod env;
pub mod fixtures;

pub use env::*;
pub use fixtures::*;
