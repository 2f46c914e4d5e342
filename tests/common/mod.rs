//! Common test utilities for grammar-forge CLI tests.
//!
//! This module provides:
//! - `TestEnv`: Isolated project and home directories plus CLI helpers
//! - Fixtures: grammar package layouts and a fake compiler

pub mod env;
pub mod fixtures;

#[allow(unused_imports)]
pub use env::*;
#[allow(unused_imports)]
pub use fixtures::*;
