//! Presentation Layer
//!
//! This layer handles:
//! - CLI argument parsing (via clap)
//! - Creating use cases with infrastructure dependencies
//! - Output formatting (text/JSON)
//!
//! ## Structure
//!
//! - `cli` - Command line definition
//! - `factory` - Creates use cases with proper dependencies (dependency injection)
//! - `output` - Output rendering abstractions

pub mod cli;
pub mod factory;
pub mod output;

pub use cli::{BuildArgs, Cli, Commands};
pub use factory::{create_asset_emitter, create_module_loader, run_local_build};
pub use output::{create_renderer, render_emit, OutputFormat};
