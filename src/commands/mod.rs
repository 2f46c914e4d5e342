//! Command handlers for the grammar-forge binary

mod build;
mod context;
mod emit;
mod module;
mod names;
mod serve;

pub use build::cmd_build;
pub use context::CommandContext;
pub use emit::cmd_emit;
pub use module::{cmd_load, cmd_resolve};
pub use names::cmd_names;
pub use serve::cmd_serve;
