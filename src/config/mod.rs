//! Configuration module for grammar-forge
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (GRAMMAR_FORGE_*)
//! 3. Project config (grammar-forge.toml)
//! 4. User config (~/.config/grammar-forge/config.toml)
//! 5. Built-in defaults (lowest priority)

mod loader;
mod types;

pub use loader::{
    resolve, with_env_overrides, with_overrides_from, ConfigWarning, LoadedConfig,
    PROJECT_CONFIG_FILE,
};
pub use types::{
    BuildConfig, CachePolicy, Config, EmitConfig, OutputConfig, ServerConfig, Verbosity,
};
