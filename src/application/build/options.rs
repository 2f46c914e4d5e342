//! Build Options

use std::path::PathBuf;

use crate::config::{BuildConfig, CachePolicy};
use crate::domain::services::PathResolver;

/// Options for the build use case
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Invoke the compiler even when the output exists
    pub always_rebuild: bool,
    /// Compiler cache directory, passed through as `--cache`
    pub cache_dir: Option<PathBuf>,
    pub cache_policy: CachePolicy,
    /// Compiler program
    pub compiler: String,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self::from_config(&BuildConfig::default())
    }
}

impl BuildOptions {
    pub fn from_config(config: &BuildConfig) -> Self {
        Self {
            always_rebuild: config.always_rebuild,
            cache_dir: config.cache_dir.clone(),
            cache_policy: config.cache_policy,
            compiler: config.compiler.clone(),
        }
    }

    pub fn with_always_rebuild(mut self, always_rebuild: bool) -> Self {
        self.always_rebuild = always_rebuild;
        self
    }
}

/// Path resolver matching a build configuration
pub fn resolver_for(config: &BuildConfig) -> PathResolver {
    PathResolver::new(
        config.dependency_root.clone(),
        config.out_dir.clone(),
        config.artifact_suffix.clone(),
    )
}
