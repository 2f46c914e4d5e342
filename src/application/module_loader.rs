//! Module Loader Hook
//!
//! Lets a host bundler import a local grammar package by its base name.
//! `resolve` tags the id with a private prefix; `load` answers tagged ids
//! with the package's generated JavaScript glue.

use tracing::debug;

use crate::domain::ports::FileSystem;
use crate::domain::services::PathResolver;
use crate::domain::value_objects::GrammarSource;
use crate::error::ForgeResult;

/// Prefix marking module ids owned by this hook
pub const MODULE_PREFIX: &str = "@grammar-forge@";

/// Resolves and loads glue modules for configured local packages
pub struct ModuleLoaderHook<FS: FileSystem> {
    fs: FS,
    resolver: PathResolver,
    local_names: Vec<String>,
}

impl<FS: FileSystem> ModuleLoaderHook<FS> {
    pub fn new(fs: FS, resolver: PathResolver, sources: &[GrammarSource]) -> Self {
        let local_names = sources
            .iter()
            .filter(|s| !s.is_dependency())
            .map(|s| s.base_name().to_string())
            .collect();
        Self {
            fs,
            resolver,
            local_names,
        }
    }

    /// Tag `id` when it names a configured local package
    pub fn resolve(&self, id: &str) -> Option<String> {
        if self.local_names.iter().any(|name| name == id) {
            debug!(id, "resolved grammar module");
            Some(format!("{}{}", MODULE_PREFIX, id))
        } else {
            None
        }
    }

    /// Glue code for a tagged id; `Ok(None)` for ids this hook does not own
    pub fn load(&self, id: &str) -> ForgeResult<Option<String>> {
        let Some(name) = id.strip_prefix(MODULE_PREFIX) else {
            return Ok(None);
        };
        let path = self.resolver.glue_path(name);
        debug!(path = %path.display(), "reading grammar glue module");
        let code = self.fs.read_to_string(&path)?;
        Ok(Some(code))
    }
}
