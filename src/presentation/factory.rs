//! Use Case Factory
//!
//! Creates use cases with infrastructure dependencies wired up.
//! This is the dependency injection point for the application.

use crate::application::build::{resolver_for, BuildOptions};
use crate::application::{run_build, AssetEmitter, BuildSession, ModuleLoaderHook};
use crate::config::BuildConfig;
use crate::domain::value_objects::GrammarSource;
use crate::infrastructure::{LocalFs, SystemProcessRunner};

/// Type alias for the concrete module loader
pub type ConcreteModuleLoader = ModuleLoaderHook<LocalFs>;

/// Run a build against the local disk and the host compiler
pub fn run_local_build(
    config: &BuildConfig,
    options: BuildOptions,
    packages: &[String],
) -> BuildSession {
    run_build(
        LocalFs::new(),
        SystemProcessRunner::new(),
        config,
        options,
        packages,
    )
}

/// Create a module loader hook over the local disk
pub fn create_module_loader(config: &BuildConfig, sources: &[GrammarSource]) -> ConcreteModuleLoader {
    ModuleLoaderHook::new(LocalFs::new(), resolver_for(config), sources)
}

/// Create an asset emitter over the local disk
pub fn create_asset_emitter() -> AssetEmitter<LocalFs> {
    AssetEmitter::new(LocalFs::new())
}
