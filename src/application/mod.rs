//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain naming rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `BuildUseCase` - Stages, compiles and registers grammar packages
//! - `ModuleLoaderHook` - Resolves and loads glue modules for local grammars
//! - `AssetEmitter` - Copies registered artifacts into the build output
//!
//! ## Services
//!
//! - `run_build` - Seed the registry, build, and freeze the registry

pub mod build;
pub mod emit;
pub mod module_loader;
pub mod session;

pub use build::{
    BuildFailure, BuildOptions, BuildReport, BuildUseCase, PackageReport, PackageState,
};
pub use emit::{AssetEmitter, EmitOptions, EmitResult, EmittedAsset};
pub use module_loader::{ModuleLoaderHook, MODULE_PREFIX};
pub use session::{grammar_sources, run_build, BuildSession};
