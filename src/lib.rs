//! grammar-forge - tree-sitter grammar to WebAssembly build orchestrator
//!
//! grammar-forge compiles native tree-sitter grammar packages into
//! WebAssembly side modules with emscripten, then serves them from a dev
//! server or copies them into a build's assets.
//!
//! ## Layers
//!
//! - `domain` - Naming rules, the artifact registry and capability ports
//! - `application` - Build, module loading and asset emission use cases
//! - `infrastructure` - Local file system, process runner, dev server
//! - `presentation` - CLI definition, wiring and output rendering

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod logging;
pub mod presentation;

// Re-exports for convenience
pub use application::{BuildReport, BuildUseCase, ModuleLoaderHook};
pub use config::{Config, Verbosity};
pub use domain::entities::{ArtifactEntry, ArtifactRegistry};
pub use domain::value_objects::GrammarSource;
pub use error::{ForgeError, ForgeResult};
