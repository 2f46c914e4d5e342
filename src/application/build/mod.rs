//! Build Module
//!
//! Compiles grammar packages to WebAssembly and registers the artifacts.
//!
//! ## Structure
//!
//! - `compile` - Compiler command line and invocation (`CompilerInvoker`)
//! - `options` - Configuration types (`BuildOptions`)
//! - `report` - Per-package outcomes (`BuildReport`, `PackageState`)
//! - `use_case` - Core orchestration (`BuildUseCase`)
//!
//! ## Usage
//!
//! ```ignore
//! use grammar_forge::application::build::{BuildOptions, BuildUseCase};
//!
//! let use_case = BuildUseCase::new(fs, runner, fingerprints, resolver, options);
//! let report = use_case.execute(&sources, &mut registry);
//! ```

mod compile;
mod options;
mod report;
mod use_case;

pub use compile::{
    exported_symbol, CompileRequest, CompileResult, CompilerInvoker, ExitStatus,
};
pub use options::{resolver_for, BuildOptions};
pub use report::{BuildFailure, BuildReport, PackageReport, PackageState};
pub use use_case::BuildUseCase;

#[cfg(test)]
mod tests;
