//! Domain Services
//!
//! Pure business logic services that operate on domain values.
//! These services have no I/O dependencies and are easily testable.

mod path_resolver;

pub use path_resolver::{
    glue_file_name, grammar_name_of, output_file_name, wasm_name_of_path, PathResolver,
    DEFAULT_ARTIFACT_SUFFIX, DEFAULT_DEPENDENCY_ROOT,
};
