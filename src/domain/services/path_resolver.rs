//! Path Resolver
//!
//! Derives on-disk locations and artifact file names for grammar packages.
//!
//! ```text
//! tree-sitter-json            -> node_modules/tree-sitter-json
//! ./grammars/tree-sitter-html -> ./grammars/tree-sitter-html
//! ../../tree-sitter-c-sharp   -> tree_sitter_c_sharp_bg.wasm
//! ```

use std::path::{Path, PathBuf};

use crate::domain::value_objects::GrammarSource;
use crate::error::{ForgeError, ForgeResult};

/// Conventional installed-packages directory
pub const DEFAULT_DEPENDENCY_ROOT: &str = "node_modules";

/// Tag appended to the underscored base name of an artifact
pub const DEFAULT_ARTIFACT_SUFFIX: &str = "_bg";

/// Subdirectory of a local package holding its prebuilt artifact
const LOCAL_PREBUILT_DIR: &str = "pkg";

const GRAMMAR_PREFIX: &str = "tree-sitter-";

fn base_name_of(identifier: &str) -> &str {
    Path::new(identifier)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(identifier)
}

/// Artifact file name for a package path, using the default suffix
///
/// `../../my-grammar` -> `my_grammar_bg.wasm`
pub fn wasm_name_of_path(identifier: &str) -> String {
    wasm_name_with_suffix(identifier, DEFAULT_ARTIFACT_SUFFIX)
}

fn wasm_name_with_suffix(identifier: &str, suffix: &str) -> String {
    format!("{}{}.wasm", base_name_of(identifier).replace('-', "_"), suffix)
}

/// Grammar name from a package base name (`tree-sitter-json` -> `json`)
pub fn grammar_name_of(base_name: &str) -> ForgeResult<String> {
    match base_name.strip_prefix(GRAMMAR_PREFIX) {
        Some(name) if !name.is_empty() => Ok(name.to_string()),
        _ => Err(ForgeError::InvalidGrammarName {
            package: base_name.to_string(),
        }),
    }
}

/// Compiled output file name for a grammar (`json` -> `tree-sitter-json.wasm`)
pub fn output_file_name(grammar_name: &str) -> String {
    format!("{}{}.wasm", GRAMMAR_PREFIX, grammar_name)
}

/// Generated JavaScript glue file name (`tree-sitter-json` -> `tree_sitter_json.js`)
pub fn glue_file_name(base_name: &str) -> String {
    format!("{}.js", base_name.replace('-', "_"))
}

/// Resolves package locations against the configured roots
#[derive(Debug, Clone)]
pub struct PathResolver {
    dependency_root: PathBuf,
    out_dir: PathBuf,
    artifact_suffix: String,
}

impl PathResolver {
    pub fn new(
        dependency_root: impl Into<PathBuf>,
        out_dir: impl Into<PathBuf>,
        artifact_suffix: impl Into<String>,
    ) -> Self {
        Self {
            dependency_root: dependency_root.into(),
            out_dir: out_dir.into(),
            artifact_suffix: artifact_suffix.into(),
        }
    }

    pub fn dependency_root(&self) -> &Path {
        &self.dependency_root
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Full on-disk directory of the package sources
    pub fn package_dir(&self, source: &GrammarSource) -> PathBuf {
        if source.is_dependency() {
            self.dependency_root.join(source.identifier())
        } else {
            PathBuf::from(source.identifier())
        }
    }

    /// Where a local package is copied so it resolves like a dependency
    pub fn staging_dir(&self, source: &GrammarSource) -> PathBuf {
        self.dependency_root.join(source.base_name())
    }

    /// Derived artifact file name, keyed in the registry
    pub fn artifact_name(&self, source: &GrammarSource) -> String {
        wasm_name_with_suffix(source.identifier(), &self.artifact_suffix)
    }

    /// Location of an artifact shipped with the package itself
    pub fn prebuilt_artifact_path(&self, source: &GrammarSource) -> PathBuf {
        let name = self.artifact_name(source);
        if source.is_dependency() {
            self.dependency_root.join(source.identifier()).join(name)
        } else {
            Path::new(source.identifier())
                .join(LOCAL_PREBUILT_DIR)
                .join(name)
        }
    }

    /// Compiled output path for a grammar name
    pub fn output_path(&self, grammar_name: &str) -> PathBuf {
        self.out_dir.join(output_file_name(grammar_name))
    }

    /// Installed glue-code file for a package base name
    pub fn glue_path(&self, base_name: &str) -> PathBuf {
        self.dependency_root
            .join(base_name)
            .join(glue_file_name(base_name))
    }
}

impl Default for PathResolver {
    fn default() -> Self {
        Self::new(
            DEFAULT_DEPENDENCY_ROOT,
            "dist/assets",
            DEFAULT_ARTIFACT_SUFFIX,
        )
    }
}
