//! Artifact Entry
//!
//! One servable WebAssembly binary, keyed by file name in the registry.

use std::path::{Path, PathBuf};

use serde::Serialize;

/// A registered artifact
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactEntry {
    file_name: String,
    source_path: PathBuf,
    is_dependency: bool,
}

impl ArtifactEntry {
    pub fn new(
        file_name: impl Into<String>,
        source_path: impl Into<PathBuf>,
        is_dependency: bool,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            source_path: source_path.into(),
            is_dependency,
        }
    }

    /// Same artifact under another registry key
    pub fn renamed(&self, file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            ..self.clone()
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Resolved file the artifact bytes are read from
    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    pub fn is_dependency(&self) -> bool {
        self.is_dependency
    }
}
