//! Artifact Registry
//!
//! Maps artifact file names to their location on disk. Written by the build,
//! then frozen and shared read-only with the module loader and the dev server.
//!
//! File names are unique keys: a later registration replaces an earlier one.

use std::collections::BTreeMap;

use crate::domain::services::PathResolver;
use crate::domain::value_objects::GrammarSource;

use super::ArtifactEntry;

/// File name of the tree-sitter web runtime
pub const RUNTIME_ARTIFACT: &str = "tree-sitter.wasm";

/// Dependency that ships the tree-sitter web runtime
pub const RUNTIME_PACKAGE: &str = "web-tree-sitter";

/// Registry of servable artifacts
#[derive(Debug, Clone, Default)]
pub struct ArtifactRegistry {
    entries: BTreeMap<String, ArtifactEntry>,
}

impl ArtifactRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the statically known artifacts
    ///
    /// Contains the web runtime plus, for every package, the artifact the
    /// package itself may ship (`<local>/pkg/...` or `<dependency_root>/<dep>/...`).
    pub fn seeded(resolver: &PathResolver, sources: &[GrammarSource]) -> Self {
        let mut registry = Self::new();
        registry.register(ArtifactEntry::new(
            RUNTIME_ARTIFACT,
            resolver
                .dependency_root()
                .join(RUNTIME_PACKAGE)
                .join(RUNTIME_ARTIFACT),
            true,
        ));

        let (local, dependencies): (Vec<_>, Vec<_>) =
            sources.iter().partition(|s| !s.is_dependency());
        for source in local.into_iter().chain(dependencies) {
            registry.register(ArtifactEntry::new(
                resolver.artifact_name(source),
                resolver.prebuilt_artifact_path(source),
                source.is_dependency(),
            ));
        }
        registry
    }

    /// Insert or replace an entry, returning the replaced one
    pub fn register(&mut self, entry: ArtifactEntry) -> Option<ArtifactEntry> {
        self.entries.insert(entry.file_name().to_string(), entry)
    }

    /// Exact file-name lookup
    pub fn get(&self, file_name: &str) -> Option<&ArtifactEntry> {
        self.entries.get(file_name)
    }

    pub fn contains(&self, file_name: &str) -> bool {
        self.entries.contains_key(file_name)
    }

    /// Entries ordered by file name
    pub fn iter(&self) -> impl Iterator<Item = &ArtifactEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
