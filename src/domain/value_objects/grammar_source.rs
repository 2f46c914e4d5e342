//! Grammar Source Value Object
//!
//! One configured grammar package: either an installed dependency
//! (`tree-sitter-javascript`) or a local directory (`./grammars/tree-sitter-html`).

use std::fmt;
use std::path::Path;

use serde::Serialize;

use crate::error::{ForgeError, ForgeResult};

/// Where a grammar package comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageKind {
    /// A directory inside or outside the project, given by path
    Local,
    /// A package installed under the dependency root
    Dependency,
}

impl PackageKind {
    /// Classify an identifier by its prefix
    ///
    /// `./`, `../` and `/` mark local paths; everything else is a dependency name.
    pub fn classify(identifier: &str) -> Self {
        if identifier.starts_with("./") || identifier.starts_with("../") || identifier.starts_with('/')
        {
            PackageKind::Local
        } else {
            PackageKind::Dependency
        }
    }
}

/// A configured grammar package identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct GrammarSource {
    identifier: String,
    kind: PackageKind,
}

impl GrammarSource {
    /// Create a grammar source, rejecting identifiers without a base name
    pub fn new(identifier: impl Into<String>) -> ForgeResult<Self> {
        let identifier = identifier.into();
        let has_base_name = Path::new(&identifier)
            .file_name()
            .map(|n| !n.is_empty())
            .unwrap_or(false);
        if identifier.trim().is_empty() || !has_base_name {
            return Err(ForgeError::InvalidPackage { identifier });
        }
        let kind = PackageKind::classify(&identifier);
        Ok(Self { identifier, kind })
    }

    /// The identifier exactly as configured
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn kind(&self) -> PackageKind {
        self.kind
    }

    pub fn is_dependency(&self) -> bool {
        self.kind == PackageKind::Dependency
    }

    /// Final path segment (`../x/tree-sitter-go` -> `tree-sitter-go`)
    pub fn base_name(&self) -> &str {
        Path::new(&self.identifier)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(&self.identifier)
    }
}

impl fmt::Display for GrammarSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.identifier)
    }
}
