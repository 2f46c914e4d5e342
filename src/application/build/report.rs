//! Build Report
//!
//! Per-package outcome of one build run.

use std::path::PathBuf;

use serde::Serialize;

use crate::domain::value_objects::{GrammarSource, PackageKind};

/// Why a package produced no fresh artifact
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum BuildFailure {
    /// Base name is not `tree-sitter-<name>`
    InvalidGrammarName,
    /// Package directory does not exist
    SourceMissing,
    /// Compiler exited with a non-zero code
    CompilerExited { code: i32 },
    /// Compiler program is not on the search path
    CompilerNotFound,
    /// Compiler was killed by a signal
    CompilerTerminated,
    /// Compiler could not be started
    CompilerSpawnFailed { message: String },
    /// Compiler reported success but wrote no output
    OutputMissing,
}

impl std::fmt::Display for BuildFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuildFailure::InvalidGrammarName => write!(f, "invalid grammar name"),
            BuildFailure::SourceMissing => write!(f, "source directory missing"),
            BuildFailure::CompilerExited { code } => write!(f, "compiler exited with code {}", code),
            BuildFailure::CompilerNotFound => write!(f, "compiler not found"),
            BuildFailure::CompilerTerminated => write!(f, "compiler terminated"),
            BuildFailure::CompilerSpawnFailed { message } => {
                write!(f, "cannot start compiler: {}", message)
            }
            BuildFailure::OutputMissing => write!(f, "output file missing"),
        }
    }
}

/// Lifecycle of one package within a build
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PackageState {
    Unstaged,
    Staged,
    /// Output already up to date, compiler not invoked
    Skipped,
    Compiling,
    Compiled,
    Failed { failure: BuildFailure },
}

/// Outcome for one package
#[derive(Debug, Clone, Serialize)]
pub struct PackageReport {
    pub package: String,
    pub kind: PackageKind,
    pub grammar_name: Option<String>,
    /// Expected artifact location, registered even on failure
    pub output: Option<PathBuf>,
    pub state: PackageState,
    /// Non-fatal problems (missing source, failed staging copy)
    pub warnings: Vec<String>,
}

impl PackageReport {
    pub fn new(source: &GrammarSource) -> Self {
        Self {
            package: source.identifier().to_string(),
            kind: source.kind(),
            grammar_name: None,
            output: None,
            state: PackageState::Unstaged,
            warnings: Vec::new(),
        }
    }

    pub(crate) fn transition(&mut self, state: PackageState) {
        tracing::debug!(package = %self.package, from = ?self.state, to = ?state, "package state");
        self.state = state;
    }

    pub(crate) fn fail(&mut self, failure: BuildFailure) {
        self.transition(PackageState::Failed { failure });
    }

    pub fn failure(&self) -> Option<&BuildFailure> {
        match &self.state {
            PackageState::Failed { failure } => Some(failure),
            _ => None,
        }
    }
}

/// Result of a build run
#[derive(Debug, Clone, Default, Serialize)]
pub struct BuildReport {
    pub packages: Vec<PackageReport>,
}

impl BuildReport {
    fn count(&self, pred: impl Fn(&PackageState) -> bool) -> usize {
        self.packages.iter().filter(|p| pred(&p.state)).count()
    }

    pub fn compiled(&self) -> usize {
        self.count(|s| *s == PackageState::Compiled)
    }

    pub fn skipped(&self) -> usize {
        self.count(|s| *s == PackageState::Skipped)
    }

    pub fn failed(&self) -> usize {
        self.count(|s| matches!(s, PackageState::Failed { .. }))
    }

    pub fn has_failures(&self) -> bool {
        self.failed() > 0
    }

    pub fn get(&self, package: &str) -> Option<&PackageReport> {
        self.packages.iter().find(|p| p.package == package)
    }
}
