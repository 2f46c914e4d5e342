//! Compiler Invoker
//!
//! Builds the emscripten command line for one grammar and runs it through
//! the `ProcessRunner` port. Flags follow the tree-sitter CLI's wasm build.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::domain::ports::{FileSystem, ProcessRunner, ProcessSpec};
use crate::domain::value_objects::ContentHash;

/// Linear memory size of the side module, in bytes
const TOTAL_MEMORY: u64 = 33_554_432;

/// Environment variables hidden from the compiler
///
/// emsdk honours a legacy `NODE` variable and warns when it is set.
const REMOVED_ENV: &[&str] = &["NODE"];

/// Optional external scanner sources, highest priority first
///
/// The flag marks C++ sources; plain C needs none.
const SCANNERS: &[(&str, Option<&str>)] = &[
    ("scanner.cc", Some("-xc++")),
    ("scanner.cpp", Some("-xc++")),
    ("scanner.c", None),
];

/// Inputs for one compiler invocation
#[derive(Debug, Clone)]
pub struct CompileRequest<'a> {
    /// Package directory containing `src/parser.c`
    pub package_dir: &'a Path,
    /// Grammar name (`json` for `tree-sitter-json`)
    pub grammar_name: &'a str,
    /// Artifact to produce
    pub output: &'a Path,
    /// Passed to `--cache` when set
    pub cache_dir: Option<&'a Path>,
}

/// How the compiler process ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum ExitStatus {
    Code(i32),
    /// The program is not on the command search path
    NotFound,
    /// Killed by a signal, no exit code
    Terminated,
    /// The program exists but could not be started (permissions, bad binary)
    SpawnFailed(String),
}

/// Captured outcome of a compiler run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileResult {
    pub exit_status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl CompileResult {
    pub fn succeeded(&self) -> bool {
        self.exit_status == ExitStatus::Code(0)
    }
}

/// Exported symbol of a grammar's language function
pub fn exported_symbol(grammar_name: &str) -> String {
    format!("_tree_sitter_{}", grammar_name.replace('-', "_"))
}

fn display(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

/// Runs the external WebAssembly compiler
pub struct CompilerInvoker<'a, FS: FileSystem, PR: ProcessRunner> {
    fs: &'a FS,
    runner: &'a PR,
    program: &'a str,
}

impl<'a, FS: FileSystem, PR: ProcessRunner> CompilerInvoker<'a, FS, PR> {
    pub fn new(fs: &'a FS, runner: &'a PR, program: &'a str) -> Self {
        Self { fs, runner, program }
    }

    /// Source files passed to the compiler, each with its optional language flag
    pub fn sources(&self, package_dir: &Path) -> Vec<(PathBuf, Option<&'static str>)> {
        let src = package_dir.join("src");
        let mut sources = vec![(src.join("parser.c"), None)];
        if let Some((path, flag)) = SCANNERS
            .iter()
            .map(|(name, flag)| (src.join(name), *flag))
            .find(|(path, _)| self.fs.exists(path))
        {
            sources.push((path, flag));
        }
        sources
    }

    /// Full process description for a request
    pub fn spec(&self, request: &CompileRequest<'_>) -> ProcessSpec {
        let src = request.package_dir.join("src");
        let mut spec = ProcessSpec::new(self.program)
            .args(["-v", "-Os", "-fno-exceptions"])
            .args(["-s", "WASM=1"])
            .args(["-s", "SIDE_MODULE=2"])
            .arg("-s")
            .arg(format!("TOTAL_MEMORY={}", TOTAL_MEMORY))
            .args(["-s", "NODEJS_CATCH_EXIT=0"])
            .args(["-s", "NODEJS_CATCH_REJECTION=0"])
            .arg("-s")
            .arg(format!(
                "EXPORTED_FUNCTIONS=[\"{}\"]",
                exported_symbol(request.grammar_name)
            ))
            .arg("-o")
            .arg(display(request.output))
            .arg("-I")
            .arg(display(&src));

        for (path, flag) in self.sources(request.package_dir) {
            if let Some(flag) = flag {
                spec = spec.arg(flag);
            }
            spec = spec.arg(display(&path));
        }

        if let Some(cache_dir) = request.cache_dir {
            spec = spec.arg("--cache").arg(display(cache_dir));
        }

        for key in REMOVED_ENV {
            spec = spec.env_remove(*key);
        }
        spec
    }

    /// Fingerprint of everything that determines the artifact
    ///
    /// Covers the command line and the bytes of every source file.
    /// `None` when a source cannot be read.
    pub fn fingerprint(&self, request: &CompileRequest<'_>) -> Option<ContentHash> {
        let command_line = self.spec(request).command_line();
        let mut contents = Vec::new();
        for (path, _) in self.sources(request.package_dir) {
            let bytes = self.fs.read_bytes(&path).ok()?;
            contents.push((display(&path), bytes));
        }

        let parts = std::iter::once(("command", command_line.as_bytes())).chain(
            contents
                .iter()
                .map(|(label, bytes)| (label.as_str(), bytes.as_slice())),
        );
        Some(ContentHash::from_parts(parts))
    }

    /// Run the compiler synchronously to completion
    pub fn invoke(&self, request: &CompileRequest<'_>) -> CompileResult {
        let spec = self.spec(request);
        tracing::debug!(command = %spec.command_line(), "spawning compiler");

        match self.runner.run(&spec) {
            Ok(output) => CompileResult {
                exit_status: output
                    .code
                    .map(ExitStatus::Code)
                    .unwrap_or(ExitStatus::Terminated),
                stdout: output.stdout,
                stderr: output.stderr,
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => CompileResult {
                exit_status: ExitStatus::NotFound,
                stdout: String::new(),
                stderr: err.to_string(),
            },
            Err(err) => CompileResult {
                exit_status: ExitStatus::SpawnFailed(err.to_string()),
                stdout: String::new(),
                stderr: err.to_string(),
            },
        }
    }
}
