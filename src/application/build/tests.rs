//! Build Use Case Tests

use super::*;
use crate::config::CachePolicy;
use crate::domain::entities::{ArtifactRegistry, FINGERPRINT_LOCK_FILE};
use crate::domain::ports::{FileSystem, FingerprintRepository, ProcessOutput, ProcessRunner, ProcessSpec};
use crate::domain::services::PathResolver;
use crate::domain::value_objects::GrammarSource;
use crate::infrastructure::fs::MemoryFs;
use crate::infrastructure::repositories::TomlFingerprintRepository;
use std::cell::RefCell;
use std::path::{Path, PathBuf};

// Mock implementations for testing

/// Records every spec; optionally writes the `-o` output like a real compiler
struct MockCompiler {
    fs: MemoryFs,
    calls: RefCell<Vec<ProcessSpec>>,
    code: Option<i32>,
    writes_output: bool,
    spawn_error: Option<std::io::ErrorKind>,
}

impl MockCompiler {
    fn succeeding(fs: &MemoryFs) -> Self {
        Self {
            fs: fs.clone(),
            calls: RefCell::new(Vec::new()),
            code: Some(0),
            writes_output: true,
            spawn_error: None,
        }
    }

    fn exiting(fs: &MemoryFs, code: i32) -> Self {
        Self {
            code: Some(code),
            writes_output: false,
            ..Self::succeeding(fs)
        }
    }

    fn silent(fs: &MemoryFs) -> Self {
        Self {
            writes_output: false,
            ..Self::succeeding(fs)
        }
    }

    fn unspawnable(fs: &MemoryFs, kind: std::io::ErrorKind) -> Self {
        Self {
            spawn_error: Some(kind),
            ..Self::succeeding(fs)
        }
    }

    fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl ProcessRunner for MockCompiler {
    fn run(&self, spec: &ProcessSpec) -> std::io::Result<ProcessOutput> {
        self.calls.borrow_mut().push(spec.clone());
        if let Some(kind) = self.spawn_error {
            return Err(std::io::Error::new(kind, "cannot execute emcc"));
        }
        if self.writes_output {
            if let Some(pos) = spec.args.iter().position(|a| a == "-o") {
                self.fs.insert(&spec.args[pos + 1], b"\0asm\x01\0\0\0");
            }
        }
        Ok(ProcessOutput {
            code: self.code,
            stdout: "emcc (Emscripten) 3.1.0".to_string(),
            stderr: String::new(),
        })
    }
}

fn sources(ids: &[&str]) -> Vec<GrammarSource> {
    ids.iter().map(|id| GrammarSource::new(*id).unwrap()).collect()
}

fn fs_with_json() -> MemoryFs {
    MemoryFs::new().with_file("node_modules/tree-sitter-json/src/parser.c", "int json;")
}

fn run(
    fs: &MemoryFs,
    compiler: &MockCompiler,
    options: BuildOptions,
    ids: &[&str],
) -> (BuildReport, ArtifactRegistry) {
    let resolver = PathResolver::default();
    let sources = sources(ids);
    let mut registry = ArtifactRegistry::seeded(&resolver, &sources);
    let use_case = BuildUseCase::new(
        fs.clone(),
        compiler,
        TomlFingerprintRepository::new(fs.clone()),
        resolver,
        options,
    );
    let report = use_case.execute(&sources, &mut registry);
    (report, registry)
}

// === Scenarios ===

#[test]
fn fresh_build_compiles_and_registers() {
    let fs = fs_with_json();
    let compiler = MockCompiler::succeeding(&fs);

    let (report, registry) = run(&fs, &compiler, BuildOptions::default(), &["tree-sitter-json"]);

    assert_eq!(compiler.call_count(), 1);
    assert_eq!(report.compiled(), 1);
    let package = report.get("tree-sitter-json").unwrap();
    assert_eq!(package.state, PackageState::Compiled);
    assert_eq!(package.grammar_name.as_deref(), Some("json"));

    let entry = registry.get("tree_sitter_json_bg.wasm").unwrap();
    assert_eq!(entry.source_path(), Path::new("dist/assets/tree-sitter-json.wasm"));
    assert!(entry.is_dependency());
    assert!(fs.exists(Path::new("dist/assets/tree-sitter-json.wasm")));
}

#[test]
fn output_is_also_registered_under_its_file_name() {
    let fs = fs_with_json();
    let compiler = MockCompiler::succeeding(&fs);

    let (_, registry) = run(&fs, &compiler, BuildOptions::default(), &["tree-sitter-json"]);

    let entry = registry.get("tree-sitter-json.wasm").unwrap();
    assert_eq!(entry.source_path(), Path::new("dist/assets/tree-sitter-json.wasm"));
}

#[test]
fn existing_output_skips_compiler_and_still_registers() {
    let fs = fs_with_json().with_file("dist/assets/tree-sitter-json.wasm", "old");
    let compiler = MockCompiler::succeeding(&fs);

    let (report, registry) = run(&fs, &compiler, BuildOptions::default(), &["tree-sitter-json"]);

    assert_eq!(compiler.call_count(), 0);
    assert_eq!(report.skipped(), 1);
    assert_eq!(
        registry.get("tree_sitter_json_bg.wasm").unwrap().source_path(),
        Path::new("dist/assets/tree-sitter-json.wasm")
    );
}

#[test]
fn always_rebuild_invokes_compiler_over_existing_output() {
    let fs = fs_with_json().with_file("dist/assets/tree-sitter-json.wasm", "old");
    let compiler = MockCompiler::succeeding(&fs);
    let options = BuildOptions::default().with_always_rebuild(true);

    let (report, _) = run(&fs, &compiler, options, &["tree-sitter-json"]);

    assert_eq!(compiler.call_count(), 1);
    assert_eq!(report.compiled(), 1);
}

#[test]
fn compiler_exit_code_fails_package_but_registers_expected_path() {
    let fs = fs_with_json();
    let compiler = MockCompiler::exiting(&fs, 1);

    let (report, registry) = run(&fs, &compiler, BuildOptions::default(), &["tree-sitter-json"]);

    assert_eq!(
        report.get("tree-sitter-json").unwrap().failure(),
        Some(&BuildFailure::CompilerExited { code: 1 })
    );
    let entry = registry.get("tree_sitter_json_bg.wasm").unwrap();
    assert_eq!(entry.source_path(), Path::new("dist/assets/tree-sitter-json.wasm"));
    assert!(!fs.exists(entry.source_path()));
}

#[test]
fn failure_does_not_stop_remaining_packages() {
    let fs = fs_with_json().with_file("node_modules/tree-sitter-c/src/parser.c", "int c;");
    let compiler = MockCompiler::exiting(&fs, 2);

    let (report, _) = run(
        &fs,
        &compiler,
        BuildOptions::default(),
        &["tree-sitter-json", "tree-sitter-c"],
    );

    assert_eq!(compiler.call_count(), 2);
    assert_eq!(report.failed(), 2);
}

#[test]
fn missing_compiler_is_reported_distinctly() {
    let fs = fs_with_json();
    let compiler = MockCompiler::unspawnable(&fs, std::io::ErrorKind::NotFound);

    let (report, _) = run(&fs, &compiler, BuildOptions::default(), &["tree-sitter-json"]);

    assert_eq!(
        report.get("tree-sitter-json").unwrap().failure(),
        Some(&BuildFailure::CompilerNotFound)
    );
}

#[test]
fn success_without_output_is_output_missing() {
    let fs = fs_with_json();
    let compiler = MockCompiler::silent(&fs);

    let (report, _) = run(&fs, &compiler, BuildOptions::default(), &["tree-sitter-json"]);

    assert_eq!(
        report.get("tree-sitter-json").unwrap().failure(),
        Some(&BuildFailure::OutputMissing)
    );
}

#[test]
fn terminated_compiler_has_no_exit_code() {
    let fs = fs_with_json();
    let compiler = MockCompiler {
        code: None,
        ..MockCompiler::silent(&fs)
    };

    let (report, _) = run(&fs, &compiler, BuildOptions::default(), &["tree-sitter-json"]);

    assert_eq!(
        report.get("tree-sitter-json").unwrap().failure(),
        Some(&BuildFailure::CompilerTerminated)
    );
}

#[test]
fn unstartable_compiler_keeps_the_spawn_error() {
    let fs = fs_with_json();
    let compiler = MockCompiler::unspawnable(&fs, std::io::ErrorKind::PermissionDenied);

    let (report, registry) = run(&fs, &compiler, BuildOptions::default(), &["tree-sitter-json"]);

    assert_eq!(
        report.get("tree-sitter-json").unwrap().failure(),
        Some(&BuildFailure::CompilerSpawnFailed {
            message: "cannot execute emcc".to_string()
        })
    );
    assert!(registry.contains("tree-sitter-json.wasm"));
}

// === Staging ===

#[test]
fn invalid_grammar_name_registers_nothing() {
    let fs = MemoryFs::new().with_file("node_modules/json-grammar/src/parser.c", "x");
    let compiler = MockCompiler::succeeding(&fs);

    let (report, registry) = run(&fs, &compiler, BuildOptions::default(), &["json-grammar"]);

    assert_eq!(compiler.call_count(), 0);
    let package = report.get("json-grammar").unwrap();
    assert_eq!(package.failure(), Some(&BuildFailure::InvalidGrammarName));
    assert!(package.output.is_none());
    // Only the seeded prebuilt entry and the runtime remain
    assert_eq!(
        registry.get("json_grammar_bg.wasm").unwrap().source_path(),
        Path::new("node_modules/json-grammar/json_grammar_bg.wasm")
    );
    assert_eq!(registry.len(), 2);
}

#[test]
fn missing_source_fails_without_spawning() {
    let fs = MemoryFs::new();
    let compiler = MockCompiler::succeeding(&fs);

    let (report, registry) = run(&fs, &compiler, BuildOptions::default(), &["tree-sitter-json"]);

    assert_eq!(compiler.call_count(), 0);
    let package = report.get("tree-sitter-json").unwrap();
    assert_eq!(package.failure(), Some(&BuildFailure::SourceMissing));
    assert_eq!(package.warnings.len(), 1);
    assert!(registry.contains("tree-sitter-json.wasm"));
}

#[test]
fn missing_source_with_existing_output_is_skipped() {
    let fs = MemoryFs::new().with_file("dist/assets/tree-sitter-json.wasm", "old");
    let compiler = MockCompiler::succeeding(&fs);

    let (report, _) = run(&fs, &compiler, BuildOptions::default(), &["tree-sitter-json"]);

    assert_eq!(report.skipped(), 1);
}

#[test]
fn local_package_is_staged_under_dependency_root() {
    let fs = MemoryFs::new()
        .with_file("./grammars/tree-sitter-html/src/parser.c", "int html;")
        .with_file("./grammars/tree-sitter-html/src/scanner.cc", "// scanner");
    let compiler = MockCompiler::succeeding(&fs);

    let (report, registry) = run(
        &fs,
        &compiler,
        BuildOptions::default(),
        &["./grammars/tree-sitter-html"],
    );

    assert_eq!(report.compiled(), 1);
    assert_eq!(
        fs.read_to_string(Path::new("node_modules/tree-sitter-html/src/scanner.cc"))
            .unwrap(),
        "// scanner"
    );
    let entry = registry.get("tree_sitter_html_bg.wasm").unwrap();
    assert!(!entry.is_dependency());
    assert_eq!(entry.source_path(), Path::new("dist/assets/tree-sitter-html.wasm"));

    let spec = &compiler.calls.borrow()[0];
    assert!(spec.args.contains(&"-xc++".to_string()));
}

#[test]
fn local_package_inside_dependency_root_is_compiled_in_place() {
    let fs = MemoryFs::new().with_file("./node_modules/tree-sitter-x/src/parser.c", "int x;");
    let compiler = MockCompiler::succeeding(&fs);

    let (report, _) = run(
        &fs,
        &compiler,
        BuildOptions::default(),
        &["./node_modules/tree-sitter-x"],
    );

    let package = report.get("./node_modules/tree-sitter-x").unwrap();
    assert_eq!(package.state, PackageState::Compiled);
    assert!(package.warnings.is_empty());
    assert_eq!(
        fs.read_to_string(Path::new("./node_modules/tree-sitter-x/src/parser.c"))
            .unwrap(),
        "int x;"
    );
    let spec = &compiler.calls.borrow()[0];
    assert!(spec
        .args
        .contains(&"./node_modules/tree-sitter-x/src/parser.c".to_string()));
}

#[test]
fn local_packages_build_before_dependencies() {
    let fs = fs_with_json().with_file("./grammars/tree-sitter-html/src/parser.c", "int html;");
    let compiler = MockCompiler::succeeding(&fs);

    let (report, _) = run(
        &fs,
        &compiler,
        BuildOptions::default(),
        &["tree-sitter-json", "./grammars/tree-sitter-html"],
    );

    let order: Vec<&str> = report.packages.iter().map(|p| p.package.as_str()).collect();
    assert_eq!(order, vec!["./grammars/tree-sitter-html", "tree-sitter-json"]);

    let outputs: Vec<PathBuf> = compiler
        .calls
        .borrow()
        .iter()
        .filter_map(|spec| {
            let pos = spec.args.iter().position(|a| a == "-o")?;
            Some(PathBuf::from(&spec.args[pos + 1]))
        })
        .collect();
    assert_eq!(
        outputs,
        vec![
            PathBuf::from("dist/assets/tree-sitter-html.wasm"),
            PathBuf::from("dist/assets/tree-sitter-json.wasm"),
        ]
    );
}

#[test]
fn collision_keeps_last_registration() {
    let fs = fs_with_json().with_file("./vendor/tree-sitter-json/src/parser.c", "int other;");
    let compiler = MockCompiler::succeeding(&fs);

    let (report, registry) = run(
        &fs,
        &compiler,
        BuildOptions::default(),
        &["tree-sitter-json", "./vendor/tree-sitter-json"],
    );

    // The dependency is built after the local package and wins
    assert!(registry.get("tree_sitter_json_bg.wasm").unwrap().is_dependency());

    assert!(report.get("./vendor/tree-sitter-json").unwrap().warnings.is_empty());
    let warnings = &report.get("tree-sitter-json").unwrap().warnings;
    assert_eq!(warnings.len(), 2);
    assert!(warnings.iter().all(|w| {
        w.starts_with("artifact name collision") && w.contains("./vendor/tree-sitter-json")
    }));
}

#[test]
fn cache_dir_is_passed_to_compiler() {
    let fs = fs_with_json();
    let compiler = MockCompiler::succeeding(&fs);
    let options = BuildOptions {
        cache_dir: Some(PathBuf::from("/tmp/emcache")),
        ..BuildOptions::default()
    };

    run(&fs, &compiler, options, &["tree-sitter-json"]);

    let spec = &compiler.calls.borrow()[0];
    let tail: Vec<&str> = spec.args.iter().rev().take(2).map(String::as_str).collect();
    assert_eq!(tail, vec!["/tmp/emcache", "--cache"]);
}

// === Fingerprint policy ===

fn fingerprint_options() -> BuildOptions {
    BuildOptions {
        cache_policy: CachePolicy::Fingerprint,
        ..BuildOptions::default()
    }
}

#[test]
fn fingerprint_policy_records_lock_after_compile() {
    let fs = fs_with_json();
    let compiler = MockCompiler::succeeding(&fs);

    run(&fs, &compiler, fingerprint_options(), &["tree-sitter-json"]);

    let lock_path = Path::new("dist/assets").join(FINGERPRINT_LOCK_FILE);
    let lock = TomlFingerprintRepository::new(fs.clone())
        .load(&lock_path)
        .unwrap();
    assert!(lock.get("tree-sitter-json.wasm").is_some());
}

#[test]
fn fingerprint_policy_skips_unchanged_sources() {
    let fs = fs_with_json();
    let first = MockCompiler::succeeding(&fs);
    run(&fs, &first, fingerprint_options(), &["tree-sitter-json"]);

    let second = MockCompiler::succeeding(&fs);
    let (report, _) = run(&fs, &second, fingerprint_options(), &["tree-sitter-json"]);

    assert_eq!(second.call_count(), 0);
    assert_eq!(report.skipped(), 1);
}

#[test]
fn fingerprint_policy_rebuilds_changed_sources() {
    let fs = fs_with_json();
    let first = MockCompiler::succeeding(&fs);
    run(&fs, &first, fingerprint_options(), &["tree-sitter-json"]);

    fs.insert("node_modules/tree-sitter-json/src/parser.c", "int json2;");
    let second = MockCompiler::succeeding(&fs);
    let (report, _) = run(&fs, &second, fingerprint_options(), &["tree-sitter-json"]);

    assert_eq!(second.call_count(), 1);
    assert_eq!(report.compiled(), 1);
}

#[test]
fn fingerprint_policy_rebuilds_output_without_record() {
    let fs = fs_with_json().with_file("dist/assets/tree-sitter-json.wasm", "old");
    let compiler = MockCompiler::succeeding(&fs);

    let (report, _) = run(&fs, &compiler, fingerprint_options(), &["tree-sitter-json"]);

    assert_eq!(compiler.call_count(), 1);
    assert_eq!(report.compiled(), 1);
}

#[test]
fn exists_policy_writes_no_lock() {
    let fs = fs_with_json();
    let compiler = MockCompiler::succeeding(&fs);

    run(&fs, &compiler, BuildOptions::default(), &["tree-sitter-json"]);

    assert!(!fs.exists(&Path::new("dist/assets").join(FINGERPRINT_LOCK_FILE)));
}
