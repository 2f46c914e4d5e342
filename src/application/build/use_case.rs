//! Build Use Case
//!
//! Runs once at build start. For every configured grammar package:
//! 1. Parse the grammar name from the package base name
//! 2. Stage the package (local packages are copied under the dependency root)
//! 3. Decide whether the artifact needs a rebuild
//! 4. Invoke the compiler if so
//! 5. Register the expected artifact path
//!
//! Packages are independent: a failure is logged and recorded in the
//! report, and the build moves on to the next package.

use std::collections::HashMap;
use std::path::Path;

use chrono::Utc;
use tracing::{error, info, warn};

use crate::config::CachePolicy;
use crate::domain::entities::{
    ArtifactEntry, ArtifactRegistry, FingerprintEntry, FingerprintLock, FINGERPRINT_LOCK_FILE,
};
use crate::domain::ports::{FileSystem, FingerprintRepository, FsError, ProcessRunner};
use crate::domain::services::{grammar_name_of, output_file_name, PathResolver};
use crate::domain::value_objects::GrammarSource;

use super::compile::{CompileRequest, CompileResult, CompilerInvoker, ExitStatus};
use super::options::BuildOptions;
use super::report::{BuildFailure, BuildReport, PackageReport, PackageState};

/// Build use case - compiles grammar packages and fills the registry
///
/// Parameterized by its ports so tests can run it without a disk or a compiler.
pub struct BuildUseCase<FS, PR, FR>
where
    FS: FileSystem,
    PR: ProcessRunner,
    FR: FingerprintRepository,
{
    fs: FS,
    runner: PR,
    fingerprints: FR,
    resolver: PathResolver,
    options: BuildOptions,
}

impl<FS, PR, FR> BuildUseCase<FS, PR, FR>
where
    FS: FileSystem,
    PR: ProcessRunner,
    FR: FingerprintRepository,
{
    pub fn new(
        fs: FS,
        runner: PR,
        fingerprints: FR,
        resolver: PathResolver,
        options: BuildOptions,
    ) -> Self {
        Self {
            fs,
            runner,
            fingerprints,
            resolver,
            options,
        }
    }

    pub fn resolver(&self) -> &PathResolver {
        &self.resolver
    }

    /// Build every package, local packages first, each group in configuration order
    pub fn execute(&self, sources: &[GrammarSource], registry: &mut ArtifactRegistry) -> BuildReport {
        let lock_path = self.resolver.out_dir().join(FINGERPRINT_LOCK_FILE);
        let use_fingerprints = self.options.cache_policy == CachePolicy::Fingerprint;
        let mut lock = if use_fingerprints {
            self.load_lock(&lock_path)
        } else {
            FingerprintLock::new()
        };
        let lock_before = lock.clone();

        let mut owners: HashMap<String, String> = HashMap::new();
        let ordered = sources
            .iter()
            .filter(|s| !s.is_dependency())
            .chain(sources.iter().filter(|s| s.is_dependency()));

        let mut report = BuildReport::default();
        for source in ordered {
            let package = self.build_package(source, &mut lock, registry, &mut owners);
            report.packages.push(package);
        }

        if use_fingerprints && lock != lock_before {
            if let Err(e) = self.fingerprints.save(&lock, &lock_path) {
                warn!("failed to save fingerprint lock {}: {}", lock_path.display(), e);
            }
        }

        info!(
            compiled = report.compiled(),
            skipped = report.skipped(),
            failed = report.failed(),
            "build finished"
        );
        report
    }

    fn load_lock(&self, path: &Path) -> FingerprintLock {
        match self.fingerprints.load(path) {
            Ok(lock) => lock,
            Err(e) => {
                warn!(
                    "ignoring unreadable fingerprint lock {}: {}",
                    path.display(),
                    e
                );
                FingerprintLock::new()
            }
        }
    }

    fn build_package(
        &self,
        source: &GrammarSource,
        lock: &mut FingerprintLock,
        registry: &mut ArtifactRegistry,
        owners: &mut HashMap<String, String>,
    ) -> PackageReport {
        let mut report = PackageReport::new(source);

        let grammar_name = match grammar_name_of(source.base_name()) {
            Ok(name) => name,
            Err(e) => {
                error!("{}", e);
                report.fail(BuildFailure::InvalidGrammarName);
                return report;
            }
        };
        report.grammar_name = Some(grammar_name.clone());

        let package_dir = self.resolver.package_dir(source);
        let source_present = self.stage(source, &package_dir, &mut report);

        let output = self.resolver.output_path(&grammar_name);
        report.output = Some(output.clone());

        let request = CompileRequest {
            package_dir: &package_dir,
            grammar_name: &grammar_name,
            output: &output,
            cache_dir: self.options.cache_dir.as_deref(),
        };
        let invoker = CompilerInvoker::new(&self.fs, &self.runner, &self.options.compiler);
        let artifact = output_file_name(&grammar_name);

        if !self.needs_rebuild(&invoker, &request, &artifact, lock) {
            info!("Skipped build of '{}': output already exists", artifact);
            info!("To force a rebuild, delete the output file(s) or set 'always_rebuild'");
            report.transition(PackageState::Skipped);
        } else if !source_present {
            report.fail(BuildFailure::SourceMissing);
        } else {
            report.transition(PackageState::Compiling);
            info!(
                "compile {} -> {}",
                package_dir.display(),
                output.display()
            );
            let result = invoker.invoke(&request);
            match self.check_result(&result, &output) {
                Ok(()) => {
                    if self.options.cache_policy == CachePolicy::Fingerprint {
                        if let Some(hash) = invoker.fingerprint(&request) {
                            lock.record(artifact.clone(), FingerprintEntry::new(hash, Utc::now()));
                        }
                    }
                    report.transition(PackageState::Compiled);
                }
                Err(failure) => report.fail(failure),
            }
        }

        self.register(source, &output, registry, owners, &mut report);
        report
    }

    /// Verify the package directory and copy local packages under the dependency root
    ///
    /// Returns whether the package sources exist.
    fn stage(&self, source: &GrammarSource, package_dir: &Path, report: &mut PackageReport) -> bool {
        let present = self.fs.is_dir(package_dir);
        if !present {
            let origin = if source.is_dependency() {
                "dependency"
            } else {
                "local"
            };
            let message = format!("cannot find {} package {}", origin, package_dir.display());
            error!("{}", message);
            report.warnings.push(message);
        }

        if present && !source.is_dependency() {
            let staging = self.resolver.staging_dir(source);
            match self.fs.copy_dir_all(package_dir, &staging) {
                Ok(()) => {}
                Err(FsError::Overlapping { .. }) => {
                    warn!(
                        "{} overlaps its staging directory {}, copy skipped",
                        package_dir.display(),
                        staging.display()
                    );
                }
                Err(e) => {
                    let message = format!(
                        "copy of {} to {} failed: {}",
                        package_dir.display(),
                        staging.display(),
                        e
                    );
                    error!("{}", message);
                    report.warnings.push(message);
                }
            }
        }

        if let Err(e) = self.fs.create_dir_all(self.resolver.out_dir()) {
            let message = format!(
                "cannot create output directory {}: {}",
                self.resolver.out_dir().display(),
                e
            );
            error!("{}", message);
            report.warnings.push(message);
        }

        report.transition(PackageState::Staged);
        present
    }

    fn needs_rebuild(
        &self,
        invoker: &CompilerInvoker<'_, FS, PR>,
        request: &CompileRequest<'_>,
        artifact: &str,
        lock: &FingerprintLock,
    ) -> bool {
        if self.options.always_rebuild || !self.fs.exists(request.output) {
            return true;
        }
        match self.options.cache_policy {
            CachePolicy::Exists => false,
            // Unreadable sources cannot be fingerprinted; the existing output stands
            CachePolicy::Fingerprint => invoker
                .fingerprint(request)
                .map(|hash| !lock.matches(artifact, &hash))
                .unwrap_or(false),
        }
    }

    fn check_result(&self, result: &CompileResult, output: &Path) -> Result<(), BuildFailure> {
        let failure = match &result.exit_status {
            ExitStatus::Code(0) => None,
            ExitStatus::Code(code) => {
                error!("compile error: code {}", code);
                Some(BuildFailure::CompilerExited { code: *code })
            }
            ExitStatus::NotFound => {
                error!(
                    "compile error: {} not found on the command search path",
                    self.options.compiler
                );
                Some(BuildFailure::CompilerNotFound)
            }
            ExitStatus::Terminated => {
                error!("compile error: compiler terminated without an exit code");
                Some(BuildFailure::CompilerTerminated)
            }
            ExitStatus::SpawnFailed(message) => {
                error!(
                    "compile error: cannot start {}: {}",
                    self.options.compiler, message
                );
                Some(BuildFailure::CompilerSpawnFailed {
                    message: message.clone(),
                })
            }
        };

        let failure = match failure {
            Some(failure) => Some(failure),
            None if !self.fs.exists(output) => {
                error!("compile error: output file {} is missing", output.display());
                Some(BuildFailure::OutputMissing)
            }
            None => None,
        };

        match failure {
            Some(failure) => {
                error!("compiler stdout:\n{}", result.stdout);
                error!("compiler stderr:\n{}", result.stderr);
                Err(failure)
            }
            None => Ok(()),
        }
    }

    /// Register the expected output under the derived name and the output file name
    fn register(
        &self,
        source: &GrammarSource,
        output: &Path,
        registry: &mut ArtifactRegistry,
        owners: &mut HashMap<String, String>,
        report: &mut PackageReport,
    ) {
        let derived = self.resolver.artifact_name(source);
        let entry = ArtifactEntry::new(derived.clone(), output, source.is_dependency());
        let file_name = output
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| derived.clone());

        let mut keys = vec![derived];
        if !keys.contains(&file_name) {
            keys.push(file_name);
        }

        for key in keys {
            if let Some(owner) = owners.insert(key.clone(), source.identifier().to_string()) {
                if owner != source.identifier() {
                    let message = format!(
                        "artifact name collision: '{}' from {} replaces the one from {}",
                        key,
                        source.identifier(),
                        owner
                    );
                    warn!("{}", message);
                    report.warnings.push(message);
                }
            }
            registry.register(entry.renamed(key));
        }
    }
}
