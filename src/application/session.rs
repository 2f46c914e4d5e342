//! Build Session
//!
//! Wires configuration into one build run and freezes the resulting
//! registry for the read-only consumers (module loader, dev server, emitter).

use std::sync::Arc;

use tracing::error;

use crate::config::BuildConfig;
use crate::domain::entities::ArtifactRegistry;
use crate::domain::ports::{FileSystem, ProcessRunner};
use crate::domain::services::PathResolver;
use crate::domain::value_objects::GrammarSource;
use crate::infrastructure::repositories::TomlFingerprintRepository;

use super::build::{resolver_for, BuildOptions, BuildReport, BuildUseCase};

/// Parse configured package identifiers, logging and skipping unusable ones
pub fn grammar_sources(packages: &[String]) -> Vec<GrammarSource> {
    packages
        .iter()
        .filter_map(|id| match GrammarSource::new(id.as_str()) {
            Ok(source) => Some(source),
            Err(e) => {
                error!("{}", e);
                None
            }
        })
        .collect()
}

/// Outcome of one build, with the registry frozen for sharing
#[derive(Debug, Clone)]
pub struct BuildSession {
    pub sources: Vec<GrammarSource>,
    pub resolver: PathResolver,
    pub registry: Arc<ArtifactRegistry>,
    pub report: BuildReport,
}

/// Seed the registry, run the build and freeze the registry
pub fn run_build<FS, PR>(
    fs: FS,
    runner: PR,
    config: &BuildConfig,
    options: BuildOptions,
    packages: &[String],
) -> BuildSession
where
    FS: FileSystem + Clone,
    PR: ProcessRunner,
{
    let sources = grammar_sources(packages);
    let resolver = resolver_for(config);
    let mut registry = ArtifactRegistry::seeded(&resolver, &sources);

    let use_case = BuildUseCase::new(
        fs.clone(),
        runner,
        TomlFingerprintRepository::new(fs),
        resolver.clone(),
        options,
    );
    let report = use_case.execute(&sources, &mut registry);

    BuildSession {
        sources,
        resolver,
        registry: Arc::new(registry),
        report,
    }
}
