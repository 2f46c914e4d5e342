//! Asset Emitter
//!
//! Copies every registered artifact into the build output as
//! `<dest>/<assets_dir>/<file_name>`.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, warn};

use crate::config::EmitConfig;
use crate::domain::entities::ArtifactRegistry;
use crate::domain::ports::FileSystem;

/// Where emitted assets go
#[derive(Debug, Clone)]
pub struct EmitOptions {
    pub dest: PathBuf,
    pub assets_dir: String,
}

impl EmitOptions {
    pub fn from_config(config: &EmitConfig) -> Self {
        Self {
            dest: config.dest.clone(),
            assets_dir: config.assets_dir.clone(),
        }
    }

    pub fn assets_root(&self) -> PathBuf {
        self.dest.join(&self.assets_dir)
    }
}

/// One copied artifact
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmittedAsset {
    pub file_name: String,
    pub from: PathBuf,
    pub to: PathBuf,
}

/// Outcome of an emit run
#[derive(Debug, Clone, Default, Serialize)]
pub struct EmitResult {
    pub emitted: Vec<EmittedAsset>,
    /// Registered names whose file does not exist or could not be copied
    pub skipped: Vec<String>,
}

pub struct AssetEmitter<FS: FileSystem> {
    fs: FS,
}

impl<FS: FileSystem> AssetEmitter<FS> {
    pub fn new(fs: FS) -> Self {
        Self { fs }
    }

    pub fn emit(&self, registry: &ArtifactRegistry, options: &EmitOptions) -> EmitResult {
        let root = options.assets_root();
        let mut result = EmitResult::default();

        for entry in registry.iter() {
            let from = entry.source_path();
            let to = root.join(entry.file_name());
            match self.copy(from, &to) {
                Ok(true) => {
                    info!("emit {} -> {}", from.display(), to.display());
                    result.emitted.push(EmittedAsset {
                        file_name: entry.file_name().to_string(),
                        from: from.to_path_buf(),
                        to,
                    });
                }
                Ok(false) => {
                    warn!("not emitting {}: {} does not exist", entry.file_name(), from.display());
                    result.skipped.push(entry.file_name().to_string());
                }
                Err(e) => {
                    warn!("not emitting {}: {}", entry.file_name(), e);
                    result.skipped.push(entry.file_name().to_string());
                }
            }
        }
        result
    }

    fn copy(&self, from: &Path, to: &Path) -> crate::domain::ports::FsResult<bool> {
        if !self.fs.exists(from) {
            return Ok(false);
        }
        let bytes = self.fs.read_bytes(from)?;
        self.fs.write(to, &bytes)?;
        Ok(true)
    }
}
