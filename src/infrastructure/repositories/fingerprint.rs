//! TOML Fingerprint Repository
//!
//! Stores the fingerprint lock as TOML, conventionally at
//! `<out_dir>/.grammar-forge.lock`.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::{FingerprintEntry, FingerprintLock, FINGERPRINT_LOCK_VERSION};
use crate::domain::ports::{
    FileSystem, FingerprintError, FingerprintRepository, FingerprintResult,
};
use crate::domain::value_objects::ContentHash;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TomlArtifactEntry {
    hash: String,
    built_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TomlFingerprintLock {
    version: u32,
    #[serde(default)]
    artifacts: BTreeMap<String, TomlArtifactEntry>,
}

/// TOML-based fingerprint repository over any file system provider
pub struct TomlFingerprintRepository<FS: FileSystem> {
    fs: FS,
}

impl<FS: FileSystem> TomlFingerprintRepository<FS> {
    pub fn new(fs: FS) -> Self {
        Self { fs }
    }
}

impl<FS: FileSystem> FingerprintRepository for TomlFingerprintRepository<FS> {
    fn load(&self, path: &Path) -> FingerprintResult<FingerprintLock> {
        if !self.fs.exists(path) {
            return Ok(FingerprintLock::new());
        }

        let content = self
            .fs
            .read_to_string(path)
            .map_err(|e| FingerprintError::Io(e.to_string()))?;
        let parsed: TomlFingerprintLock =
            toml::from_str(&content).map_err(|e| FingerprintError::InvalidFormat(e.to_string()))?;

        if parsed.version != FINGERPRINT_LOCK_VERSION {
            return Err(FingerprintError::VersionMismatch {
                found: parsed.version,
                expected: FINGERPRINT_LOCK_VERSION,
            });
        }

        let mut lock = FingerprintLock::new();
        for (artifact, entry) in parsed.artifacts {
            lock.record(
                artifact,
                FingerprintEntry::new(ContentHash::new(&entry.hash), entry.built_at),
            );
        }
        Ok(lock)
    }

    fn save(&self, lock: &FingerprintLock, path: &Path) -> FingerprintResult<()> {
        let artifacts = lock
            .entries()
            .map(|(artifact, entry)| {
                (
                    artifact.to_string(),
                    TomlArtifactEntry {
                        hash: entry.hash().to_string(),
                        built_at: entry.built_at(),
                    },
                )
            })
            .collect();
        let toml_lock = TomlFingerprintLock {
            version: lock.version(),
            artifacts,
        };

        let content = toml::to_string_pretty(&toml_lock)
            .map_err(|e| FingerprintError::InvalidFormat(e.to_string()))?;
        let content = format!(
            "# Generated by grammar-forge. Do not edit.\n\n{}",
            content
        );
        self.fs
            .write(path, content.as_bytes())
            .map_err(|e| FingerprintError::Io(e.to_string()))
    }
}
