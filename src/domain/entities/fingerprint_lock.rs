//! Fingerprint lock entity - compile-input hashes of built artifacts
//!
//! Pure data structure; persistence is handled by a FingerprintRepository.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::domain::value_objects::ContentHash;

/// Current on-disk format version
pub const FINGERPRINT_LOCK_VERSION: u32 = 1;

/// Lock file name inside the output directory
pub const FINGERPRINT_LOCK_FILE: &str = ".grammar-forge.lock";

/// Recorded state of one artifact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FingerprintEntry {
    hash: ContentHash,
    built_at: DateTime<Utc>,
}

impl FingerprintEntry {
    pub fn new(hash: ContentHash, built_at: DateTime<Utc>) -> Self {
        Self { hash, built_at }
    }

    pub fn hash(&self) -> &ContentHash {
        &self.hash
    }

    pub fn built_at(&self) -> DateTime<Utc> {
        self.built_at
    }
}

/// Artifact file name -> fingerprint of the inputs it was built from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FingerprintLock {
    entries: BTreeMap<String, FingerprintEntry>,
}

impl FingerprintLock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn version(&self) -> u32 {
        FINGERPRINT_LOCK_VERSION
    }

    pub fn get(&self, artifact: &str) -> Option<&FingerprintEntry> {
        self.entries.get(artifact)
    }

    /// True when a fingerprint is recorded and equals `hash`
    pub fn matches(&self, artifact: &str, hash: &ContentHash) -> bool {
        self.entries
            .get(artifact)
            .map(|entry| entry.hash() == hash)
            .unwrap_or(false)
    }

    pub fn record(&mut self, artifact: impl Into<String>, entry: FingerprintEntry) {
        self.entries.insert(artifact.into(), entry);
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &FingerprintEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
