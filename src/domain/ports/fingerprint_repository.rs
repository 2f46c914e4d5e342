//! FingerprintRepository port - persistence of the fingerprint lock

use std::path::Path;

use crate::domain::entities::FingerprintLock;

/// Result type for fingerprint lock operations
pub type FingerprintResult<T> = Result<T, FingerprintError>;

/// Fingerprint lock errors
#[derive(Debug)]
pub enum FingerprintError {
    /// Lock file exists but cannot be parsed
    InvalidFormat(String),
    /// Lock file was written by an incompatible version
    VersionMismatch { found: u32, expected: u32 },
    /// Underlying storage failure
    Io(String),
}

impl std::fmt::Display for FingerprintError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FingerprintError::InvalidFormat(msg) => {
                write!(f, "Invalid fingerprint lock format: {}", msg)
            }
            FingerprintError::VersionMismatch { found, expected } => write!(
                f,
                "Fingerprint lock version {} is not supported (expected {})",
                found, expected
            ),
            FingerprintError::Io(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl std::error::Error for FingerprintError {}

/// Loads and saves the fingerprint lock
pub trait FingerprintRepository {
    /// Load the lock, or an empty one if the file does not exist
    fn load(&self, path: &Path) -> FingerprintResult<FingerprintLock>;

    fn save(&self, lock: &FingerprintLock, path: &Path) -> FingerprintResult<()>;
}
