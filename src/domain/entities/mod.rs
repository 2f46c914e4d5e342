//! Domain Entities

mod artifact;
mod fingerprint_lock;
mod registry;

pub use artifact::ArtifactEntry;
pub use fingerprint_lock::{
    FingerprintEntry, FingerprintLock, FINGERPRINT_LOCK_FILE, FINGERPRINT_LOCK_VERSION,
};
pub use registry::{ArtifactRegistry, RUNTIME_ARTIFACT, RUNTIME_PACKAGE};
