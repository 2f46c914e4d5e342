//! Domain Ports (Interfaces)
//!
//! Capability providers are chosen once at process start and injected
//! into every consumer. Infrastructure layer provides concrete implementations.

pub mod file_system;
pub mod fingerprint_repository;
pub mod process_runner;

pub use file_system::{FileSystem, FsError, FsResult};
pub use fingerprint_repository::{FingerprintError, FingerprintRepository, FingerprintResult};
pub use process_runner::{ProcessOutput, ProcessRunner, ProcessSpec};
