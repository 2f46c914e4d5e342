//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `fs/` - File system implementations (Local, Memory)
//! - `process/` - Process runner spawning real programs
//! - `repositories/` - Fingerprint lock persistence
//! - `server/` - Dev server serving registered artifacts

pub mod fs;
pub mod process;
pub mod repositories;
pub mod server;

// Re-export for convenience
pub use fs::{LocalFs, MemoryFs};
pub use process::SystemProcessRunner;
pub use repositories::TomlFingerprintRepository;
pub use server::{ArtifactMiddleware, DevServer, NotFound};
