//! Repository Implementations

mod fingerprint;

pub use fingerprint::TomlFingerprintRepository;
