//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod content_hash;
mod grammar_source;

pub use content_hash::ContentHash;
pub use grammar_source::{GrammarSource, PackageKind};
