//! Domain Layer
//!
//! Grammar packages, artifact naming and the artifact registry, with no I/O.
//!
//! ## Structure
//!
//! - `value_objects/` - Immutable value types (GrammarSource, ContentHash)
//! - `entities/` - ArtifactEntry and the ArtifactRegistry
//! - `services/` - Path resolution for grammar packages
//! - `ports/` - Capability interfaces (file system, process runner)
//!
//! ## Design Principles
//!
//! 1. **No I/O** - This layer never touches the file system or spawns processes directly
//! 2. **Pure Functions** - Services are stateless and testable
//! 3. **Ports & Adapters** - All I/O goes through trait-defined ports

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
