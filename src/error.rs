//! Error types for grammar-forge
//!
//! Uses `thiserror` for library errors. The binary wraps these in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::ports::FsError;

/// Result type alias for grammar-forge operations
pub type ForgeResult<T> = Result<T, ForgeError>;

/// Main error type for grammar-forge operations
#[derive(Error, Debug)]
pub enum ForgeError {
    /// Package identifier is unusable (empty, or has no final path segment)
    #[error("invalid package identifier '{identifier}'")]
    InvalidPackage { identifier: String },

    /// Package base name does not follow the `tree-sitter-<name>` convention
    #[error("cannot parse tree-sitter grammar name from package name '{package}'")]
    InvalidGrammarName { package: String },

    /// Configuration file could not be parsed
    #[error("invalid configuration in {file}: {message}")]
    Config { file: PathBuf, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// File system port error
    #[error("{0}")]
    Fs(#[from] FsError),

    /// Dev server failure (bind, accept)
    #[error("dev server error: {0}")]
    Server(String),
}
