//! FileSystem port - abstraction over file I/O operations
//!
//! The build, the module loader and the dev server reach the disk only
//! through this trait, so tests can substitute an in-memory provider.

use std::path::{Path, PathBuf};

/// Result type for file system operations
pub type FsResult<T> = Result<T, FsError>;

/// File system operation errors
#[derive(Debug)]
pub enum FsError {
    /// File not found
    NotFound(PathBuf),
    /// Permission denied
    PermissionDenied(PathBuf),
    /// Copy source and destination are the same directory, or one contains the other
    Overlapping { from: PathBuf, to: PathBuf },
    /// I/O error
    Io(std::io::Error),
    /// Other error
    Other(String),
}

impl FsError {
    /// Convert an I/O error, keeping the path that caused it
    pub fn at(path: &Path, err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => FsError::NotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => FsError::PermissionDenied(path.to_path_buf()),
            _ => FsError::Io(err),
        }
    }
}

impl From<std::io::Error> for FsError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => FsError::NotFound(PathBuf::new()),
            std::io::ErrorKind::PermissionDenied => FsError::PermissionDenied(PathBuf::new()),
            _ => FsError::Io(err),
        }
    }
}

impl std::fmt::Display for FsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FsError::NotFound(path) => write!(f, "File not found: {}", path.display()),
            FsError::PermissionDenied(path) => {
                write!(f, "Permission denied: {}", path.display())
            }
            FsError::Overlapping { from, to } => write!(
                f,
                "Cannot copy {} to {}: source and destination overlap",
                from.display(),
                to.display()
            ),
            FsError::Io(err) => write!(f, "I/O error: {}", err),
            FsError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for FsError {}

/// Abstract file system interface
///
/// Implementations:
/// - `LocalFs` - standard file I/O
/// - `MemoryFs` - in-memory, for tests
pub trait FileSystem: Send + Sync {
    /// Check if a file or directory exists
    fn exists(&self, path: &Path) -> bool;

    /// Check if path is an existing directory
    fn is_dir(&self, path: &Path) -> bool;

    /// Read file content as UTF-8 text
    fn read_to_string(&self, path: &Path) -> FsResult<String>;

    /// Read raw file content
    fn read_bytes(&self, path: &Path) -> FsResult<Vec<u8>>;

    /// Write content to file atomically, creating parent directories
    fn write(&self, path: &Path, content: &[u8]) -> FsResult<()>;

    /// Create directory and parents
    fn create_dir_all(&self, path: &Path) -> FsResult<()>;

    /// Recursively copy `from` into `to`, overwriting existing files
    ///
    /// Fails with `FsError::Overlapping` when the two resolve to the same
    /// directory or one lies inside the other; nothing is written then.
    fn copy_dir_all(&self, from: &Path, to: &Path) -> FsResult<()>;
}
