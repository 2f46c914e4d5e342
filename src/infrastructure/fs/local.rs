//! Local File System Implementation
//!
//! Implements the FileSystem port for local disk operations.

use std::io::Write;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;

use crate::domain::ports::file_system::{FileSystem, FsError, FsResult};

/// Local file system implementation
///
/// Provides atomic writes, recursive copies and standard file operations.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl LocalFs {
    /// Create a new LocalFs instance
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for LocalFs {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn read_to_string(&self, path: &Path) -> FsResult<String> {
        std::fs::read_to_string(path).map_err(|e| FsError::at(path, e))
    }

    fn read_bytes(&self, path: &Path) -> FsResult<Vec<u8>> {
        std::fs::read(path).map_err(|e| FsError::at(path, e))
    }

    fn write(&self, path: &Path, content: &[u8]) -> FsResult<()> {
        let parent = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(parent).map_err(|e| FsError::at(parent, e))?;

        // Written to a sibling temp file, then renamed into place
        let mut tmp = tempfile::NamedTempFile::new_in(parent).map_err(|e| FsError::at(parent, e))?;
        tmp.write_all(content).map_err(|e| FsError::at(path, e))?;
        tmp.persist(path).map_err(|e| FsError::at(path, e.error))?;
        Ok(())
    }

    fn create_dir_all(&self, path: &Path) -> FsResult<()> {
        std::fs::create_dir_all(path).map_err(|e| FsError::at(path, e))
    }

    fn copy_dir_all(&self, from: &Path, to: &Path) -> FsResult<()> {
        if !from.is_dir() {
            return Err(FsError::NotFound(from.to_path_buf()));
        }
        let source = from.canonicalize().map_err(|e| FsError::at(from, e))?;
        let dest = resolve_existing(to).map_err(|e| FsError::at(to, e))?;
        if source.starts_with(&dest) || dest.starts_with(&source) {
            return Err(FsError::Overlapping {
                from: from.to_path_buf(),
                to: to.to_path_buf(),
            });
        }
        std::fs::create_dir_all(to).map_err(|e| FsError::at(to, e))?;

        let walker = WalkBuilder::new(from)
            .standard_filters(false)
            .follow_links(false)
            .build();

        for entry in walker {
            let entry = entry.map_err(|e| FsError::Other(e.to_string()))?;
            let relative = entry
                .path()
                .strip_prefix(from)
                .map_err(|e| FsError::Other(e.to_string()))?;
            let target = to.join(relative);

            match entry.file_type() {
                Some(ft) if ft.is_dir() => {
                    std::fs::create_dir_all(&target).map_err(|e| FsError::at(&target, e))?;
                }
                Some(ft) if ft.is_file() => {
                    std::fs::copy(entry.path(), &target).map_err(|e| FsError::at(&target, e))?;
                }
                _ => {}
            }
        }
        Ok(())
    }
}

/// Canonicalize the longest existing ancestor of `path` and re-append the rest
fn resolve_existing(path: &Path) -> std::io::Result<PathBuf> {
    let mut missing = Vec::new();
    let mut current = path;
    loop {
        match current.canonicalize() {
            Ok(base) => return Ok(missing.iter().rev().fold(base, |acc, part| acc.join(part))),
            Err(e) => match (current.parent(), current.file_name()) {
                (Some(parent), Some(name)) => {
                    missing.push(name.to_os_string());
                    current = if parent.as_os_str().is_empty() {
                        Path::new(".")
                    } else {
                        parent
                    };
                }
                _ => return Err(e),
            },
        }
    }
}
