//! In-memory File System
//!
//! A `FileSystem` provider backed by a map, for tests and dry runs.
//! Paths are compared verbatim; only the overlap check of `copy_dir_all`
//! ignores `.` components.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Component, Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::domain::ports::file_system::{FileSystem, FsError, FsResult};

#[derive(Debug, Default)]
struct Tree {
    files: BTreeMap<PathBuf, Vec<u8>>,
    dirs: BTreeSet<PathBuf>,
}

/// In-memory file system
///
/// Clones share the same underlying tree.
#[derive(Debug, Clone, Default)]
pub struct MemoryFs {
    tree: Arc<Mutex<Tree>>,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file (builder style)
    pub fn with_file(self, path: impl AsRef<Path>, content: impl AsRef<[u8]>) -> Self {
        self.insert(path, content);
        self
    }

    /// Add or replace a file, registering its parent directories
    pub fn insert(&self, path: impl AsRef<Path>, content: impl AsRef<[u8]>) {
        let path = path.as_ref();
        let mut tree = self.lock();
        for ancestor in path.ancestors().skip(1) {
            if !ancestor.as_os_str().is_empty() {
                tree.dirs.insert(ancestor.to_path_buf());
            }
        }
        tree.files
            .insert(path.to_path_buf(), content.as_ref().to_vec());
    }

    fn lock(&self) -> MutexGuard<'_, Tree> {
        // Poisoned locks still hold a consistent tree
        self.tree.lock().unwrap_or_else(|e| e.into_inner())
    }
}

fn without_cur_dir(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

impl FileSystem for MemoryFs {
    fn exists(&self, path: &Path) -> bool {
        let tree = self.lock();
        tree.files.contains_key(path) || tree.dirs.contains(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.lock().dirs.contains(path)
    }

    fn read_to_string(&self, path: &Path) -> FsResult<String> {
        let bytes = self.read_bytes(path)?;
        String::from_utf8(bytes).map_err(|e| FsError::Other(e.to_string()))
    }

    fn read_bytes(&self, path: &Path) -> FsResult<Vec<u8>> {
        self.lock()
            .files
            .get(path)
            .cloned()
            .ok_or_else(|| FsError::NotFound(path.to_path_buf()))
    }

    fn write(&self, path: &Path, content: &[u8]) -> FsResult<()> {
        self.insert(path, content);
        Ok(())
    }

    fn create_dir_all(&self, path: &Path) -> FsResult<()> {
        let mut tree = self.lock();
        for ancestor in path.ancestors() {
            if !ancestor.as_os_str().is_empty() {
                tree.dirs.insert(ancestor.to_path_buf());
            }
        }
        Ok(())
    }

    fn copy_dir_all(&self, from: &Path, to: &Path) -> FsResult<()> {
        if !self.is_dir(from) {
            return Err(FsError::NotFound(from.to_path_buf()));
        }
        let (source, dest) = (without_cur_dir(from), without_cur_dir(to));
        if source.starts_with(&dest) || dest.starts_with(&source) {
            return Err(FsError::Overlapping {
                from: from.to_path_buf(),
                to: to.to_path_buf(),
            });
        }
        let copies: Vec<(PathBuf, Vec<u8>)> = self
            .lock()
            .files
            .iter()
            .filter_map(|(path, content)| {
                path.strip_prefix(from)
                    .ok()
                    .map(|rel| (to.join(rel), content.clone()))
            })
            .collect();

        self.create_dir_all(to)?;
        for (path, content) in copies {
            self.insert(path, content);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_registers_parent_dirs() {
        let fs = MemoryFs::new().with_file("a/b/c.txt", "x");
        assert!(fs.is_dir(Path::new("a")));
        assert!(fs.is_dir(Path::new("a/b")));
        assert!(fs.exists(Path::new("a/b/c.txt")));
        assert!(!fs.is_dir(Path::new("a/b/c.txt")));
    }

    #[test]
    fn copy_dir_all_copies_prefix() {
        let fs = MemoryFs::new()
            .with_file("g/tree-sitter-x/src/parser.c", "p")
            .with_file("g/other.txt", "o");

        fs.copy_dir_all(Path::new("g/tree-sitter-x"), Path::new("node_modules/tree-sitter-x"))
            .unwrap();

        assert_eq!(
            fs.read_to_string(Path::new("node_modules/tree-sitter-x/src/parser.c"))
                .unwrap(),
            "p"
        );
        assert!(!fs.exists(Path::new("node_modules/tree-sitter-x/other.txt")));
    }

    #[test]
    fn copy_dir_all_refuses_same_directory() {
        let fs = MemoryFs::new().with_file("./node_modules/tree-sitter-x/src/parser.c", "p");

        let err = fs
            .copy_dir_all(
                Path::new("./node_modules/tree-sitter-x"),
                Path::new("node_modules/tree-sitter-x"),
            )
            .unwrap_err();

        assert!(matches!(err, FsError::Overlapping { .. }));
        assert!(!fs.exists(Path::new("node_modules/tree-sitter-x/src/parser.c")));
    }

    #[test]
    fn clones_share_state() {
        let fs = MemoryFs::new();
        let other = fs.clone();
        other.write(Path::new("x.wasm"), b"\0asm").unwrap();
        assert_eq!(fs.read_bytes(Path::new("x.wasm")).unwrap(), b"\0asm");
    }
}
