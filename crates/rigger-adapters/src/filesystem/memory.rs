//! In-memory filesystem adapter for testing.

use std::{
    collections::{BTreeMap, HashSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use rigger_core::{
    application::{ApplicationError, ports::Filesystem},
    error::RiggerResult,
};

/// In-memory filesystem for testing.
///
/// Clones share the same contents, so a test can hand one clone to the
/// services and inspect the other.
#[derive(Debug, Clone)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: BTreeMap<PathBuf, String>,
    directories: HashSet<PathBuf>,
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(MemoryFilesystemInner::default())),
        }
    }

    /// Add a file and its parent directories (testing helper).
    pub fn with_file(self, path: impl AsRef<Path>, content: impl Into<String>) -> Self {
        let path = path.as_ref();
        if let Ok(mut inner) = self.inner.write() {
            if let Some(parent) = path.parent() {
                insert_ancestors(&mut inner.directories, parent);
            }
            inner.files.insert(path.to_path_buf(), content.into());
        }
        self
    }

    /// Read a file's content (testing helper).
    pub fn read_file(&self, path: &Path) -> Option<String> {
        let inner = self.inner.read().ok()?;
        inner.files.get(path).cloned()
    }

    /// Every file path, sorted.
    pub fn paths(&self) -> Vec<PathBuf> {
        self.inner
            .read()
            .map(|inner| inner.files.keys().cloned().collect())
            .unwrap_or_default()
    }
}

impl Default for MemoryFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for MemoryFilesystem {
    fn read_to_string(&self, path: &Path) -> RiggerResult<String> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::LockPoisoned)?;
        inner.files.get(path).cloned().ok_or_else(|| {
            ApplicationError::NotFound {
                path: path.to_path_buf(),
            }
            .into()
        })
    }

    fn write_file(&self, path: &Path, content: &str) -> RiggerResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::LockPoisoned)?;

        // Ensure parent exists
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !inner.directories.contains(parent) {
                return Err(ApplicationError::FilesystemError {
                    path: path.to_path_buf(),
                    reason: "Parent directory does not exist".into(),
                }
                .into());
            }
        }

        inner.files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.inner
            .read()
            .map(|inner| inner.files.contains_key(path) || inner.directories.contains(path))
            .unwrap_or(false)
    }

    fn create_dir_all(&self, path: &Path) -> RiggerResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::LockPoisoned)?;
        insert_ancestors(&mut inner.directories, path);
        Ok(())
    }

    fn list_files(&self, dir: &Path, extension: &str) -> RiggerResult<Vec<PathBuf>> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::LockPoisoned)?;
        Ok(inner
            .files
            .keys()
            .filter(|p| p.starts_with(dir) && p.extension().is_some_and(|ext| ext == extension))
            .cloned()
            .collect())
    }
}

fn insert_ancestors(directories: &mut HashSet<PathBuf>, path: &Path) {
    let mut current = PathBuf::new();
    for component in path.components() {
        current.push(component);
        directories.insert(current.clone());
    }
}
