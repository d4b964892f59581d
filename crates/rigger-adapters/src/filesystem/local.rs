//! Local filesystem adapter using std::fs.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use rigger_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{RiggerError, RiggerResult},
};
use tempfile::NamedTempFile;
use tracing::debug;
use walkdir::WalkDir;

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn read_to_string(&self, path: &Path) -> RiggerResult<String> {
        std::fs::read_to_string(path).map_err(|e| map_io_error(path, e, "read file"))
    }

    /// Writes a sibling temp file and renames it over `path`, so readers
    /// see either the old content or the new, never a truncated file.
    fn write_file(&self, path: &Path, content: &str) -> RiggerResult<()> {
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(parent)
            .map_err(|e| map_io_error(path, e, "create temporary file"))?;
        // Temp files are created 0600; keep the mode of the file being replaced.
        if let Ok(existing) = std::fs::metadata(path) {
            tmp.as_file()
                .set_permissions(existing.permissions())
                .map_err(|e| map_io_error(path, e, "copy permissions"))?;
        }
        tmp.write_all(content.as_bytes())
            .and_then(|()| tmp.as_file().sync_all())
            .map_err(|e| map_io_error(path, e, "write file"))?;
        tmp.persist(path)
            .map_err(|e| map_io_error(path, e.error, "replace file"))?;
        debug!(path = %path.display(), bytes = content.len(), "File replaced");
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn create_dir_all(&self, path: &Path) -> RiggerResult<()> {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn list_files(&self, dir: &Path, extension: &str) -> RiggerResult<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in WalkDir::new(dir).follow_links(false) {
            let entry = entry.map_err(|e| ApplicationError::FilesystemError {
                path: e.path().unwrap_or(dir).to_path_buf(),
                reason: format!("Failed to walk directory: {e}"),
            })?;
            if entry.file_type().is_file()
                && entry.path().extension().is_some_and(|ext| ext == extension)
            {
                files.push(entry.into_path());
            }
        }
        files.sort();
        debug!(dir = %dir.display(), count = files.len(), "Listed source files");
        Ok(files)
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> RiggerError {
    if e.kind() == io::ErrorKind::NotFound {
        return ApplicationError::NotFound {
            path: path.to_path_buf(),
        }
        .into();
    }
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}
