//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `rigger-adapters` crate provides implementations.

use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::domain::SourceNode;
use crate::error::RiggerResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `rigger_adapters::filesystem::LocalFilesystem` (production)
/// - `rigger_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Read a whole file. Missing files are `ApplicationError::NotFound`.
    fn read_to_string(&self, path: &Path) -> RiggerResult<String>;

    /// Write content to a file, replacing it.
    fn write_file(&self, path: &Path, content: &str) -> RiggerResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> RiggerResult<()>;

    /// Every file under `dir` (recursively) whose extension is `extension`,
    /// sorted by path.
    fn list_files(&self, dir: &Path, extension: &str) -> RiggerResult<Vec<PathBuf>>;
}

/// First syntax error in a source file. Lines and columns are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("syntax error at line {line}, column {column}: {message}")]
pub struct ParseError {
    pub line: usize,
    pub column: usize,
    pub message: String,
}

/// Port for turning source text into a [`SourceNode`] tree.
///
/// Implemented by `rigger_adapters::parser::PhpSourceParser`. A syntax error
/// anywhere fails the whole parse.
#[cfg_attr(test, mockall::automock)]
pub trait SourceParser: Send + Sync {
    fn parse(&self, source: &str) -> Result<Vec<SourceNode>, ParseError>;
}
