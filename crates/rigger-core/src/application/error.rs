//! Application layer errors.
//!
//! These errors represent failures in orchestration: missing files, corrupt
//! documents, unknown packages. Grammar and compile errors are `DomainError`
//! from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    /// A file the operation needs does not exist.
    #[error("File not found: {path}")]
    NotFound { path: PathBuf },

    /// The autoloader file is not a valid manifest.
    #[error("Corrupt autoloader manifest {path}: {reason}")]
    CorruptManifest { path: PathBuf, reason: String },

    /// The routing file is not a valid route table.
    #[error("Corrupt routing file {path}: {reason}")]
    CorruptRouteTable { path: PathBuf, reason: String },

    /// A source file has a syntax error.
    #[error("Cannot parse {path}: {reason}")]
    ParseFailure { path: PathBuf, reason: String },

    /// A controller reference names a class without that method.
    #[error("Controller does not exist: {reference}")]
    ControllerNotExist { reference: String },

    /// The autoloader points at a file that does not declare the class.
    #[error("Class {class} is not declared in {path}")]
    ClassNotExist { class: String, path: PathBuf },

    /// The class is already registered under another file.
    #[error("Class {class} is already registered in {file}")]
    AlreadyRegistered { class: String, file: String },

    #[error("Package does not exist: {name}")]
    PackageNotExist { name: String },

    /// `package.json` is missing or unreadable.
    #[error("Invalid package configuration for {name}: {reason}")]
    PackageConfig { name: String, reason: String },

    #[error("Package {name} has no autoloader")]
    NoAutoloader { name: String },

    #[error("Package {name} has no routing file")]
    NoRouting { name: String },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// In-memory filesystem lock poisoned.
    #[error("Filesystem lock poisoned")]
    LockPoisoned,
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::NotFound { path } => vec![
                format!("Expected a file at {}", path.display()),
                "Run the matching init command to create it".into(),
            ],
            Self::CorruptManifest { path, .. } => vec![
                format!("Fix the JSON in {} by hand", path.display()),
                "Or regenerate it: rigger autoload rebuild <package>".into(),
            ],
            Self::CorruptRouteTable { path, .. } => vec![
                format!("Fix the JSON in {}; it must be an array of routes", path.display()),
            ],
            Self::ParseFailure { .. } => vec!["Fix the syntax error and try again".into()],
            Self::ControllerNotExist { reference } => vec![
                format!("Add the method named in '{reference}' to its class"),
                "Check that the class is registered: rigger autoload find <package> <class>".into(),
            ],
            Self::ClassNotExist { .. } => vec![
                "The autoloader is out of date".into(),
                "Try: rigger autoload rebuild <package>".into(),
            ],
            Self::AlreadyRegistered { file, .. } => vec![
                format!("Remove the class from {file} first"),
                "Or choose a different class name".into(),
            ],
            Self::PackageNotExist { name } => vec![
                format!("Create the directory for package '{name}'"),
                "Check --packages-dir or workspace.packages_dir".into(),
            ],
            Self::PackageConfig { .. } => vec![
                "Each package needs a package.json object at its root".into(),
            ],
            Self::NoAutoloader { .. } => vec![
                "Add \"autoload\": \"autoloader.json\" to package.json".into(),
            ],
            Self::NoRouting { .. } => vec![
                "Add \"routing\": \"routing.json\" to package.json".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            _ => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::NotFound { .. }
            | Self::ControllerNotExist { .. }
            | Self::ClassNotExist { .. }
            | Self::PackageNotExist { .. } => ErrorCategory::NotFound,
            Self::CorruptManifest { .. }
            | Self::CorruptRouteTable { .. }
            | Self::ParseFailure { .. } => ErrorCategory::Corrupt,
            Self::PackageConfig { .. } | Self::NoAutoloader { .. } | Self::NoRouting { .. } => {
                ErrorCategory::Configuration
            }
            Self::AlreadyRegistered { .. } => ErrorCategory::Validation,
            Self::FilesystemError { .. } | Self::LockPoisoned => ErrorCategory::Internal,
        }
    }
}
