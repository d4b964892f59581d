use super::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// A path relative to a package directory, always with `/` separators.
///
/// Invariant: never empty, never absolute, no `..` components. Enforced at
/// construction so that manifest entries compare as plain strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RelativePath(String);

impl RelativePath {
    /// Fallible constructor.
    pub fn try_new(path: impl Into<String>) -> Result<Self, DomainError> {
        let raw: String = path.into();
        let bad = |reason: &str| DomainError::BadRelativePath {
            path: raw.clone(),
            reason: reason.into(),
        };

        let normalized = raw.replace('\\', "/");
        let trimmed = normalized.trim_start_matches("./");
        if trimmed.is_empty() {
            return Err(bad("path is empty"));
        }
        if trimmed.starts_with('/') || Path::new(trimmed).is_absolute() {
            return Err(bad("absolute paths are not allowed"));
        }
        if trimmed.split('/').any(|part| part == "..") {
            return Err(bad("'..' components are not allowed"));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Build the package-relative form of `path` given the package
    /// directory it lives under.
    pub fn from_package_path(package_dir: &Path, path: &Path) -> Result<Self, DomainError> {
        let relative = path.strip_prefix(package_dir).unwrap_or(path);
        let joined = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        Self::try_new(joined)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Resolve against a directory on disk.
    pub fn resolve(&self, base: &Path) -> PathBuf {
        self.0.split('/').fold(base.to_path_buf(), |acc, part| acc.join(part))
    }
}

impl TryFrom<String> for RelativePath {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl TryFrom<&str> for RelativePath {
    type Error = DomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<RelativePath> for String {
    fn from(path: RelativePath) -> Self {
        path.0
    }
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
