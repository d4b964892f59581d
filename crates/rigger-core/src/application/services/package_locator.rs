//! Package Locator - resolves package directories and manifest files.
//!
//! A package is `<packages_dir>/<name>/` with a `package.json` at its root.
//! The `autoload` and `routing` keys of that file point at the package's
//! manifests.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::{
    application::{ApplicationError, ports::Filesystem},
    domain::{PACKAGE_CONFIG_FILE, PackageConfig, PackageName, RelativePath},
    error::{RiggerError, RiggerResult},
};

/// Resolves everything under the packages directory.
#[derive(Clone)]
pub struct PackageLocator {
    filesystem: Arc<dyn Filesystem>,
    packages_dir: PathBuf,
}

impl PackageLocator {
    pub fn new(filesystem: Arc<dyn Filesystem>, packages_dir: impl Into<PathBuf>) -> Self {
        Self {
            filesystem,
            packages_dir: packages_dir.into(),
        }
    }

    pub fn packages_dir(&self) -> &Path {
        &self.packages_dir
    }

    pub fn package_dir(&self, package: &PackageName) -> PathBuf {
        self.packages_dir.join(package.as_str())
    }

    pub fn is_package(&self, package: &PackageName) -> bool {
        self.filesystem.exists(&self.package_dir(package))
    }

    /// The package directory, or `PackageNotExist`.
    pub fn require(&self, package: &PackageName) -> RiggerResult<PathBuf> {
        let dir = self.package_dir(package);
        if !self.filesystem.exists(&dir) {
            return Err(ApplicationError::PackageNotExist {
                name: package.to_string(),
            }
            .into());
        }
        Ok(dir)
    }

    /// Absolute location of a package-relative file.
    pub fn resolve(&self, package: &PackageName, file: &RelativePath) -> PathBuf {
        file.resolve(&self.package_dir(package))
    }

    /// Read and decode `package.json`.
    #[instrument(skip(self), fields(package = %package))]
    pub fn config(&self, package: &PackageName) -> RiggerResult<PackageConfig> {
        let path = self.package_dir(package).join(PACKAGE_CONFIG_FILE);
        let config_error = |reason: String| ApplicationError::PackageConfig {
            name: package.to_string(),
            reason,
        };

        let text = match self.filesystem.read_to_string(&path) {
            Ok(text) => text,
            Err(RiggerError::Application(ApplicationError::NotFound { .. })) => {
                return Err(config_error(format!("{} not found", path.display())).into());
            }
            Err(e) => return Err(e),
        };

        let config = PackageConfig::from_json(&text)
            .map_err(|e| config_error(format!("{}: {e}", path.display())))?;
        debug!(
            autoload = ?config.autoload.as_ref().map(RelativePath::as_str),
            routing = ?config.routing.as_ref().map(RelativePath::as_str),
            "Package configuration loaded"
        );
        Ok(config)
    }

    /// Path of the autoloader file, if the package declares one.
    pub fn autoloader_file(&self, package: &PackageName) -> RiggerResult<Option<PathBuf>> {
        let config = self.config(package)?;
        Ok(config.autoload.map(|file| self.resolve(package, &file)))
    }

    /// Path of the routing file, if the package declares one.
    pub fn routing_file(&self, package: &PackageName) -> RiggerResult<Option<PathBuf>> {
        let config = self.config(package)?;
        Ok(config.routing.map(|file| self.resolve(package, &file)))
    }

    pub fn require_autoloader(&self, package: &PackageName) -> RiggerResult<PathBuf> {
        self.autoloader_file(package)?.ok_or_else(|| {
            ApplicationError::NoAutoloader {
                name: package.to_string(),
            }
            .into()
        })
    }

    pub fn require_routing(&self, package: &PackageName) -> RiggerResult<PathBuf> {
        self.routing_file(package)?.ok_or_else(|| {
            ApplicationError::NoRouting {
                name: package.to_string(),
            }
            .into()
        })
    }
}
