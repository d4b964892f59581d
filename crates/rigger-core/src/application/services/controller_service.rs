//! Controller Service - checks that `Class@method` references resolve.

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::{
    application::{
        ApplicationError,
        ports::Filesystem,
        services::{AutoloaderService, PackageLocator},
    },
    domain::{ControllerRef, DeclarationScanner, PackageName},
    error::RiggerResult,
};

pub struct ControllerService {
    packages: PackageLocator,
    filesystem: Arc<dyn Filesystem>,
    autoloader: Arc<AutoloaderService>,
}

impl ControllerService {
    pub fn new(
        packages: PackageLocator,
        filesystem: Arc<dyn Filesystem>,
        autoloader: Arc<AutoloaderService>,
    ) -> Self {
        Self {
            packages,
            filesystem,
            autoloader,
        }
    }

    /// Whether the referenced class is registered and declares the method.
    ///
    /// An unregistered class is `false`. A registered class whose file is
    /// missing, or whose file does not declare it, is an error.
    #[instrument(skip(self), fields(package = %package, controller = %controller))]
    pub fn exists(&self, package: &PackageName, controller: &ControllerRef) -> RiggerResult<bool> {
        let Some(file) = self.autoloader.lookup(package, controller.class())? else {
            debug!("Class not registered");
            return Ok(false);
        };

        let path = self.packages.resolve(package, &file);
        if !self.filesystem.exists(&path) {
            return Err(ApplicationError::NotFound { path }.into());
        }

        let nodes = self.autoloader.parse_file(&path)?;
        let class = DeclarationScanner::find_class(&nodes, controller.class().simple_name())
            .ok_or_else(|| ApplicationError::ClassNotExist {
                class: controller.class().to_string(),
                path: path.clone(),
            })?;

        Ok(class.has_method(controller.method()))
    }
}
