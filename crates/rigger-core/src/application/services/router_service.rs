//! Router Service - appends compiled routes to a package's routing file.
//!
//! Same persistence model as the autoloader: whole-file read-modify-write,
//! no locking, nothing written until the new table is complete.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{info, instrument};

use crate::{
    application::{
        ApplicationError,
        ports::Filesystem,
        services::{ControllerService, PackageLocator},
    },
    domain::{
        ControllerRef, HttpMethods, PackageName, Permission, Route, RoutePatternCompiler,
        RoutePermissions, RouteTable,
    },
    error::RiggerResult,
};

/// Everything needed to add one route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRequest {
    /// e.g. `/users/:id/posts/:postId:int`
    pub address: String,
    /// `Class@method`; `/` is accepted as the namespace separator.
    pub controller: String,
    pub method: Option<HttpMethods>,
    pub absolute: Option<bool>,
    pub api: Option<Permission>,
    pub ajax: Option<Permission>,
}

impl RouteRequest {
    pub fn new(address: impl Into<String>, controller: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            controller: controller.into(),
            method: None,
            absolute: None,
            api: None,
            ajax: None,
        }
    }
}

pub struct RouterService {
    packages: PackageLocator,
    filesystem: Arc<dyn Filesystem>,
    controllers: Arc<ControllerService>,
}

impl RouterService {
    pub fn new(
        packages: PackageLocator,
        filesystem: Arc<dyn Filesystem>,
        controllers: Arc<ControllerService>,
    ) -> Self {
        Self {
            packages,
            filesystem,
            controllers,
        }
    }

    /// Overwrite the package's routing file with an empty table.
    #[instrument(skip(self), fields(package = %package))]
    pub fn init(&self, package: &PackageName) -> RiggerResult<PathBuf> {
        self.packages.require(package)?;
        let path = self.packages.require_routing(package)?;
        self.write_table(&path, &RouteTable::empty())?;
        info!(path = %path.display(), "Routing file initialised");
        Ok(path)
    }

    /// The package's routes, in file order.
    pub fn list(&self, package: &PackageName) -> RiggerResult<RouteTable> {
        self.packages.require(package)?;
        let path = self.packages.require_routing(package)?;
        self.read_table(&path)
    }

    /// Compile `request.address`, validate every controller reference, and
    /// append the route.
    #[instrument(skip(self, request), fields(package = %package, address = %request.address))]
    pub fn add(&self, package: &PackageName, request: RouteRequest) -> RiggerResult<Route> {
        self.packages.require(package)?;
        let path = self.packages.require_routing(package)?;
        let mut table = self.read_table(&path)?;

        let compiled = RoutePatternCompiler::compile(&request.address)?;

        let controller = self.check_controller(package, &request.controller)?;
        let api = self.check_permission(package, request.api)?;
        let ajax = self.check_permission(package, request.ajax)?;

        let permissions = RoutePermissions { api, ajax };
        let route = Route {
            method: request.method,
            absolute: request.absolute,
            permissions: (!permissions.is_empty()).then_some(permissions),
            ..Route::new(compiled.into_route_path(), controller)
        };

        table.append(route.clone());
        self.write_table(&path, &table)?;
        info!(routes = table.len(), "Route added");
        Ok(route)
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    /// Normalised reference text, or an error when it does not resolve.
    fn check_controller(&self, package: &PackageName, reference: &str) -> RiggerResult<String> {
        let controller = ControllerRef::parse(reference)?;
        if !self.controllers.exists(package, &controller)? {
            return Err(ApplicationError::ControllerNotExist {
                reference: controller.to_string(),
            }
            .into());
        }
        Ok(controller.to_string())
    }

    fn check_permission(
        &self,
        package: &PackageName,
        permission: Option<Permission>,
    ) -> RiggerResult<Option<Permission>> {
        match permission {
            Some(Permission::Controller(reference)) => Ok(Some(Permission::Controller(
                self.check_controller(package, &reference)?,
            ))),
            other => Ok(other),
        }
    }

    fn read_table(&self, path: &Path) -> RiggerResult<RouteTable> {
        let text = self.filesystem.read_to_string(path)?;
        RouteTable::from_json(&text).map_err(|e| {
            ApplicationError::CorruptRouteTable {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }
            .into()
        })
    }

    fn write_table(&self, path: &Path, table: &RouteTable) -> RiggerResult<()> {
        let json = table.to_json()?;
        if let Some(parent) = path.parent() {
            self.filesystem.create_dir_all(parent)?;
        }
        self.filesystem.write_file(path, &json)
    }
}
