//! Command handlers, one module per subcommand.
//!
//! Handlers receive parsed arguments plus the [`OutputManager`] and never
//! touch clap types beyond their own argument struct.
//!
//! [`OutputManager`]: crate::output::OutputManager

use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use rigger_adapters::{LocalFilesystem, PhpSourceParser};
use rigger_core::{
    application::{
        AutoloaderService, ControllerService, PackageLocator, RouterService,
        ports::{Filesystem, SourceParser},
    },
    domain::PackageName,
    error::RiggerError,
};

use crate::error::CliResult;

pub mod autoload;
pub mod check_name;
pub mod completions;
pub mod config;
pub mod init;
pub mod route;

/// Services wired to the local filesystem and the PHP parser.
pub struct Workspace {
    pub autoloader: Arc<AutoloaderService>,
    pub router: RouterService,
}

impl Workspace {
    pub fn open(packages_dir: &Path) -> Self {
        debug!(packages_dir = %packages_dir.display(), "Opening workspace");
        let filesystem: Arc<dyn Filesystem> = Arc::new(LocalFilesystem::new());
        let parser: Arc<dyn SourceParser> = Arc::new(PhpSourceParser::new());

        let packages = PackageLocator::new(Arc::clone(&filesystem), packages_dir);
        let autoloader = Arc::new(AutoloaderService::new(
            packages.clone(),
            Arc::clone(&filesystem),
            parser,
        ));
        let controllers = Arc::new(ControllerService::new(
            packages.clone(),
            Arc::clone(&filesystem),
            Arc::clone(&autoloader),
        ));
        let router = RouterService::new(packages, filesystem, controllers);

        Self { autoloader, router }
    }
}

/// Validated package name from a positional argument.
pub fn package_name(name: &str) -> CliResult<PackageName> {
    Ok(PackageName::new(name).map_err(RiggerError::from)?)
}
