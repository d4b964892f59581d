//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "register a class" or "add a route".

pub mod autoloader_service;
pub mod controller_service;
pub mod package_locator;
pub mod router_service;

pub use autoloader_service::{AddOutcome, AutoloaderService, RebuildOutcome};
pub use controller_service::ControllerService;
pub use package_locator::PackageLocator;
pub use router_service::{RouteRequest, RouterService};
