pub mod common;
pub mod manifest;
pub mod package;
pub mod route;
pub mod source;

pub use crate::domain::DomainError;
pub use manifest::{Manifest, ManifestEntry};
pub use package::PackageConfig;
pub use route::{Route, RoutePath, RouteTable};
pub use source::{SourceNode, TypeDeclaration};
