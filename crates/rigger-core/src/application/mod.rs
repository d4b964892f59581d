//! Application layer for Rigger.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (AutoloaderService, RouterService, ...)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! grammar or compile rules itself. Those live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{
    AddOutcome, AutoloaderService, ControllerService, PackageLocator, RebuildOutcome,
    RouteRequest, RouterService,
};

// Re-export port traits (for adapter implementation)
pub use ports::{Filesystem, ParseError, SourceParser};

pub use error::ApplicationError;
