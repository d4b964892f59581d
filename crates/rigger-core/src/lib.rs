//! Rigger Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the Rigger
//! package toolkit: the class-location manifest (autoloader), the route
//! compiler and route table, and the name grammar shared by both.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           rigger-cli (CLI)              │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  (AutoloaderService, RouterService)     │
//! │         Orchestrates Use Cases          │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │     (Driven: Filesystem, Parser)        │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      rigger-adapters (Infrastructure)   │
//! │ (LocalFilesystem, PhpSourceParser, etc) │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (Manifest, RouteTable, QualifiedName)   │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use rigger_core::domain::{Manifest, QualifiedName, RelativePath, RoutePatternCompiler};
//!
//! let mut manifest = Manifest::empty();
//! let users = QualifiedName::parse("controllers\\Users").unwrap();
//! manifest.merge_insert(RelativePath::try_new("controllers/Users.php").unwrap(), [users.clone()]);
//! assert!(manifest.class_exists(&users));
//!
//! let path = RoutePatternCompiler::compile("/users/:id").unwrap();
//! assert!(path.has_variables());
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        AutoloaderService, ControllerService, PackageLocator, RouteRequest, RouterService,
        ports::{Filesystem, ParseError, SourceParser},
    };
    pub use crate::domain::{
        ControllerRef, Manifest, NameRules, PackageName, QualifiedName, RelativePath, Route,
        RoutePatternCompiler, RouteTable,
    };
    pub use crate::error::{RiggerError, RiggerResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
