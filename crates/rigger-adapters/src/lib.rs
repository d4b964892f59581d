//! Infrastructure adapters for Rigger.
//!
//! This crate implements the ports defined in `rigger-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod filesystem;
pub mod parser;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use parser::PhpSourceParser;
