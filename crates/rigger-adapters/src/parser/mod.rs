//! Source parser adapters.

mod php;

pub use php::PhpSourceParser;
