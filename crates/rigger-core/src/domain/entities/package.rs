use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::{entities::common::RelativePath, error::DomainError, json};

/// Name of the descriptor file at the root of every package.
pub const PACKAGE_CONFIG_FILE: &str = "package.json";

/// The parts of `package.json` that locate a package's manifests.
///
/// Keys such as `dependencies` or `languages` are kept in `extra` and never
/// interpreted here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageConfig {
    /// Package-relative path of the autoloader file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autoload: Option<RelativePath>,
    /// Package-relative path of the routing file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub routing: Option<RelativePath>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PackageConfig {
    pub fn from_json(text: &str) -> Result<Self, DomainError> {
        json::from_json(text, PACKAGE_CONFIG_FILE)
    }
}
