//! JSON encoding shared by the autoloader and routing documents.
//!
//! The framework writes its own manifests with four-space indentation and
//! unescaped slashes; matching that keeps diffs clean when both tools touch
//! the same file.

use serde::{Serialize, de::DeserializeOwned};
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::domain::error::DomainError;

/// Encode `value` as pretty JSON with a trailing newline.
pub fn to_pretty_json<T: Serialize>(value: &T, document: &'static str) -> Result<String, DomainError> {
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    value.serialize(&mut ser).map_err(|e| DomainError::Encode {
        document,
        reason: e.to_string(),
    })?;
    buf.push(b'\n');
    String::from_utf8(buf).map_err(|e| DomainError::Encode {
        document,
        reason: e.to_string(),
    })
}

pub fn from_json<T: DeserializeOwned>(text: &str, document: &'static str) -> Result<T, DomainError> {
    serde_json::from_str(text).map_err(|e| DomainError::Decode {
        document,
        reason: e.to_string(),
    })
}
