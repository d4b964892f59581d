// ============================================================================
// domain/error.rs - GRAMMAR AND COMPILE ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (they travel inside `RiggerError`)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Name grammar violations
    // ========================================================================
    #[error("'{name}' is not a valid identifier: expected [A-Za-z_][A-Za-z0-9_]*")]
    BadIdentifier { name: String },

    #[error("'{name}' is not a valid qualified name: {reason}")]
    BadQualifiedName { name: String, reason: String },

    #[error("'{name}' is not a valid package name")]
    BadPackageName { name: String },

    #[error("'{reference}' is not a controller reference: {reason}")]
    MalformedControllerRef { reference: String, reason: String },

    #[error("'{path}' is not a package-relative path: {reason}")]
    BadRelativePath { path: String, reason: String },

    // ========================================================================
    // Route compilation
    // ========================================================================
    #[error("address is empty")]
    EmptyAddress,

    #[error("duplicate variable in the address: {name}")]
    DuplicateRouteVariable { name: String },

    // ========================================================================
    // Document decoding
    // ========================================================================
    #[error("cannot decode {document}: {reason}")]
    Decode {
        document: &'static str,
        reason: String,
    },

    #[error("cannot encode {document}: {reason}")]
    Encode {
        document: &'static str,
        reason: String,
    },
}

impl DomainError {
    pub(crate) fn bad_qualified_name(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::BadQualifiedName {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::BadIdentifier { .. } | Self::BadPackageName { .. } => vec![
                "Identifiers start with a letter or underscore".into(),
                "Only letters, digits and underscores may follow".into(),
            ],
            Self::BadQualifiedName { name, .. } => vec![
                format!("Check every '\\'-separated segment of '{name}'"),
                "Use '/' or '\\' between namespace segments, e.g. controllers/Users".into(),
            ],
            Self::MalformedControllerRef { .. } => vec![
                "Write controllers as Class@method, e.g. controllers\\Users@index".into(),
                "Exactly one '@' is allowed".into(),
            ],
            Self::EmptyAddress => vec![
                "Give the route at least one segment, e.g. /users".into(),
            ],
            Self::DuplicateRouteVariable { name } => vec![
                format!("Rename one of the ':{name}' segments"),
                "Variable names must be unique within a single address".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Decode { .. } | Self::Encode { .. } => ErrorCategory::Corrupt,
            _ => ErrorCategory::Validation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Corrupt,
}
