use std::sync::LazyLock;

use regex::Regex;

use crate::domain::error::DomainError;

/// Separator between namespace segments of a qualified name.
pub const NAMESPACE_SEPARATOR: char = '\\';

static IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier pattern"));

/// Centralized name grammar.
///
/// Class names, namespaces, method names and package names all share one
/// identifier grammar; this is the only place it is spelled out.
pub struct NameRules;

impl NameRules {
    pub fn is_valid_identifier(name: &str) -> bool {
        IDENTIFIER.is_match(name)
    }

    /// With `allow_namespace`, every `\`-separated segment must be an
    /// identifier. Without it the whole string must be one identifier, which
    /// is how bare method and package names are checked.
    pub fn is_valid_qualified_name(name: &str, allow_namespace: bool) -> bool {
        if allow_namespace {
            name.split(NAMESPACE_SEPARATOR).all(Self::is_valid_identifier)
        } else {
            Self::is_valid_identifier(name)
        }
    }

    pub fn validate_identifier(name: &str) -> Result<(), DomainError> {
        if Self::is_valid_identifier(name) {
            Ok(())
        } else {
            Err(DomainError::BadIdentifier { name: name.into() })
        }
    }

    pub fn validate_package_name(name: &str) -> Result<(), DomainError> {
        if Self::is_valid_qualified_name(name, false) {
            Ok(())
        } else {
            Err(DomainError::BadPackageName { name: name.into() })
        }
    }

    /// Users type namespaces with either slash; manifests always store `\`.
    pub fn normalize_separators(name: &str) -> String {
        name.replace('/', "\\")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers() {
        assert!(NameRules::is_valid_identifier("abc_1"));
        assert!(NameRules::is_valid_identifier("_private"));
        assert!(NameRules::is_valid_identifier("Users"));
        assert!(!NameRules::is_valid_identifier("1abc"));
        assert!(!NameRules::is_valid_identifier(""));
        assert!(!NameRules::is_valid_identifier("a-b"));
        assert!(!NameRules::is_valid_identifier("a b"));
        assert!(!NameRules::is_valid_identifier("héllo"));
    }

    #[test]
    fn qualified_names_with_namespace() {
        assert!(NameRules::is_valid_qualified_name("A\\B\\C", true));
        assert!(NameRules::is_valid_qualified_name("Single", true));
        assert!(!NameRules::is_valid_qualified_name("A\\\\B", true));
        assert!(!NameRules::is_valid_qualified_name("\\A", true));
        assert!(!NameRules::is_valid_qualified_name("A\\1B", true));
    }

    #[test]
    fn qualified_names_without_namespace() {
        assert!(!NameRules::is_valid_qualified_name("A\\B\\C", false));
        assert!(NameRules::is_valid_qualified_name("index", false));
    }

    #[test]
    fn package_names_reject_namespaces() {
        assert!(NameRules::validate_package_name("blog").is_ok());
        assert_eq!(
            NameRules::validate_package_name("blog\\admin"),
            Err(DomainError::BadPackageName {
                name: "blog\\admin".into()
            })
        );
    }

    #[test]
    fn slashes_become_namespace_separators() {
        assert_eq!(
            NameRules::normalize_separators("controllers/admin/Users"),
            "controllers\\admin\\Users"
        );
    }
}
