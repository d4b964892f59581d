//! Domain value objects: QualifiedName, PackageName, ControllerRef.
//!
//! # Design
//!
//! These are pure value types with equality-by-value and no identity. Every
//! constructor validates against [`NameRules`], so holding one of these means
//! the grammar has already been checked.

use crate::domain::error::DomainError;
use crate::domain::validation::{NAMESPACE_SEPARATOR, NameRules};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// First segment of every fully qualified class name in the framework.
pub const ROOT_NAMESPACE: &str = "packages";

// ── QualifiedName ────────────────────────────────────────────────────────────

/// A namespace-segmented type name such as `controllers\Users`.
///
/// Equality is an exact, case-sensitive match of the segment sequence.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct QualifiedName {
    segments: Vec<String>,
}

impl QualifiedName {
    /// Parse the textual `\`-separated form.
    pub fn parse(name: &str) -> Result<Self, DomainError> {
        if name.is_empty() {
            return Err(DomainError::bad_qualified_name(name, "name is empty"));
        }
        Self::from_segments(name.split(NAMESPACE_SEPARATOR))
    }

    pub fn from_segments<I, S>(segments: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();
        if segments.is_empty() {
            return Err(DomainError::bad_qualified_name("", "name is empty"));
        }
        if let Some(bad) = segments.iter().find(|s| !NameRules::is_valid_identifier(s)) {
            return Err(DomainError::bad_qualified_name(
                segments.join("\\"),
                format!("segment '{bad}' is not an identifier"),
            ));
        }
        Ok(Self { segments })
    }

    /// Qualify `simple_name` with `namespace`; an empty namespace leaves the
    /// name unqualified.
    pub fn qualify(namespace: &str, simple_name: &str) -> Result<Self, DomainError> {
        if namespace.is_empty() {
            Self::parse(simple_name)
        } else {
            Self::parse(&format!("{namespace}{NAMESPACE_SEPARATOR}{simple_name}"))
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The last segment (the class name without its namespace).
    pub fn simple_name(&self) -> &str {
        self.segments.last().map(String::as_str).unwrap_or_default()
    }

    /// Everything before the simple name, joined with `\`.
    pub fn namespace(&self) -> String {
        self.segments[..self.segments.len() - 1].join("\\")
    }

    /// Strip the `packages\<package>\` prefix of a fully qualified name.
    ///
    /// Fails unless the name has at least three segments and the first two
    /// are exactly the root namespace and `package`.
    pub fn strip_package_prefix(&self, package: &PackageName) -> Result<Self, DomainError> {
        match self.segments.as_slice() {
            [root, owner, rest @ ..]
                if !rest.is_empty() && root == ROOT_NAMESPACE && owner == package.as_str() =>
            {
                Ok(Self {
                    segments: rest.to_vec(),
                })
            }
            _ => Err(DomainError::bad_qualified_name(
                self.to_string(),
                format!("expected the prefix {ROOT_NAMESPACE}\\{package}\\"),
            )),
        }
    }

    /// The inverse of [`Self::strip_package_prefix`].
    pub fn with_package_prefix(&self, package: &PackageName) -> Self {
        let mut segments = vec![ROOT_NAMESPACE.to_string(), package.as_str().to_string()];
        segments.extend(self.segments.iter().cloned());
        Self { segments }
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("\\"))
    }
}

impl FromStr for QualifiedName {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for QualifiedName {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<QualifiedName> for String {
    fn from(name: QualifiedName) -> Self {
        name.to_string()
    }
}

// ── PackageName ───────────────────────────────────────────────────────────────

/// Name of a package directory under the packages root.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackageName(String);

impl PackageName {
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        NameRules::validate_package_name(&name)?;
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PackageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for PackageName {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

// ── ControllerRef ─────────────────────────────────────────────────────────────

/// A `Class@method` reference to a controller action.
///
/// The class part is the package-relative ("summarized") name as stored in
/// the autoloader, e.g. `controllers\Users@index`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ControllerRef {
    class: QualifiedName,
    method: String,
}

impl ControllerRef {
    pub fn new(class: QualifiedName, method: impl Into<String>) -> Result<Self, DomainError> {
        let method = method.into();
        NameRules::validate_identifier(&method)?;
        Ok(Self { class, method })
    }

    /// Parse `Class@method`, accepting `/` as a namespace separator.
    pub fn parse(reference: &str) -> Result<Self, DomainError> {
        let normalized = NameRules::normalize_separators(reference);
        let malformed = |reason: String| DomainError::MalformedControllerRef {
            reference: reference.to_string(),
            reason,
        };

        let parts: Vec<&str> = normalized.split('@').collect();
        let [class, method] = parts.as_slice() else {
            return Err(malformed(format!(
                "expected exactly one '@', found {}",
                parts.len() - 1
            )));
        };

        let class = QualifiedName::parse(class).map_err(|e| malformed(e.to_string()))?;
        if !NameRules::is_valid_identifier(method) {
            return Err(malformed(format!("'{method}' is not a valid method name")));
        }

        Ok(Self {
            class,
            method: (*method).to_string(),
        })
    }

    pub fn class(&self) -> &QualifiedName {
        &self.class
    }

    pub fn method(&self) -> &str {
        &self.method
    }
}

impl fmt::Display for ControllerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.class, self.method)
    }
}

impl FromStr for ControllerRef {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pkg(name: &str) -> PackageName {
        PackageName::new(name).unwrap()
    }

    #[test]
    fn qualified_name_round_trips_through_text() {
        let name = QualifiedName::parse("controllers\\admin\\Users").unwrap();
        assert_eq!(name.segments().len(), 3);
        assert_eq!(name.simple_name(), "Users");
        assert_eq!(name.namespace(), "controllers\\admin");
        assert_eq!(name.to_string(), "controllers\\admin\\Users");
    }

    #[test]
    fn qualified_name_is_case_sensitive() {
        let a = QualifiedName::parse("controllers\\Foo").unwrap();
        let b = QualifiedName::parse("Controllers\\Foo").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn qualified_name_rejects_bad_segments() {
        assert!(QualifiedName::parse("").is_err());
        assert!(QualifiedName::parse("a\\\\b").is_err());
        assert!(QualifiedName::parse("a\\9b").is_err());
        assert!(QualifiedName::parse("a/b").is_err());
    }

    #[test]
    fn qualify_with_and_without_namespace() {
        assert_eq!(
            QualifiedName::qualify("", "Foo").unwrap().to_string(),
            "Foo"
        );
        assert_eq!(
            QualifiedName::qualify("packages\\blog", "Post")
                .unwrap()
                .to_string(),
            "packages\\blog\\Post"
        );
    }

    #[test]
    fn strip_package_prefix_keeps_the_remainder() {
        let name = QualifiedName::parse("packages\\blog\\controllers\\Posts").unwrap();
        let stripped = name.strip_package_prefix(&pkg("blog")).unwrap();
        assert_eq!(stripped.to_string(), "controllers\\Posts");
        assert_eq!(stripped.with_package_prefix(&pkg("blog")), name);
    }

    #[test]
    fn strip_package_prefix_failures() {
        let blog = pkg("blog");
        for name in [
            "packages\\blog",
            "packages\\shop\\Cart",
            "vendor\\blog\\Post",
            "Post",
        ] {
            let err = QualifiedName::parse(name)
                .unwrap()
                .strip_package_prefix(&blog)
                .unwrap_err();
            assert!(
                matches!(err, DomainError::BadQualifiedName { .. }),
                "unexpected error for {name}: {err:?}"
            );
        }
    }

    #[test]
    fn qualified_name_serializes_as_string() {
        let name = QualifiedName::parse("models\\Post").unwrap();
        let json = serde_json::to_string(&name).unwrap();
        assert_eq!(json, r#""models\\Post""#);
        let back: QualifiedName = serde_json::from_str(&json).unwrap();
        assert_eq!(back, name);
        assert!(serde_json::from_str::<QualifiedName>(r#""1bad""#).is_err());
    }

    #[test]
    fn controller_ref_parses() {
        let r = ControllerRef::parse("controllers/Users@index").unwrap();
        assert_eq!(r.class().to_string(), "controllers\\Users");
        assert_eq!(r.method(), "index");
        assert_eq!(r.to_string(), "controllers\\Users@index");
    }

    #[test]
    fn controller_ref_requires_exactly_one_at() {
        for bad in ["controllers\\Users", "a@b@c", "@index", "Users@", "Users@9x"] {
            assert!(
                matches!(
                    ControllerRef::parse(bad),
                    Err(DomainError::MalformedControllerRef { .. })
                ),
                "accepted {bad}"
            );
        }
    }

    #[test]
    fn package_names() {
        assert!(PackageName::new("blog").is_ok());
        assert!(PackageName::new("my-blog").is_err());
        assert!("shop".parse::<PackageName>().is_ok());
    }
}
