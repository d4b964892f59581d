//! Core domain layer for Rigger.
//!
//! Pure logic over names, manifests and routes. Reading files, parsing PHP
//! and writing manifests back are handled via ports defined in the
//! application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No I/O**: No filesystem or external calls
//! - **Small dependency set**: std, thiserror, regex, serde
//! - **Values, not handles**: All domain objects are Clone + PartialEq
//!
// Public API - what the world sees
pub mod entities;
pub mod error;
pub mod json;
pub mod route_compiler;
pub mod scanner;
pub mod validation;
pub mod value_objects;

// Re-exports for convenience
pub use entities::{
    common::RelativePath,
    manifest::{Manifest, ManifestEntry},
    package::{PACKAGE_CONFIG_FILE, PackageConfig},
    route::{
        HttpMethods, NUMERIC_CONSTRAINT, PathSegment, Permission, Route, RoutePath,
        RoutePermissions, RouteTable,
    },
    source::{DeclarationKind, MethodDeclaration, SourceNode, TypeDeclaration},
};

pub use error::{DomainError, ErrorCategory};
pub use route_compiler::{CompiledPath, RoutePatternCompiler};
pub use scanner::{Declaration, DeclarationScanner};
pub use validation::{NAMESPACE_SEPARATOR, NameRules};
pub use value_objects::{ControllerRef, PackageName, QualifiedName, ROOT_NAMESPACE};

#[cfg(test)]
mod tests {
    use super::*;

    fn class(name: &str) -> SourceNode {
        SourceNode::Declaration(TypeDeclaration {
            kind: DeclarationKind::Class,
            name: name.into(),
            methods: vec![],
            start_line: 1,
            end_line: 3,
        })
    }

    // ========================================================================
    // Scanner → Manifest
    // ========================================================================

    #[test]
    fn scanned_declarations_are_found_by_lookup() {
        let file = RelativePath::try_new("controllers/Users.php").unwrap();
        let nodes = vec![
            SourceNode::Namespace {
                name: "packages\\blog\\controllers".into(),
                body: vec![],
            },
            class("Users"),
        ];

        let package = PackageName::new("blog").unwrap();
        let classes: Vec<QualifiedName> = DeclarationScanner::scan(&nodes, &file)
            .unwrap()
            .into_iter()
            .map(|d| d.name.strip_package_prefix(&package).unwrap())
            .collect();

        let mut manifest = Manifest::empty();
        manifest.merge_insert(file.clone(), classes);

        let users = QualifiedName::parse("controllers\\Users").unwrap();
        assert_eq!(manifest.lookup_file(&users), Some(&file));
        assert!(manifest.class_exists(&users));
    }

    #[test]
    fn manifest_survives_a_write_read_cycle() {
        let mut manifest = Manifest::empty();
        manifest.merge_insert(
            RelativePath::try_new("models/Post.php").unwrap(),
            [QualifiedName::parse("models\\Post").unwrap()],
        );

        let text = manifest.to_json().unwrap();
        assert_eq!(Manifest::from_json(&text).unwrap(), manifest);
    }

    // ========================================================================
    // Compiler → Route table
    // ========================================================================

    #[test]
    fn compiled_address_persists_as_route() {
        let path = RoutePatternCompiler::compile("/users/:id:int")
            .unwrap()
            .into_route_path();
        let mut table = RouteTable::empty();
        table.append(Route::new(path, "controllers\\Users@show"));

        let json = table.to_json().unwrap();
        assert!(json.contains(r#""type": "dynamic""#));
        assert!(json.contains(r#""regex": "/^\\d+$/""#));
        assert_eq!(RouteTable::from_json(&json).unwrap(), table);
    }

    #[test]
    fn controller_reference_accepts_slashes() {
        let reference = ControllerRef::parse("controllers/Users@index").unwrap();
        assert_eq!(reference.class().to_string(), "controllers\\Users");
        assert_eq!(reference.method(), "index");
    }

    #[test]
    fn categories() {
        assert_eq!(DomainError::EmptyAddress.category(), ErrorCategory::Validation);
        assert_eq!(
            DomainError::Decode {
                document: "autoloader",
                reason: "eof".into()
            }
            .category(),
            ErrorCategory::Corrupt
        );
    }
}
