//! Declaration scanning over a parsed-source tree.
//!
//! Walks [`SourceNode`]s depth-first, pre-order, and reports every class,
//! interface and trait qualified with the namespace in effect at that point.

use crate::domain::{
    entities::{
        common::RelativePath,
        source::{DeclarationKind, SourceNode, TypeDeclaration},
    },
    error::DomainError,
    value_objects::QualifiedName,
};

/// A declared type and the file it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub name: QualifiedName,
    pub kind: DeclarationKind,
    pub file: RelativePath,
}

pub struct DeclarationScanner;

impl DeclarationScanner {
    /// Every declaration in `nodes`, in document order.
    ///
    /// A namespace node replaces the current namespace rather than nesting
    /// inside it, matching the one-namespace-per-file convention. A file
    /// without declarations yields an empty list.
    pub fn scan(nodes: &[SourceNode], file: &RelativePath) -> Result<Vec<Declaration>, DomainError> {
        let mut namespace = String::new();
        let mut found = Vec::new();
        visit(nodes, file, &mut namespace, &mut found)?;
        Ok(found)
    }

    /// First class (not interface or trait) named exactly `simple_name`.
    pub fn find_class<'a>(nodes: &'a [SourceNode], simple_name: &str) -> Option<&'a TypeDeclaration> {
        nodes.iter().find_map(|node| match node {
            SourceNode::Declaration(decl)
                if decl.kind == DeclarationKind::Class && decl.name == simple_name =>
            {
                Some(decl)
            }
            SourceNode::Declaration(_) => None,
            SourceNode::Namespace { body, .. } => Self::find_class(body, simple_name),
        })
    }
}

fn visit(
    nodes: &[SourceNode],
    file: &RelativePath,
    namespace: &mut String,
    found: &mut Vec<Declaration>,
) -> Result<(), DomainError> {
    for node in nodes {
        match node {
            SourceNode::Namespace { name, body } => {
                namespace.clone_from(name);
                visit(body, file, namespace, found)?;
            }
            SourceNode::Declaration(decl) => {
                found.push(Declaration {
                    name: QualifiedName::qualify(namespace, &decl.name)?,
                    kind: decl.kind,
                    file: file.clone(),
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decl(kind: DeclarationKind, name: &str, methods: &[&str]) -> SourceNode {
        SourceNode::Declaration(TypeDeclaration {
            kind,
            name: name.into(),
            methods: methods
                .iter()
                .enumerate()
                .map(|(i, m)| crate::domain::entities::source::MethodDeclaration {
                    name: (*m).into(),
                    start_line: i + 2,
                    end_line: i + 2,
                })
                .collect(),
            start_line: 1,
            end_line: methods.len() + 2,
        })
    }

    fn ns(name: &str, body: Vec<SourceNode>) -> SourceNode {
        SourceNode::Namespace {
            name: name.into(),
            body,
        }
    }

    fn file() -> RelativePath {
        RelativePath::try_new("controllers/Users.php").unwrap()
    }

    fn names(decls: &[Declaration]) -> Vec<String> {
        decls.iter().map(|d| d.name.to_string()).collect()
    }

    #[test]
    fn empty_file_yields_nothing() {
        assert!(DeclarationScanner::scan(&[], &file()).unwrap().is_empty());
    }

    #[test]
    fn statement_namespace_qualifies_following_siblings() {
        let nodes = vec![
            ns("packages\\blog\\controllers", vec![]),
            decl(DeclarationKind::Class, "Users", &[]),
            decl(DeclarationKind::Interface, "Listable", &[]),
            decl(DeclarationKind::Trait, "Paginates", &[]),
        ];
        let found = DeclarationScanner::scan(&nodes, &file()).unwrap();
        assert_eq!(
            names(&found),
            [
                "packages\\blog\\controllers\\Users",
                "packages\\blog\\controllers\\Listable",
                "packages\\blog\\controllers\\Paginates",
            ]
        );
        assert_eq!(found[1].kind, DeclarationKind::Interface);
        assert!(found.iter().all(|d| d.file == file()));
    }

    #[test]
    fn declarations_before_any_namespace_are_unqualified() {
        let nodes = vec![
            decl(DeclarationKind::Class, "Global", &[]),
            ns("a", vec![]),
            decl(DeclarationKind::Class, "Inner", &[]),
        ];
        let found = DeclarationScanner::scan(&nodes, &file()).unwrap();
        assert_eq!(names(&found), ["Global", "a\\Inner"]);
    }

    #[test]
    fn later_namespace_replaces_earlier_one() {
        let nodes = vec![
            ns("a", vec![decl(DeclarationKind::Class, "One", &[])]),
            ns("b\\c", vec![decl(DeclarationKind::Class, "Two", &[])]),
        ];
        let found = DeclarationScanner::scan(&nodes, &file()).unwrap();
        assert_eq!(names(&found), ["a\\One", "b\\c\\Two"]);
    }

    #[test]
    fn find_class_skips_interfaces_and_traits() {
        let nodes = vec![ns(
            "x",
            vec![
                decl(DeclarationKind::Interface, "Users", &[]),
                decl(DeclarationKind::Class, "Users", &["index"]),
                decl(DeclarationKind::Class, "Users", &["other"]),
            ],
        )];
        let found = DeclarationScanner::find_class(&nodes, "Users").unwrap();
        assert_eq!(found.kind, DeclarationKind::Class);
        assert!(found.has_method("index"));
        assert!(!found.has_method("other"));
        assert!(DeclarationScanner::find_class(&nodes, "Missing").is_none());
    }
}
