//! PHP source parser backed by tree-sitter.
//!
//! Reduces a PHP syntax tree to the [`SourceNode`] shapes the autoloader
//! needs: namespaces and class, interface and trait declarations with their
//! methods. Declarations nested anywhere (inside functions, conditionals,
//! method bodies) are lifted to the enclosing namespace's node list in
//! document order. Anonymous classes have no name and are not reported.

use rigger_core::{
    application::ports::{ParseError, SourceParser},
    domain::{DeclarationKind, MethodDeclaration, SourceNode, TypeDeclaration},
};
use tracing::{debug, instrument};
use tree_sitter::{Node, Parser};

/// tree-sitter-php based implementation of [`SourceParser`].
///
/// `tree_sitter::Parser` is not `Sync`, so a parser is created per call.
#[derive(Debug, Clone, Copy, Default)]
pub struct PhpSourceParser;

impl PhpSourceParser {
    pub fn new() -> Self {
        Self
    }
}

impl SourceParser for PhpSourceParser {
    #[instrument(skip_all, fields(bytes = source.len()))]
    fn parse(&self, source: &str) -> Result<Vec<SourceNode>, ParseError> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_php::LANGUAGE_PHP.into())
            .map_err(|e| ParseError {
                line: 0,
                column: 0,
                message: format!("Failed to set language: {e}"),
            })?;

        let tree = parser.parse(source, None).ok_or_else(|| ParseError {
            line: 1,
            column: 1,
            message: "Failed to parse source code".into(),
        })?;

        let root = tree.root_node();
        if root.has_error() {
            return Err(syntax_error(root));
        }

        let mut nodes = Vec::new();
        collect(root, source.as_bytes(), &mut nodes);
        debug!(nodes = nodes.len(), "Source parsed");
        Ok(nodes)
    }
}

fn syntax_error(root: Node) -> ParseError {
    let node = first_error(root).unwrap_or(root);
    let position = node.start_position();
    let message = if node.is_missing() {
        format!("missing {}", node.kind())
    } else {
        "unexpected input".to_string()
    };
    ParseError {
        line: position.row + 1,
        column: position.column + 1,
        message,
    }
}

/// First error or missing node in document order.
fn first_error(node: Node) -> Option<Node> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    let found = node.children(&mut cursor).find_map(first_error);
    found
}

fn collect(node: Node, src: &[u8], out: &mut Vec<SourceNode>) {
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        match child.kind() {
            "namespace_definition" => {
                let name = child
                    .child_by_field_name("name")
                    .map(|n| text(n, src).to_string())
                    .unwrap_or_default();
                let mut body = Vec::new();
                if let Some(block) = child.child_by_field_name("body") {
                    collect(block, src, &mut body);
                }
                out.push(SourceNode::Namespace { name, body });
            }
            "class_declaration" | "interface_declaration" | "trait_declaration" => {
                if let Some(decl) = declaration(child, src) {
                    out.push(SourceNode::Declaration(decl));
                }
                // Method bodies may declare further types.
                collect(child, src, out);
            }
            _ => collect(child, src, out),
        }
    }
}

fn declaration(node: Node, src: &[u8]) -> Option<TypeDeclaration> {
    let kind = match node.kind() {
        "class_declaration" => DeclarationKind::Class,
        "interface_declaration" => DeclarationKind::Interface,
        "trait_declaration" => DeclarationKind::Trait,
        _ => return None,
    };
    let name = text(node.child_by_field_name("name")?, src).to_string();

    let mut methods = Vec::new();
    if let Some(body) = node.child_by_field_name("body") {
        let mut cursor = body.walk();
        for member in body.named_children(&mut cursor) {
            if member.kind() != "method_declaration" {
                continue;
            }
            if let Some(method_name) = member.child_by_field_name("name") {
                methods.push(MethodDeclaration {
                    name: text(method_name, src).to_string(),
                    start_line: member.start_position().row + 1,
                    end_line: member.end_position().row + 1,
                });
            }
        }
    }

    Some(TypeDeclaration {
        kind,
        name,
        methods,
        start_line: node.start_position().row + 1,
        end_line: node.end_position().row + 1,
    })
}

fn text<'a>(node: Node, src: &'a [u8]) -> &'a str {
    node.utf8_text(src).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> Vec<SourceNode> {
        PhpSourceParser::new().parse(source).unwrap()
    }

    fn declarations(nodes: &[SourceNode]) -> Vec<&TypeDeclaration> {
        let mut found = Vec::new();
        for node in nodes {
            match node {
                SourceNode::Declaration(decl) => found.push(decl),
                SourceNode::Namespace { body, .. } => found.extend(declarations(body)),
            }
        }
        found
    }

    #[test]
    fn statement_namespace_is_a_sibling() {
        let nodes = parse(
            "<?php\nnamespace packages\\blog\\controllers;\n\nclass Users {\n    public function index() {}\n}\n",
        );
        assert_eq!(nodes.len(), 2);
        assert_eq!(
            nodes[0],
            SourceNode::Namespace {
                name: "packages\\blog\\controllers".into(),
                body: vec![],
            }
        );
        let SourceNode::Declaration(users) = &nodes[1] else {
            panic!("expected a declaration, got {:?}", nodes[1]);
        };
        assert_eq!(users.kind, DeclarationKind::Class);
        assert_eq!(users.name, "Users");
        assert_eq!((users.start_line, users.end_line), (4, 6));
        assert!(users.has_method("index"));
        assert_eq!(users.methods[0].start_line, 5);
    }

    #[test]
    fn braced_namespaces_own_their_declarations() {
        let nodes = parse(
            "<?php\nnamespace a { interface I {} }\nnamespace b { trait T { function f() {} } }\n",
        );
        assert_eq!(nodes.len(), 2);
        let SourceNode::Namespace { name, body } = &nodes[1] else {
            panic!("expected a namespace");
        };
        assert_eq!(name, "b");
        let decls = declarations(body);
        assert_eq!(decls[0].kind, DeclarationKind::Trait);
        assert!(decls[0].has_method("f"));
    }

    #[test]
    fn nested_and_conditional_declarations_are_lifted() {
        let nodes = parse(
            "<?php\nif (true) {\n    class A {}\n}\nfunction make() { return new class {}; }\n",
        );
        let decls = declarations(&nodes);
        assert_eq!(decls.len(), 1);
        assert_eq!(decls[0].name, "A");
    }

    #[test]
    fn file_without_declarations() {
        assert!(declarations(&parse("<?php\necho 'hi';\n")).is_empty());
        assert!(parse("").is_empty());
    }

    #[test]
    fn syntax_error_reports_position() {
        let err = PhpSourceParser::new()
            .parse("<?php\nclass {\n")
            .unwrap_err();
        assert!(err.line >= 2, "line {}", err.line);
        assert!(err.column >= 1);
    }
}
