//! Parsed-source tree as produced by a [`SourceParser`].
//!
//! Only the node kinds the manifests care about are modelled; everything else
//! in a source file is flattened away by the parser adapter. The set is
//! closed, so traversals match on it exhaustively.
//!
//! [`SourceParser`]: crate::application::ports::SourceParser

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceNode {
    /// `namespace a\b;` or `namespace a\b { ... }`. The statement form has an
    /// empty body; the declarations that follow it are its siblings.
    Namespace { name: String, body: Vec<SourceNode> },
    Declaration(TypeDeclaration),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclarationKind {
    Class,
    Interface,
    Trait,
}

impl DeclarationKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Interface => "interface",
            Self::Trait => "trait",
        }
    }
}

impl fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A class, interface or trait declaration.
///
/// Line numbers are 1-based. Generators use `end_line` to find where a new
/// method can be spliced in before the closing brace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDeclaration {
    pub kind: DeclarationKind,
    pub name: String,
    pub methods: Vec<MethodDeclaration>,
    pub start_line: usize,
    pub end_line: usize,
}

impl TypeDeclaration {
    pub fn has_method(&self, name: &str) -> bool {
        self.methods.iter().any(|m| m.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDeclaration {
    pub name: String,
    pub start_line: usize,
    pub end_line: usize,
}
