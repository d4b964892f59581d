//! Address compilation: `/users/:id/posts/:postId:int` → [`PathSegment`]s.
//!
//! | Segment        | Compiles to                         |
//! |----------------|-------------------------------------|
//! | `:name`        | `Variable(name)`                    |
//! | `:name...`     | `Wildcard(name)`                    |
//! | `:name:int`    | `TypedVariable(name, /^\d+$/)`      |
//! | anything else  | `Literal(text)`                     |

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::domain::{
    entities::route::{NUMERIC_CONSTRAINT, PathSegment, RoutePath},
    error::DomainError,
};

static VARIABLE_SEGMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^:([A-Za-z0-9_\-]+)(:int|\.\.\.)?$").expect("variable segment pattern")
});

/// The segments of one compiled address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledPath {
    segments: Vec<PathSegment>,
}

impl CompiledPath {
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn has_variables(&self) -> bool {
        self.segments.iter().any(|s| !s.is_literal())
    }

    /// Variable names in address order.
    pub fn variables(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(PathSegment::variable_name)
    }

    /// Persisted form: a joined string when every segment is literal.
    pub fn into_route_path(self) -> RoutePath {
        if self.has_variables() {
            return RoutePath::Segments(self.segments);
        }
        let joined = self
            .segments
            .into_iter()
            .filter_map(|s| match s {
                PathSegment::Literal(text) => Some(text),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("/");
        RoutePath::Literal(joined)
    }
}

pub struct RoutePatternCompiler;

impl RoutePatternCompiler {
    /// Compile an address.
    ///
    /// Leading slashes are ignored. Fails on an address with no segments and
    /// as soon as a variable name repeats.
    pub fn compile(address: &str) -> Result<CompiledPath, DomainError> {
        let parts: Vec<&str> = address
            .split('/')
            .skip_while(|part| part.is_empty())
            .collect();
        if parts.is_empty() {
            return Err(DomainError::EmptyAddress);
        }

        let mut seen = HashSet::new();
        let mut segments = Vec::with_capacity(parts.len());
        for part in parts {
            let segment = classify(part);
            if let Some(name) = segment.variable_name() {
                if !seen.insert(name.to_string()) {
                    return Err(DomainError::DuplicateRouteVariable { name: name.into() });
                }
            }
            segments.push(segment);
        }

        Ok(CompiledPath { segments })
    }
}

fn classify(part: &str) -> PathSegment {
    let Some(caps) = VARIABLE_SEGMENT.captures(part) else {
        return PathSegment::Literal(part.to_string());
    };
    let name = caps[1].to_string();
    match caps.get(2).map(|m| m.as_str()) {
        Some("...") => PathSegment::Wildcard(name),
        Some(":int") => PathSegment::TypedVariable {
            name,
            constraint: NUMERIC_CONSTRAINT.to_string(),
        },
        _ => PathSegment::Variable(name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_distinct_variables() {
        let path = RoutePatternCompiler::compile("/users/:id/posts/:postId").unwrap();
        assert_eq!(
            path.segments(),
            [
                PathSegment::Literal("users".into()),
                PathSegment::Variable("id".into()),
                PathSegment::Literal("posts".into()),
                PathSegment::Variable("postId".into()),
            ]
        );
        assert_eq!(path.variables().collect::<Vec<_>>(), ["id", "postId"]);
    }

    #[test]
    fn repeated_variable_fails() {
        assert_eq!(
            RoutePatternCompiler::compile("/users/:id/posts/:id"),
            Err(DomainError::DuplicateRouteVariable { name: "id".into() })
        );
    }

    #[test]
    fn repeats_across_kinds_also_fail() {
        assert!(RoutePatternCompiler::compile("/:a/:a...").is_err());
        assert!(RoutePatternCompiler::compile("/:a:int/:a").is_err());
    }

    #[test]
    fn empty_addresses() {
        for address in ["", "/", "///"] {
            assert_eq!(
                RoutePatternCompiler::compile(address),
                Err(DomainError::EmptyAddress),
                "address {address:?}"
            );
        }
    }

    #[test]
    fn literal_only_collapses_to_string() {
        let path = RoutePatternCompiler::compile("/a/b/c").unwrap();
        assert_eq!(path.segments().len(), 3);
        assert!(!path.has_variables());
        assert_eq!(path.into_route_path(), RoutePath::Literal("a/b/c".into()));
    }

    #[test]
    fn wildcard_and_typed_segments() {
        let path = RoutePatternCompiler::compile("files/:page:int/:rest...").unwrap();
        assert_eq!(
            path.segments(),
            [
                PathSegment::Literal("files".into()),
                PathSegment::TypedVariable {
                    name: "page".into(),
                    constraint: NUMERIC_CONSTRAINT.into(),
                },
                PathSegment::Wildcard("rest".into()),
            ]
        );
        assert!(matches!(path.into_route_path(), RoutePath::Segments(_)));
    }

    #[test]
    fn near_misses_stay_literal() {
        let path = RoutePatternCompiler::compile("/:/:a:str/a:b/:x..").unwrap();
        assert!(path.segments().iter().all(PathSegment::is_literal));
    }

    #[test]
    fn only_leading_empty_segments_are_dropped() {
        let path = RoutePatternCompiler::compile("//a//b/").unwrap();
        assert_eq!(path.into_route_path(), RoutePath::Literal("a//b/".into()));
    }
}
