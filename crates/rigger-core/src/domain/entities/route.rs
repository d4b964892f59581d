//! Routing table entities.
//!
//! A routing file is a JSON array of routes:
//!
//! ```json
//! [
//!     { "path": "blog", "controller": "controllers\\Posts@index" },
//!     {
//!         "path": ["blog", { "type": "dynamic", "name": "id", "regex": "/^\\d+$/" }],
//!         "controller": "controllers\\Posts@view",
//!         "method": ["get", "post"],
//!         "permissions": { "api": true }
//!     }
//! ]
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::{error::DomainError, json};

const DOCUMENT: &str = "routing table";

/// PCRE constraint written for `:name:int` segments.
pub const NUMERIC_CONSTRAINT: &str = r"/^\d+$/";

// ── PathSegment ───────────────────────────────────────────────────────────────

/// One `/`-delimited piece of a compiled address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "SegmentRepr", into = "SegmentRepr")]
pub enum PathSegment {
    Literal(String),
    Variable(String),
    /// Captures the remaining address tail when the route is evaluated.
    Wildcard(String),
    TypedVariable { name: String, constraint: String },
}

impl PathSegment {
    /// Variable name for every non-literal segment.
    pub fn variable_name(&self) -> Option<&str> {
        match self {
            Self::Literal(_) => None,
            Self::Variable(name) | Self::Wildcard(name) => Some(name),
            Self::TypedVariable { name, .. } => Some(name),
        }
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, Self::Literal(_))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum SegmentRepr {
    Literal(String),
    Dynamic(DynamicRepr),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct DynamicRepr {
    #[serde(rename = "type")]
    kind: DynamicKind,
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    regex: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum DynamicKind {
    Dynamic,
    Wildcard,
}

impl From<SegmentRepr> for PathSegment {
    fn from(repr: SegmentRepr) -> Self {
        match repr {
            SegmentRepr::Literal(text) => Self::Literal(text),
            SegmentRepr::Dynamic(DynamicRepr {
                kind: DynamicKind::Wildcard,
                name,
                ..
            }) => Self::Wildcard(name),
            SegmentRepr::Dynamic(DynamicRepr {
                kind: DynamicKind::Dynamic,
                name,
                regex: Some(constraint),
            }) => Self::TypedVariable { name, constraint },
            SegmentRepr::Dynamic(DynamicRepr {
                kind: DynamicKind::Dynamic,
                name,
                regex: None,
            }) => Self::Variable(name),
        }
    }
}

impl From<PathSegment> for SegmentRepr {
    fn from(segment: PathSegment) -> Self {
        let dynamic = |kind: DynamicKind, name: String, regex: Option<String>| {
            SegmentRepr::Dynamic(DynamicRepr { kind, name, regex })
        };
        match segment {
            PathSegment::Literal(text) => SegmentRepr::Literal(text),
            PathSegment::Variable(name) => dynamic(DynamicKind::Dynamic, name, None),
            PathSegment::Wildcard(name) => dynamic(DynamicKind::Wildcard, name, None),
            PathSegment::TypedVariable { name, constraint } => {
                dynamic(DynamicKind::Dynamic, name, Some(constraint))
            }
        }
    }
}

// ── RoutePath ─────────────────────────────────────────────────────────────────

/// Persisted path: a plain string when every segment is literal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RoutePath {
    Literal(String),
    Segments(Vec<PathSegment>),
}

// ── Route ─────────────────────────────────────────────────────────────────────

/// HTTP method restriction: one method or a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HttpMethods {
    One(String),
    Many(Vec<String>),
}

/// `api` / `ajax` permission: a flag, or a separate controller handling
/// that kind of request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Permission {
    Flag(bool),
    Controller(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutePermissions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api: Option<Permission>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ajax: Option<Permission>,
}

impl RoutePermissions {
    pub fn is_empty(&self) -> bool {
        self.api.is_none() && self.ajax.is_none()
    }
}

/// One routing rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    pub path: RoutePath,
    pub controller: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<HttpMethods>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub absolute: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<RoutePermissions>,
    /// Keys this tool does not manage (set by hand or by other tooling) are
    /// carried through a rewrite untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Route {
    pub fn new(path: RoutePath, controller: impl Into<String>) -> Self {
        Self {
            path,
            controller: controller.into(),
            method: None,
            absolute: None,
            permissions: None,
            extra: Map::new(),
        }
    }
}

// ── RouteTable ────────────────────────────────────────────────────────────────

/// Ordered list of routes. Persisted order is call order; the framework's
/// router checks routes first to last.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_json(text: &str) -> Result<Self, DomainError> {
        json::from_json(text, DOCUMENT)
    }

    pub fn to_json(&self) -> Result<String, DomainError> {
        json::to_pretty_json(self, DOCUMENT)
    }

    /// Append without de-duplication.
    pub fn append(&mut self, route: Route) {
        self.routes.push(route);
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
