//! Static route table.
//!
//! Each (resource kind, operation) pair maps to exactly one method, path
//! template and query shape. The table is data: dispatch code looks routes
//! up here instead of branching per operation.

use crate::SERVER_NAME;
use crate::error::ProtoError;
use crate::types::Method::{Delete, Get, Patch, Post, Put};
use crate::types::ResourceKind as K;
use crate::types::{Method, Operation, ResourceKind};

/// Placeholder substituted with the resource name.
pub const NAME_PLACEHOLDER: &str = "{name}";

/// Query parameters a route carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryShape {
    /// Sends the namespace as `n`.
    pub namespace: bool,
    /// Sends the response format as `f`, even when empty.
    pub format: bool,
}

impl QueryShape {
    /// No query string.
    pub const NONE: Self = Self {
        namespace: false,
        format: false,
    };
    /// `?n=<namespace>`
    pub const NAMESPACE: Self = Self {
        namespace: true,
        format: false,
    };
    /// `?n=<namespace>&f=<format>`
    pub const NAMESPACE_FORMAT: Self = Self {
        namespace: true,
        format: true,
    };
}

/// One entry of the route table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    /// Resource kind addressed by the route.
    pub kind: ResourceKind,
    /// Operation performed.
    pub operation: Operation,
    /// HTTP method.
    pub method: Method,
    /// Path template, relative to the endpoint base URL.
    pub template: &'static str,
    /// Query parameters carried.
    pub query: QueryShape,
}

impl Route {
    const fn new(
        kind: ResourceKind,
        operation: Operation,
        method: Method,
        template: &'static str,
        query: QueryShape,
    ) -> Self {
        Self {
            kind,
            operation,
            method,
            template,
            query,
        }
    }

    /// Whether the template contains a resource name placeholder.
    #[must_use]
    pub fn needs_name(&self) -> bool {
        self.template.contains(NAME_PLACEHOLDER)
    }

    /// Expands the template into unescaped path segments.
    ///
    /// The name is returned as a single segment; escaping happens when the
    /// segments are pushed onto a URL.
    pub fn segments<'a>(&self, name: Option<&'a str>) -> Result<Vec<&'a str>, ProtoError> {
        self.template
            .split('/')
            .filter(|segment| !segment.is_empty())
            .map(|segment| {
                if segment == NAME_PLACEHOLDER {
                    match name {
                        Some(name) if !name.is_empty() => Ok(name),
                        _ => Err(ProtoError::MissingName(self.template)),
                    }
                } else {
                    Ok(segment)
                }
            })
            .collect()
    }

    /// Vendor media type for this route's resource kind.
    #[must_use]
    pub fn media_type(&self) -> String {
        media_type(self.kind)
    }
}

static ROUTES: [Route; 24] = [
    // Releases
    Route::new(
        K::Release,
        Operation::List,
        Get,
        "/releases",
        QueryShape::NAMESPACE_FORMAT,
    ),
    Route::new(
        K::Release,
        Operation::Deploy,
        Post,
        "/releases",
        QueryShape::NONE,
    ),
    Route::new(
        K::Release,
        Operation::Status,
        Get,
        "/releases/{name}",
        QueryShape::NAMESPACE_FORMAT,
    ),
    Route::new(
        K::Release,
        Operation::Delete,
        Delete,
        "/releases/{name}",
        QueryShape::NAMESPACE,
    ),
    Route::new(
        K::Release,
        Operation::Rollback,
        Put,
        "/releases/{name}/rollback",
        QueryShape::NAMESPACE,
    ),
    Route::new(
        K::Release,
        Operation::History,
        Get,
        "/releases/{name}/history",
        QueryShape::NAMESPACE_FORMAT,
    ),
    // Deployments
    Route::new(
        K::Deployment,
        Operation::List,
        Get,
        "/deployments",
        QueryShape::NAMESPACE_FORMAT,
    ),
    Route::new(
        K::Deployment,
        Operation::Describe,
        Get,
        "/deployments/{name}",
        QueryShape::NAMESPACE,
    ),
    Route::new(
        K::Deployment,
        Operation::Restart,
        Patch,
        "/deployments/{name}/restart",
        QueryShape::NONE,
    ),
    // Read-only kinds
    Route::new(
        K::Pod,
        Operation::List,
        Get,
        "/pods",
        QueryShape::NAMESPACE_FORMAT,
    ),
    Route::new(
        K::Pod,
        Operation::Describe,
        Get,
        "/pods/{name}",
        QueryShape::NAMESPACE,
    ),
    Route::new(
        K::Job,
        Operation::List,
        Get,
        "/jobs",
        QueryShape::NAMESPACE_FORMAT,
    ),
    Route::new(
        K::Job,
        Operation::Describe,
        Get,
        "/jobs/{name}",
        QueryShape::NAMESPACE,
    ),
    Route::new(
        K::Cronjob,
        Operation::List,
        Get,
        "/cronjobs",
        QueryShape::NAMESPACE_FORMAT,
    ),
    Route::new(
        K::Cronjob,
        Operation::Describe,
        Get,
        "/cronjobs/{name}",
        QueryShape::NAMESPACE,
    ),
    Route::new(
        K::Ingress,
        Operation::List,
        Get,
        "/ingresses",
        QueryShape::NAMESPACE_FORMAT,
    ),
    Route::new(
        K::Ingress,
        Operation::Describe,
        Get,
        "/ingresses/{name}",
        QueryShape::NAMESPACE,
    ),
    Route::new(
        K::Service,
        Operation::List,
        Get,
        "/services",
        QueryShape::NAMESPACE_FORMAT,
    ),
    Route::new(
        K::Service,
        Operation::Describe,
        Get,
        "/services/{name}",
        QueryShape::NAMESPACE,
    ),
    Route::new(
        K::Configmap,
        Operation::List,
        Get,
        "/configmaps",
        QueryShape::NAMESPACE_FORMAT,
    ),
    Route::new(
        K::Configmap,
        Operation::Describe,
        Get,
        "/configmaps/{name}",
        QueryShape::NAMESPACE,
    ),
    Route::new(
        K::Secret,
        Operation::List,
        Get,
        "/secrets",
        QueryShape::NAMESPACE_FORMAT,
    ),
    Route::new(
        K::Secret,
        Operation::Describe,
        Get,
        "/secrets/{name}",
        QueryShape::NAMESPACE,
    ),
    // Other
    Route::new(K::Guide, Operation::Guide, Get, "/guide", QueryShape::NONE),
];

/// The full route table.
#[must_use]
pub fn routes() -> &'static [Route] {
    &ROUTES
}

/// Looks up the route for a (kind, operation) pair.
///
/// Returns `None` for pairs the server does not serve.
#[must_use]
pub fn route(kind: ResourceKind, operation: Operation) -> Option<&'static Route> {
    ROUTES
        .iter()
        .find(|route| route.kind == kind && route.operation == operation)
}

/// Versioned vendor media type for a resource kind, e.g.
/// `application/vnd.k8ctl-server.pods-v1.0.0+json`.
#[must_use]
pub fn media_type(kind: ResourceKind) -> String {
    format!(
        "application/vnd.{SERVER_NAME}.{}-{}+json",
        kind.plural(),
        kind.api_version()
    )
}
