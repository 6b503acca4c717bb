//! Core enumerations shared by the route table and the dispatcher.

use std::fmt;

/// A category of cluster object, or logical entity, addressable via the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// A helm release.
    Release,
    /// A deployment.
    Deployment,
    /// A running pod.
    Pod,
    /// A job.
    Job,
    /// A cronjob.
    Cronjob,
    /// An ingress.
    Ingress,
    /// A service.
    Service,
    /// A configmap.
    Configmap,
    /// A secret.
    Secret,
    /// The server-side usage guide.
    Guide,
}

impl ResourceKind {
    /// Plural name used both as the route root and the media type segment.
    #[must_use]
    pub const fn plural(self) -> &'static str {
        match self {
            Self::Release => "releases",
            Self::Deployment => "deployments",
            Self::Pod => "pods",
            Self::Job => "jobs",
            Self::Cronjob => "cronjobs",
            Self::Ingress => "ingresses",
            Self::Service => "services",
            Self::Configmap => "configmaps",
            Self::Secret => "secrets",
            Self::Guide => "guide",
        }
    }

    /// API version negotiated for this kind.
    ///
    /// Versions are tracked per kind so that one resource can move ahead
    /// without touching the others.
    #[must_use]
    pub const fn api_version(self) -> &'static str {
        match self {
            Self::Release => "v1.0.0",
            Self::Deployment => "v1.0.0",
            Self::Pod => "v1.0.0",
            Self::Job => "v1.0.0",
            Self::Cronjob => "v1.0.0",
            Self::Ingress => "v1.0.0",
            Self::Service => "v1.0.0",
            Self::Configmap => "v1.0.0",
            Self::Secret => "v1.0.0",
            Self::Guide => "v1.0.0",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.plural())
    }
}

/// A logical operation against a resource kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// List every resource of a kind in a namespace.
    List,
    /// Show the details of one resource.
    Describe,
    /// Deploy or refresh a release.
    Deploy,
    /// Delete a release.
    Delete,
    /// Roll a release back to a previous revision.
    Rollback,
    /// Show the revision history of a release.
    History,
    /// Show the status of a release.
    Status,
    /// Restart the pods of a deployment.
    Restart,
    /// Fetch the usage guide.
    Guide,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::List => "list",
            Self::Describe => "describe",
            Self::Deploy => "deploy",
            Self::Delete => "delete",
            Self::Rollback => "rollback",
            Self::History => "history",
            Self::Status => "status",
            Self::Restart => "restart",
            Self::Guide => "guide",
        };
        f.write_str(name)
    }
}

/// HTTP verbs used by the route table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `PATCH`
    Patch,
    /// `DELETE`
    Delete,
}

impl Method {
    /// Upper-case verb as sent on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rendering the server should apply to the `message` it returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseFormat {
    /// Server default, usually a pre-rendered text table.
    #[default]
    Text,
    /// JSON text.
    Json,
    /// YAML text.
    Yaml,
}

impl ResponseFormat {
    /// Value sent as the `f` query parameter. Empty means server default.
    #[must_use]
    pub const fn query_value(self) -> &'static str {
        match self {
            Self::Text => "",
            Self::Json => "json",
            Self::Yaml => "yaml",
        }
    }
}
