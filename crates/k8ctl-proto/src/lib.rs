//! # k8ctl-proto
//!
//! Wire contract between the `k8ctl` client and the k8ctl operations server.
//!
//! The server exposes one route per (resource kind, operation) pair. Every
//! request negotiates content with a versioned vendor media type and every
//! response, regardless of route, is the same two-field [`Envelope`].
//!
//! ```text
//! ┌───────────┐   GET /pods?n=dev&f=      ┌──────────────┐
//! │   k8ctl   │──────────────────────────►│ k8ctl-server │
//! │           │◄──────────────────────────│              │
//! └───────────┘  {"status","message"}     └──────────────┘
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod envelope;
pub mod error;
pub mod payload;
pub mod routes;
pub mod types;

pub use envelope::Envelope;
pub use error::ProtoError;
pub use payload::{DeployRequest, RestartRequest, RollbackRequest};
pub use routes::{QueryShape, Route, media_type, route, routes};
pub use types::{Method, Operation, ResourceKind, ResponseFormat};

/// Name the server advertises in its vendor media types.
pub const SERVER_NAME: &str = "k8ctl-server";

/// Client application name.
pub const APPLICATION_NAME: &str = "k8ctl";
