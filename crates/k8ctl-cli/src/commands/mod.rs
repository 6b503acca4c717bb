//! CLI command implementations.
//!
//! Each submodule implements a top-level command:
//! - [`release`] - Helm release management
//! - [`deployment`] - Deployment inspection and restarts
//! - [`resource`] - Pods, jobs, cronjobs, ingresses, services, configmaps, secrets
//! - [`guide`] - Server usage guide
//! - [`version`] - Local version string

pub mod deployment;
pub mod guide;
pub mod release;
pub mod resource;
pub mod version;

pub use deployment::DeploymentCommand;
pub use guide::GuideCommand;
pub use release::ReleaseCommand;
pub use resource::ResourceCommand;
pub use version::VersionCommand;
