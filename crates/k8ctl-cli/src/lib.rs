//! # k8ctl-cli
//!
//! Command-line client for a k8ctl operations server.
//!
//! Provides commands for:
//! - Helm release deploy, rollback, delete, status and history
//! - Listing and describing deployments, pods, jobs, cronjobs, ingresses,
//!   services, configmaps and secrets
//! - Restarting deployments
//!
//! # Architecture
//!
//! Every command goes through the [`client::Dispatcher`], which turns a
//! (resource kind, operation) pair into one authenticated HTTP request using
//! the route table from `k8ctl-proto`, then decodes the `{status, message}`
//! envelope the server answers with.
//!
//! ```text
//! ┌───────────┐   HTTP + vendor media type   ┌──────────────┐
//! │   k8ctl   │─────────────────────────────►│ k8ctl-server │
//! │           │◄─────────────────────────────│              │
//! └───────────┘       {status, message}      └──────────────┘
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cli;
pub mod client;
pub mod commands;
pub mod error;
pub mod output;
pub mod request;

pub use cli::{Cli, Commands, DeploymentCommands, Format, ReleaseCommands, ResourceCommands};
pub use client::Dispatcher;
pub use error::CliError;
pub use request::Call;
