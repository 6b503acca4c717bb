//! Cluster endpoint configuration for k8ctl.
//!
//! Reads a YAML file of named clusters and resolves one of them into the
//! [`Endpoint`] the dispatcher is built from:
//!
//! ```yaml
//! clusters:
//!   nyc:
//!     url: https://k8ctl.nyc.example.com
//!     auth_token: s3cr3t
//! ```

#![forbid(unsafe_code)]

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// File name searched for when no explicit path is given.
pub const CONFIG_FILE_STEM: &str = ".k8ctl";

/// Extensions tried, in order, for the default config file.
const CONFIG_EXTENSIONS: [&str; 2] = ["yaml", "yml"];

/// Errors raised while loading or resolving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No config file exists in any searched location.
    #[error("cannot find configuration file (searched: {searched})")]
    NotFound {
        /// Locations that were checked.
        searched: String,
    },

    /// The file exists but could not be read.
    #[error("failed to read config file '{path}': {source}")]
    Read {
        /// File that failed.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The file is not valid YAML for the expected shape.
    #[error("invalid config: {0}")]
    Parse(String),

    /// The selected cluster entry is incomplete.
    #[error("invalid cluster '{cluster}': {reason}")]
    Invalid {
        /// Cluster name.
        cluster: String,
        /// What is wrong with it.
        reason: String,
    },

    /// The requested cluster is not configured.
    #[error("cluster name {cluster} not found (configured: {known})")]
    ClusterNotFound {
        /// Requested cluster.
        cluster: String,
        /// Configured cluster names, comma separated.
        known: String,
    },
}

/// Base URL and bearer token of one cluster's operations server.
#[derive(Clone, PartialEq, Eq)]
pub struct Endpoint {
    url: String,
    token: String,
}

impl Endpoint {
    /// Creates an endpoint.
    #[must_use]
    pub fn new(url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            token: token.into(),
        }
    }

    /// Server base URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Bearer token.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }
}

impl fmt::Debug for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Endpoint")
            .field("url", &self.url)
            .field("token", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize)]
struct ClusterEntry {
    #[serde(default)]
    url: String,
    #[serde(default)]
    auth_token: String,
}

/// Parsed configuration file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    clusters: BTreeMap<String, ClusterEntry>,
}

impl Config {
    /// Loads the config from `explicit`, or from the first default location
    /// that exists: `$HOME/.k8ctl.{yaml,yml}`, then `./.k8ctl.{yaml,yml}`.
    pub fn discover(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        let candidates = default_candidates(dirs::home_dir().as_deref());
        match candidates.iter().find(|path| path.is_file()) {
            Some(path) => Self::from_file(path),
            None => Err(ConfigError::NotFound {
                searched: candidates
                    .iter()
                    .map(|p| p.display().to_string())
                    .collect::<Vec<_>>()
                    .join(", "),
            }),
        }
    }

    /// Loads configuration from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded config file");
        Self::from_yaml(&content)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        // An empty document is an empty config, not an error.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Resolves a cluster name to its endpoint.
    ///
    /// Only the requested entry is validated; a broken entry for another
    /// cluster does not affect this one.
    pub fn resolve(&self, cluster: &str) -> Result<Endpoint, ConfigError> {
        let entry = self
            .clusters
            .get(cluster)
            .ok_or_else(|| ConfigError::ClusterNotFound {
                cluster: cluster.to_string(),
                known: self.known_clusters(),
            })?;
        if entry.url.trim().is_empty() {
            return Err(ConfigError::Invalid {
                cluster: cluster.to_string(),
                reason: "url cannot be empty".into(),
            });
        }
        debug!(cluster, url = %entry.url, "resolved cluster");
        Ok(Endpoint::new(entry.url.clone(), entry.auth_token.clone()))
    }

    /// Configured cluster names, sorted.
    pub fn cluster_names(&self) -> impl Iterator<Item = &str> {
        self.clusters.keys().map(String::as_str)
    }

    fn known_clusters(&self) -> String {
        if self.clusters.is_empty() {
            return "none".into();
        }
        self.cluster_names().collect::<Vec<_>>().join(", ")
    }
}

fn default_candidates(home: Option<&Path>) -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    if let Some(home) = home {
        dirs.push(home.to_path_buf());
    }
    dirs.push(PathBuf::from("."));

    dirs.iter()
        .flat_map(|dir| {
            CONFIG_EXTENSIONS
                .iter()
                .map(move |ext| dir.join(format!("{CONFIG_FILE_STEM}.{ext}")))
        })
        .collect()
}
