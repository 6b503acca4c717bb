//! CLI error types.
//!
//! Every failure of a dispatch is one of these, returned whole to the
//! caller. Nothing here retries or exits the process.

use k8ctl_config::ConfigError;
use k8ctl_proto::ProtoError;
use thiserror::Error;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Cluster or credentials could not be resolved.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The request could not be built; nothing was sent.
    #[error("request build error: {0}")]
    RequestBuild(String),

    /// Connection, timeout or TLS failure.
    #[error("transport error: {0}")]
    Transport(String),

    /// The response body is not a valid envelope.
    #[error("decode error: {0}")]
    Decode(String),

    /// The envelope decoded but its status reports failure.
    #[error("server returned status {status}: {message}")]
    Application {
        /// Status field of the envelope.
        status: String,
        /// Message field of the envelope.
        message: String,
    },

    /// Invalid argument.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ProtoError> for CliError {
    fn from(err: ProtoError) -> Self {
        match err {
            ProtoError::Decoding(msg) => Self::Decode(msg),
            other => Self::RequestBuild(other.to_string()),
        }
    }
}
