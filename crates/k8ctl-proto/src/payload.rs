//! JSON request bodies.
//!
//! Field names and order are part of the wire contract.

use serde::{Deserialize, Serialize};

use crate::error::ProtoError;

/// Body of a release deploy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeployRequest {
    /// Free text shown in notifications.
    pub memo: String,
    /// Application or chart name.
    pub name: String,
    /// Target namespace.
    pub namespace: String,
    /// Docker image tag.
    pub version_tag: String,
}

/// Body of a release rollback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollbackRequest {
    /// Revision to roll back to. Empty lets the server pick the previous one.
    pub revision: String,
}

/// Body of a deployment restart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestartRequest {
    /// Namespace the deployment runs in.
    pub namespace: String,
}

/// Serializes a payload to its JSON body.
pub fn to_body<T: Serialize>(payload: &T) -> Result<Vec<u8>, ProtoError> {
    serde_json::to_vec(payload).map_err(|e| ProtoError::Encoding(e.to_string()))
}
