//! Error types for the k8ctl-proto crate.

use thiserror::Error;

/// Errors that can occur while encoding requests or decoding responses.
#[derive(Debug, Error)]
pub enum ProtoError {
    /// Failed to encode a request payload.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// Failed to decode a response envelope.
    #[error("decoding error: {0}")]
    Decoding(String),

    /// A route template needs a resource name that was not supplied.
    #[error("missing resource name for route {0}")]
    MissingName(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_name_display_includes_template() {
        let err = ProtoError::MissingName("/pods/{name}");
        assert_eq!(err.to_string(), "missing resource name for route /pods/{name}");
    }

    #[test]
    fn decoding_display() {
        let err = ProtoError::Decoding("expected value at line 1 column 1".into());
        assert!(err.to_string().starts_with("decoding error:"));
    }
}
