//! The uniform response envelope.
//!
//! Every endpoint answers with `{"status": "...", "message": "..."}`. The
//! envelope is decoded strictly: both fields must be present strings and no
//! other fields are accepted.

use serde::{Deserialize, Serialize};

use crate::error::ProtoError;

/// Statuses the server uses to signal failure.
const FAILURE_STATUSES: [&str; 4] = ["error", "fail", "failed", "failure"];

/// Response envelope returned by every route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Envelope {
    /// Success or failure as reported by the server.
    pub status: String,
    /// Human-readable payload or formatted error text.
    pub message: String,
}

impl Envelope {
    /// Decodes an envelope from a raw response body.
    ///
    /// Only a JSON object is accepted, never a positional array.
    pub fn from_slice(body: &[u8]) -> Result<Self, ProtoError> {
        let value: serde_json::Value =
            serde_json::from_slice(body).map_err(|e| ProtoError::Decoding(e.to_string()))?;
        if !value.is_object() {
            return Err(ProtoError::Decoding(format!(
                "expected a JSON object, found {}",
                json_type(&value)
            )));
        }
        serde_json::from_value(value).map_err(|e| ProtoError::Decoding(e.to_string()))
    }

    /// Whether `status` reports success.
    ///
    /// Failure is one of the well-known failure words (case-insensitive) or
    /// a numeric HTTP-style code of 400 and above. Anything else is success.
    #[must_use]
    pub fn is_success(&self) -> bool {
        let status = self.status.trim();
        if FAILURE_STATUSES
            .iter()
            .any(|failure| status.eq_ignore_ascii_case(failure))
        {
            return false;
        }
        !matches!(status.parse::<u16>(), Ok(code) if code >= 400)
    }
}

fn json_type(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn decodes_sample_envelope() {
        let envelope = Envelope::from_slice(br#"{"status":"ok","message":"hello"}"#)
            .expect("should decode");
        assert_eq!(envelope.status, "ok");
        assert_eq!(envelope.message, "hello");
    }

    #[test]
    fn message_is_not_transformed() {
        let body = br#"{"status":"200","message":"NAME\tREADY\n  web\t1/1\n"}"#;
        let envelope = Envelope::from_slice(body).expect("should decode");
        assert_eq!(envelope.message, "NAME\tREADY\n  web\t1/1\n");
    }

    #[test_case(b"not json" ; "plain text")]
    #[test_case(b"" ; "empty body")]
    #[test_case(b"<html>502 Bad Gateway</html>" ; "html")]
    #[test_case(br#"{"status":"ok"}"# ; "missing message")]
    #[test_case(br#"{"message":"hi"}"# ; "missing status")]
    #[test_case(br#"{"status":null,"message":"hi"}"# ; "null status")]
    #[test_case(br#"{"status":"ok","message":"hi","extra":1}"# ; "unknown field")]
    #[test_case(br#"["ok","hi"]"# ; "array")]
    #[test_case(br#""ok""# ; "bare string")]
    #[test_case(b"null" ; "null body")]
    fn rejects_malformed_bodies(body: &[u8]) {
        assert!(matches!(
            Envelope::from_slice(body),
            Err(ProtoError::Decoding(_))
        ));
    }

    #[test]
    fn array_envelope_names_what_was_found() {
        let err = Envelope::from_slice(br#"["ok","hello"]"#).expect_err("array is not an envelope");
        assert_eq!(
            err.to_string(),
            ProtoError::Decoding("expected a JSON object, found an array".into()).to_string()
        );
    }

    #[test_case("ok", true)]
    #[test_case("OK", true ; "upper case ok")]
    #[test_case("success", true)]
    #[test_case("200", true)]
    #[test_case("", true ; "empty status")]
    #[test_case("error", false)]
    #[test_case(" Failed ", false ; "padded mixed case")]
    #[test_case("failure", false)]
    #[test_case("404", false)]
    #[test_case("500", false)]
    fn success_rule(status: &str, success: bool) {
        let envelope = Envelope {
            status: status.into(),
            message: String::new(),
        };
        assert_eq!(envelope.is_success(), success);
    }
}
