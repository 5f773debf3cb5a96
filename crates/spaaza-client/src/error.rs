//! Client error types.

use serde_json::Value;
use thiserror::Error;

use crate::types::ErrorDetail;

/// Client error type.
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP transport failed (DNS, TLS, timeout, connection refused).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// URL parsing failed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A caller-supplied value failed to serialize.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Response body was not valid JSON. The raw body is retained for
    /// diagnostics.
    #[error("Invalid JSON response in API call: {body}")]
    Decode {
        /// The raw, unparsed response body.
        body: String,
        /// The underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// Server reported an application error in the response envelope.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Check if this is a server-reported application error.
    pub fn is_api_error(&self) -> bool {
        matches!(self, Error::Api(_))
    }

    /// Check if this is a transport-level failure.
    pub fn is_transport_error(&self) -> bool {
        matches!(self, Error::Http(_))
    }

    /// The server-reported error, if that is what this is.
    pub fn as_api_error(&self) -> Option<&ApiError> {
        match self {
            Error::Api(err) => Some(err),
            _ => None,
        }
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// A server-reported application error.
///
/// Built from the first entry of the envelope's `error`/`errors` map. The
/// entry key is the machine-readable code; `name` and `description` come
/// from the entry body, with any `extrainfo.msg` appended to the
/// description.
#[derive(Debug, Clone, Error)]
#[error("{name}: {description}")]
pub struct ApiError {
    code: String,
    name: String,
    description: String,
}

impl ApiError {
    pub(crate) fn new(code: impl Into<String>, detail: ErrorDetail) -> Self {
        let mut description = detail.description;
        if let Some(extra) = detail.extrainfo {
            if !extra.msg.is_empty() {
                description.push_str(" - ");
                description.push_str(&extra.msg);
            }
        }
        Self {
            code: code.into(),
            name: detail.name,
            description,
        }
    }

    /// Build an error from a non-empty `error`/`errors` envelope field.
    ///
    /// The field is expected to be a map keyed by error code; the first
    /// entry in wire order wins. Anything else still produces an error,
    /// with code `unknown`, rather than failing the normalization.
    pub(crate) fn from_envelope(field: &Value) -> Self {
        let Some(map) = field.as_object() else {
            return Self::unknown(field);
        };
        match map.iter().next() {
            Some((code, detail)) => {
                match serde_json::from_value::<ErrorDetail>(detail.clone()) {
                    Ok(detail) => Self::new(code, detail),
                    Err(_) => Self::unknown(detail),
                }
            }
            None => Self::unknown(field),
        }
    }

    fn unknown(detail: &Value) -> Self {
        Self {
            code: "unknown".to_string(),
            name: "unknown".to_string(),
            description: detail.to_string(),
        }
    }

    /// Machine-readable error code.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Human-readable error name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Error description, including any extra-info message.
    pub fn description(&self) -> &str {
        &self.description
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_from_envelope_takes_first_entry() {
        let field = json!({
            "42": {"name": "BadInput", "description": "missing field"},
            "43": {"name": "Other", "description": "other"},
        });
        let err = ApiError::from_envelope(&field);
        assert_eq!(err.code(), "42");
        assert_eq!(err.name(), "BadInput");
        assert_eq!(err.description(), "missing field");
    }

    #[test]
    fn test_extrainfo_message_appended() {
        let field = json!({
            "7": {
                "name": "VoucherError",
                "description": "cannot claim",
                "extrainfo": {"msg": "already claimed"},
            }
        });
        let err = ApiError::from_envelope(&field);
        assert_eq!(err.description(), "cannot claim - already claimed");
        assert_eq!(err.to_string(), "VoucherError: cannot claim - already claimed");
    }

    #[test]
    fn test_empty_extrainfo_message_ignored() {
        let field = json!({
            "7": {
                "name": "VoucherError",
                "description": "cannot claim",
                "extrainfo": {"msg": ""},
            }
        });
        let err = ApiError::from_envelope(&field);
        assert_eq!(err.description(), "cannot claim");
    }

    #[test]
    fn test_display_format() {
        let field = json!({"42": {"name": "BadInput", "description": "missing field"}});
        let err = ApiError::from_envelope(&field);
        assert_eq!(err.to_string(), "BadInput: missing field");
    }

    #[test]
    fn test_unexpected_shape_falls_back_to_unknown() {
        let err = ApiError::from_envelope(&json!("went wrong"));
        assert_eq!(err.code(), "unknown");
        assert_eq!(err.description(), "\"went wrong\"");
    }

    #[test]
    fn test_error_predicates() {
        let field = json!({"42": {"name": "BadInput", "description": "missing field"}});
        let err = Error::Api(ApiError::from_envelope(&field));
        assert!(err.is_api_error());
        assert!(!err.is_transport_error());
        assert_eq!(err.as_api_error().unwrap().code(), "42");
    }
}
