//! Error type for the API client, plus the message extraction applied
//! to backend error bodies.

use serde_json::Value;

/// Errors from the Whitebox API layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend returned a non-2xx status code. `message` is the
    /// human-readable text extracted from the response body.
    #[error("{message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Extracted error message.
        message: String,
    },

    /// A 2xx response body did not match the expected shape.
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The request never left the client: form data failed
    /// client-side validation.
    #[error("{0}")]
    Validation(String),
}

impl ApiError {
    /// Status code of an [`ApiError::Api`], if that is what this is.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True when the backend rejected the request as unauthenticated.
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}

/// Extract a display message from an error response body.
///
/// Precedence: a top-level `detail` string, then `message`, then a
/// flattened map of field errors (`field: msg; field: msg`, array
/// values joined with `, `), and finally a generic
/// `HTTP error! status: <code>` fallback for empty or unparseable
/// bodies.
pub fn extract_error_message(status: u16, body: &Value) -> String {
    if let Some(detail) = body.get("detail").and_then(Value::as_str) {
        if !detail.is_empty() {
            return detail.to_string();
        }
    }
    if let Some(message) = body.get("message").and_then(Value::as_str) {
        if !message.is_empty() {
            return message.to_string();
        }
    }
    if let Some(object) = body.as_object() {
        if !object.is_empty() {
            let joined = object
                .iter()
                .map(|(field, value)| format!("{field}: {}", flatten_field_value(value)))
                .collect::<Vec<_>>()
                .join("; ");
            if !joined.is_empty() {
                return joined;
            }
        }
    }
    format!("HTTP error! status: {status}")
}

fn flatten_field_value(value: &Value) -> String {
    match value {
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join(", "),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
