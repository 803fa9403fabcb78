//! Normalized API errors and the per-operation message registry.
//!
//! Every failure crossing the library boundary is an [`ApiError`]. HTTP
//! error responses are normalized through an [`ErrorMessages`] registry
//! mapping `(operation name, status code)` to a human-readable message,
//! assembled once from the static tables each resource module declares.

use std::collections::HashMap;

use reqwest::StatusCode;
use thiserror::Error;

use crate::resources;

/// Maximum length for response bodies embedded in error values.
const MAX_ERROR_BODY_LENGTH: usize = 500;

/// Static message table declared by a resource module:
/// `(operation name, status code, message)`.
pub type MessageTable = &'static [(&'static str, u16, &'static str)];

#[derive(Error, Debug)]
pub enum ApiError {
    /// HTTP error response (4xx/5xx), normalized through the message
    /// registry. `body` is the (truncated) response body for diagnostics.
    #[error("{message}")]
    Http {
        status: u16,
        message: String,
        body: String,
    },

    /// Transport-level failure: connection refused, timeout, DNS.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Response body was not valid JSON.
    #[error("Malformed response body: {0}")]
    Parse(#[from] serde_json::Error),

    /// Response parsed but did not have the expected shape.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The configured API key is not a valid header value.
    #[error("Invalid API key: {0}")]
    InvalidApiKey(#[from] reqwest::header::InvalidHeaderValue),
}

impl ApiError {
    /// Status code of the failed response, when there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            ApiError::Network(source) => source.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Truncate a response body so errors stay loggable. The cut backs
    /// up to a char boundary so multi-byte bodies never split.
    fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            return body.to_string();
        }
        let mut cut = MAX_ERROR_BODY_LENGTH;
        while !body.is_char_boundary(cut) {
            cut -= 1;
        }
        format!(
            "{}... (truncated, {} total bytes)",
            &body[..cut],
            body.len()
        )
    }

    pub(crate) fn from_status(
        operation: &'static str,
        status: StatusCode,
        body: &str,
        messages: &ErrorMessages,
    ) -> Self {
        ApiError::Http {
            status: status.as_u16(),
            message: messages.resolve(operation, status),
            body: Self::truncate_body(body),
        }
    }
}

/// Registry of human-readable messages for `(operation, status)` pairs.
///
/// Built once at client construction from the static tables in the
/// resource modules. Consulted only for presentation; it never drives
/// control flow.
#[derive(Debug, Clone, Default)]
pub struct ErrorMessages {
    entries: HashMap<(&'static str, u16), &'static str>,
}

impl ErrorMessages {
    /// Registry covering every built-in resource module.
    pub fn builtin() -> Self {
        let mut messages = Self::default();
        for table in [
            resources::organizations::ERROR_MESSAGES,
            resources::users::ERROR_MESSAGES,
            resources::groups::ERROR_MESSAGES,
            resources::workgroups::ERROR_MESSAGES,
        ] {
            messages.extend(table);
        }
        messages
    }

    pub fn extend(&mut self, table: MessageTable) {
        for (operation, status, message) in table {
            self.entries.insert((operation, *status), message);
        }
    }

    pub fn lookup(&self, operation: &'static str, status: u16) -> Option<&'static str> {
        self.entries.get(&(operation, status)).copied()
    }

    /// Resolve a message for the pair, falling back to a generic message
    /// derived from the status code. Never empty.
    pub fn resolve(&self, operation: &'static str, status: StatusCode) -> String {
        if let Some(message) = self.lookup(operation, status.as_u16()) {
            return message.to_string();
        }
        match status.canonical_reason() {
            Some(reason) => format!("API error {}: {}", status.as_u16(), reason),
            None => format!("API error {}", status.as_u16()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_known_pair() {
        let messages = ErrorMessages::builtin();
        assert_eq!(
            messages.lookup("create_organization", 403),
            Some("Permission Denied")
        );
        assert_eq!(
            messages.lookup("authenticate", 401),
            Some("Username or password invalid")
        );
    }

    #[test]
    fn test_resolve_unknown_pair_falls_back() {
        let messages = ErrorMessages::builtin();
        let resolved = messages.resolve("fetch_organization", StatusCode::SERVICE_UNAVAILABLE);
        assert!(!resolved.is_empty());
        assert!(resolved.contains("503"));
    }

    #[test]
    fn test_extend_overrides() {
        let mut messages = ErrorMessages::builtin();
        messages.extend(&[("create_organization", 403, "No")]);
        assert_eq!(messages.lookup("create_organization", 403), Some("No"));
    }

    #[test]
    fn test_truncate_body() {
        let short = "short body";
        assert_eq!(ApiError::truncate_body(short), short);

        let long = "x".repeat(600);
        let truncated = ApiError::truncate_body(&long);
        assert!(truncated.starts_with(&"x".repeat(500)));
        assert!(truncated.contains("600 total bytes"));
    }

    #[test]
    fn test_truncate_body_respects_char_boundaries() {
        // 200 euro signs = 600 bytes, with a char straddling byte 500.
        let body = "€".repeat(200);
        let truncated = ApiError::truncate_body(&body);
        assert!(truncated.starts_with(&"€".repeat(166)));
        assert!(truncated.contains("600 total bytes"));

        let messages = ErrorMessages::builtin();
        let err = ApiError::from_status(
            "fetch_organization",
            StatusCode::BAD_GATEWAY,
            &body,
            &messages,
        );
        assert_eq!(err.status(), Some(502));
    }

    #[test]
    fn test_http_error_status() {
        let messages = ErrorMessages::builtin();
        let err = ApiError::from_status(
            "create_organization",
            StatusCode::FORBIDDEN,
            "denied",
            &messages,
        );
        assert_eq!(err.status(), Some(403));
        assert_eq!(err.to_string(), "Permission Denied");
    }
}
