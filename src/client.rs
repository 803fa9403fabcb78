//! HTTP client and verb helpers.
//!
//! [`ApiClient`] owns the underlying HTTP client, the configuration and
//! the error-message registry. The verb helpers perform one request with
//! JSON content negotiation and the configured `Authorization: Token`
//! header, and hand the raw status/body back for mapping. No retry, no
//! backoff; a non-2xx status becomes a normalized [`ApiError`].

use std::time::Duration;

use reqwest::{header, Client, Method, StatusCode};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::ApiConfig;
use crate::error::{ApiError, ErrorMessages};

/// HTTP request timeout in seconds.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Raw response handed to the mapping layer: the status code and the
/// readable body.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: String,
}

impl RawResponse {
    /// Deletion endpoints signal success with 204 and nothing else.
    pub fn is_no_content(&self) -> bool {
        self.status == StatusCode::NO_CONTENT
    }
}

/// Client for the LMS server API.
/// Clone is cheap - reqwest::Client uses Arc internally for connection
/// pooling.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    config: ApiConfig,
    messages: ErrorMessages,
}

impl ApiClient {
    /// Create a client with the built-in error-message registry.
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        Self::with_messages(config, ErrorMessages::builtin())
    }

    /// Create a client with a caller-assembled message registry.
    pub fn with_messages(config: ApiConfig, messages: ErrorMessages) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            http,
            config,
            messages,
        })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Build a fully-qualified URL from a resource prefix and the path
    /// tail. The tail carries its own leading (and any trailing) slash;
    /// several endpoints return extended fields only without a trailing
    /// slash, so the callers control it exactly.
    pub(crate) fn endpoint(&self, prefix: &str, tail: &str) -> String {
        format!(
            "{}/{}{}",
            self.config.server_address.trim_end_matches('/'),
            prefix,
            tail
        )
    }

    fn auth_headers(&self) -> Result<header::HeaderMap, ApiError> {
        let mut headers = header::HeaderMap::new();
        if let Some(ref key) = self.config.api_key {
            headers.insert(
                header::AUTHORIZATION,
                header::HeaderValue::from_str(&format!("Token {}", key))?,
            );
        }
        Ok(headers)
    }

    pub async fn get(&self, operation: &'static str, url: &str) -> Result<RawResponse, ApiError> {
        self.send(operation, Method::GET, url, None, &[]).await
    }

    pub async fn get_with_query(
        &self,
        operation: &'static str,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<RawResponse, ApiError> {
        self.send(operation, Method::GET, url, None, query).await
    }

    pub async fn post(
        &self,
        operation: &'static str,
        url: &str,
        body: &Value,
    ) -> Result<RawResponse, ApiError> {
        self.send(operation, Method::POST, url, Some(body), &[]).await
    }

    pub async fn put(
        &self,
        operation: &'static str,
        url: &str,
        body: &Value,
    ) -> Result<RawResponse, ApiError> {
        self.send(operation, Method::PUT, url, Some(body), &[]).await
    }

    pub async fn patch(
        &self,
        operation: &'static str,
        url: &str,
        body: &Value,
    ) -> Result<RawResponse, ApiError> {
        self.send(operation, Method::PATCH, url, Some(body), &[]).await
    }

    pub async fn delete(&self, operation: &'static str, url: &str) -> Result<RawResponse, ApiError> {
        self.send(operation, Method::DELETE, url, None, &[]).await
    }

    async fn send(
        &self,
        operation: &'static str,
        method: Method,
        url: &str,
        body: Option<&Value>,
        query: &[(&str, String)],
    ) -> Result<RawResponse, ApiError> {
        let mut request = self
            .http
            .request(method.clone(), url)
            .headers(self.auth_headers()?);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        debug!(%method, url, %status, operation, "API response");

        if status.is_success() {
            Ok(RawResponse { status, body })
        } else {
            warn!(%method, url, %status, operation, "API call failed");
            Err(ApiError::from_status(
                operation,
                status,
                &body,
                &self.messages,
            ))
        }
    }
}

#[cfg(test)]
pub(crate) fn test_client(uri: &str) -> ApiClient {
    ApiClient::new(ApiConfig::new(uri).with_api_key("test-key")).expect("client builds")
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[test]
    fn test_endpoint_building() {
        let client = test_client("http://localhost:8000/");
        let prefix = client.config().prefixes.users.clone();
        assert_eq!(
            client.endpoint(&prefix, "/42"),
            "http://localhost:8000/api/server/users/42"
        );
        assert_eq!(
            client.endpoint(&prefix, "/42/"),
            "http://localhost:8000/api/server/users/42/"
        );
    }

    #[tokio::test]
    async fn test_token_header_attached() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ping"))
            .and(header("Authorization", "Token test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let url = format!("{}/ping", server.uri());
        let response = client.get("ping", &url).await.expect("request succeeds");
        assert_eq!(response.status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_transport_failure_surfaces_as_network_error() {
        // Nothing listens on this port.
        let client = test_client("http://127.0.0.1:1");
        let result = client.get("ping", "http://127.0.0.1:1/ping").await;
        assert!(matches!(result, Err(ApiError::Network(_))));
    }

    #[tokio::test]
    async fn test_server_error_is_normalized() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ping"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let url = format!("{}/ping", server.uri());
        match client.get("ping", &url).await {
            Err(ApiError::Http { status, message, body }) => {
                assert_eq!(status, 500);
                assert!(!message.is_empty());
                assert_eq!(body, "boom");
            }
            other => panic!("expected normalized HTTP error, got {:?}", other.map(|r| r.status)),
        }
    }
}
