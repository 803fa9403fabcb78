//! Client configuration.
//!
//! The hosting application supplies the API server address, the API key
//! and (rarely) overridden path prefixes. Nothing here reads files or the
//! environment; construct an [`ApiConfig`] and hand it to
//! [`ApiClient::new`](crate::ApiClient::new), or deserialize one from the
//! host's own configuration.

use serde::{Deserialize, Serialize};

/// Common prefix shared by the stock resource paths.
const SERVER_API_PREFIX: &str = "api/server";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// API server address, e.g. `http://localhost:8000`.
    pub server_address: String,
    /// API key sent as `Authorization: Token <key>` on every request.
    pub api_key: Option<String>,
    #[serde(default)]
    pub prefixes: ApiPrefixes,
}

impl ApiConfig {
    pub fn new(server_address: impl Into<String>) -> Self {
        Self {
            server_address: server_address.into(),
            api_key: None,
            prefixes: ApiPrefixes::default(),
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }
}

/// Path prefix for each resource family, relative to the server address.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiPrefixes {
    pub sessions: String,
    pub users: String,
    pub groups: String,
    pub organizations: String,
    pub courses: String,
    pub workgroups: String,
    pub projects: String,
}

impl Default for ApiPrefixes {
    fn default() -> Self {
        let join = |resource: &str| format!("{}/{}", SERVER_API_PREFIX, resource);
        Self {
            sessions: join("sessions"),
            users: join("users"),
            groups: join("groups"),
            organizations: join("organizations"),
            courses: join("courses"),
            workgroups: join("workgroups"),
            projects: join("projects"),
        }
    }
}
