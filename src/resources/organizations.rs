//! Operations on organizations.

use serde_json::{Map, Value};

use crate::client::ApiClient;
use crate::error::{ApiError, MessageTable};
use crate::json::{self, FromJson};

pub const ERROR_MESSAGES: MessageTable = &[
    ("create_organization", 403, "Permission Denied"),
    ("create_organization", 401, "Invalid data"),
    ("update_organization", 403, "Permission Denied"),
    ("update_organization", 401, "Invalid data"),
];

impl ApiClient {
    /// Create a new organization. `organization_data` fields are merged
    /// into the payload alongside the name.
    pub async fn create_organization<T: FromJson>(
        &self,
        name: &str,
        organization_data: Option<&Value>,
    ) -> Result<T, ApiError> {
        let mut body = Map::new();
        body.insert("name".to_string(), Value::String(name.to_string()));
        if let Some(Value::Object(extra)) = organization_data {
            for (key, value) in extra {
                body.insert(key.clone(), value.clone());
            }
        }

        let url = self.endpoint(&self.config().prefixes.organizations, "/");
        let response = self
            .post("create_organization", &url, &Value::Object(body))
            .await?;
        json::parse_one(&response.body)
    }

    /// Fetch an organization by id.
    pub async fn fetch_organization<T: FromJson>(
        &self,
        organization_id: i64,
    ) -> Result<T, ApiError> {
        let url = self.endpoint(
            &self.config().prefixes.organizations,
            &format!("/{}/", organization_id),
        );
        let response = self.get("fetch_organization", &url).await?;
        json::parse_one(&response.body)
    }

    /// Fetch an organization from a fully-qualified URL, e.g. one the
    /// server embedded in another resource.
    pub async fn fetch_organization_from_url<T: FromJson>(&self, url: &str) -> Result<T, ApiError> {
        let response = self.get("fetch_organization_from_url", url).await?;
        json::parse_one(&response.body)
    }

    /// Fetch all organizations.
    pub async fn get_organizations<T: FromJson>(&self) -> Result<Vec<T>, ApiError> {
        let url = self.endpoint(&self.config().prefixes.organizations, "/");
        let response = self.get("get_organizations", &url).await?;
        json::parse_many(&response.body)
    }

    /// Fetch the organization's users, with a per-user enrolled-courses
    /// count included.
    pub async fn get_organization_users_with_enrollment<T: FromJson>(
        &self,
        organization_id: i64,
    ) -> Result<Vec<T>, ApiError> {
        let url = self.endpoint(
            &self.config().prefixes.organizations,
            &format!("/{}/users/", organization_id),
        );
        let query = [("include_course_counts", "true".to_string())];
        let response = self
            .get_with_query("get_organization_users_with_enrollment", &url, &query)
            .await?;
        json::parse_many(&response.body)
    }

    /// Fetch the organization's groups, optionally filtered (e.g.
    /// `type=contact_group`).
    pub async fn get_organization_groups<T: FromJson>(
        &self,
        organization_id: i64,
        filters: &[(&str, String)],
    ) -> Result<Vec<T>, ApiError> {
        let url = self.endpoint(
            &self.config().prefixes.organizations,
            &format!("/{}/groups", organization_id),
        );
        let response = self
            .get_with_query("get_organization_groups", &url, filters)
            .await?;
        json::parse_many(&response.body)
    }

    /// Update an existing organization and return the server's resulting
    /// representation.
    pub async fn update_organization<T: FromJson>(
        &self,
        organization_id: i64,
        organization_data: &Value,
    ) -> Result<T, ApiError> {
        let url = self.endpoint(
            &self.config().prefixes.organizations,
            &format!("/{}/", organization_id),
        );
        let response = self
            .patch("update_organization", &url, organization_data)
            .await?;
        json::parse_one(&response.body)
    }

    /// Delete an organization. True when the server confirms with 204.
    pub async fn delete_organization(&self, organization_id: i64) -> Result<bool, ApiError> {
        let url = self.endpoint(
            &self.config().prefixes.organizations,
            &format!("/{}/", organization_id),
        );
        let response = self.delete("delete_organization", &url).await?;
        Ok(response.is_no_content())
    }

    /// Fetch organization metrics, e.g. grade-complete counts, filtered
    /// by the given query parameters.
    pub async fn get_organization_metrics<T: FromJson>(
        &self,
        organization_id: i64,
        filters: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let url = self.endpoint(
            &self.config().prefixes.organizations,
            &format!("/{}/metrics/", organization_id),
        );
        let response = self
            .get_with_query("get_organization_metrics", &url, filters)
            .await?;
        json::parse_one(&response.body)
    }
}
