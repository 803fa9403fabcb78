//! Operations on groups and group membership.

use serde_json::{json, Map, Value};

use crate::client::ApiClient;
use crate::error::{ApiError, MessageTable};
use crate::json::{self, FromJson, JsonObject};

pub const ERROR_MESSAGES: MessageTable = &[
    ("create_group", 403, "Permission Denied"),
    ("create_group", 401, "Invalid data"),
];

impl ApiClient {
    /// Create a new group of the given type. `group_data` fields are
    /// merged into the payload.
    pub async fn create_group<T: FromJson>(
        &self,
        name: &str,
        group_type: &str,
        group_data: Option<&Value>,
    ) -> Result<T, ApiError> {
        let mut body = Map::new();
        body.insert("name".to_string(), Value::String(name.to_string()));
        body.insert("type".to_string(), Value::String(group_type.to_string()));
        if let Some(Value::Object(extra)) = group_data {
            for (key, value) in extra {
                body.insert(key.clone(), value.clone());
            }
        }

        let url = self.endpoint(&self.config().prefixes.groups, "/");
        let response = self.post("create_group", &url, &Value::Object(body)).await?;
        json::parse_one(&response.body)
    }

    /// Fetch a group by id.
    pub async fn fetch_group<T: FromJson>(&self, group_id: i64) -> Result<T, ApiError> {
        let url = self.endpoint(&self.config().prefixes.groups, &format!("/{}/", group_id));
        let response = self.get("fetch_group", &url).await?;
        json::parse_one(&response.body)
    }

    /// Fetch all groups, optionally restricted to one type.
    pub async fn get_groups<T: FromJson>(
        &self,
        group_type: Option<&str>,
        filters: &[(&str, String)],
    ) -> Result<Vec<T>, ApiError> {
        let mut query: Vec<(&str, String)> = filters.to_vec();
        if let Some(group_type) = group_type {
            query.push(("type", group_type.to_string()));
        }

        let url = self.endpoint(&self.config().prefixes.groups, "/");
        let response = self.get_with_query("get_groups", &url, &query).await?;
        json::parse_many(&response.body)
    }

    /// Delete a group. True when the server confirms with 204.
    pub async fn delete_group(&self, group_id: i64) -> Result<bool, ApiError> {
        let url = self.endpoint(&self.config().prefixes.groups, &format!("/{}/", group_id));
        let response = self.delete("delete_group", &url).await?;
        Ok(response.is_no_content())
    }

    /// Fetch the group's members.
    pub async fn get_group_users<T: FromJson>(&self, group_id: i64) -> Result<Vec<T>, ApiError> {
        let url = self.endpoint(
            &self.config().prefixes.groups,
            &format!("/{}/users/", group_id),
        );
        let response = self.get("get_group_users", &url).await?;
        json::parse_many(&response.body)
    }

    /// Add a user to the group.
    pub async fn add_user_to_group(
        &self,
        group_id: i64,
        user_id: i64,
    ) -> Result<JsonObject, ApiError> {
        let url = self.endpoint(
            &self.config().prefixes.groups,
            &format!("/{}/users/", group_id),
        );
        let response = self
            .post("add_user_to_group", &url, &json!({"user_id": user_id}))
            .await?;
        json::parse_one(&response.body)
    }

    /// Remove a user from the group. True when the server confirms
    /// with 204.
    pub async fn remove_user_from_group(
        &self,
        group_id: i64,
        user_id: i64,
    ) -> Result<bool, ApiError> {
        let url = self.endpoint(
            &self.config().prefixes.groups,
            &format!("/{}/users/{}/", group_id, user_id),
        );
        let response = self.delete("remove_user_from_group", &url).await?;
        Ok(response.is_no_content())
    }
}
