//! Organization shape and membership helpers.

use serde_json::json;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::json::{FromJson, JsonObject};

/// An organization, as mapped from an API response.
#[derive(Debug, Clone)]
pub struct Organization {
    object: JsonObject,
}

impl FromJson for Organization {
    const REQUIRED_FIELDS: &'static [&'static str] = &[
        "display_name",
        "contact_name",
        "contact_phone",
        "contact_email",
    ];

    fn from_object(object: JsonObject) -> Self {
        Self { object }
    }
}

impl Organization {
    pub fn object(&self) -> &JsonObject {
        &self.object
    }

    pub fn id(&self) -> Option<i64> {
        self.object.integer("id")
    }

    pub fn name(&self) -> Option<&str> {
        self.object.string("name")
    }

    pub fn display_name(&self) -> Option<&str> {
        self.object.string("display_name")
    }

    pub fn contact_name(&self) -> Option<&str> {
        self.object.string("contact_name")
    }

    pub fn contact_email(&self) -> Option<&str> {
        self.object.string("contact_email")
    }

    /// Ids of the organization's member users.
    pub fn users(&self) -> Vec<i64> {
        self.object.integers("users")
    }

    /// Ids of the organization's groups.
    pub fn groups(&self) -> Vec<i64> {
        self.object.integers("groups")
    }

    /// Add a user to the organization's membership and push the change
    /// to the server. No call is made when the user is already a member.
    pub async fn add_user(&mut self, client: &ApiClient, user_id: i64) -> Result<(), ApiError> {
        let mut users = self.users();
        if users.contains(&user_id) {
            return Ok(());
        }
        users.push(user_id);
        self.patch_members(client, "users", users).await
    }

    /// Remove a user from the organization's membership.
    pub async fn remove_user(&mut self, client: &ApiClient, user_id: i64) -> Result<(), ApiError> {
        let mut users = self.users();
        if !users.contains(&user_id) {
            return Ok(());
        }
        users.retain(|id| *id != user_id);
        self.patch_members(client, "users", users).await
    }

    /// Attach a group to the organization.
    pub async fn add_group(&mut self, client: &ApiClient, group_id: i64) -> Result<(), ApiError> {
        let mut groups = self.groups();
        if groups.contains(&group_id) {
            return Ok(());
        }
        groups.push(group_id);
        self.patch_members(client, "groups", groups).await
    }

    /// Detach a group from the organization.
    pub async fn remove_group(&mut self, client: &ApiClient, group_id: i64) -> Result<(), ApiError> {
        let mut groups = self.groups();
        if !groups.contains(&group_id) {
            return Ok(());
        }
        groups.retain(|id| *id != group_id);
        self.patch_members(client, "groups", groups).await
    }

    async fn patch_members(
        &mut self,
        client: &ApiClient,
        key: &str,
        ids: Vec<i64>,
    ) -> Result<(), ApiError> {
        let organization_id = self
            .id()
            .ok_or_else(|| ApiError::InvalidResponse("organization has no id".to_string()))?;
        client
            .update_organization::<JsonObject>(organization_id, &json!({ key: ids }))
            .await?;
        self.object.insert(key, json!(ids));
        Ok(())
    }
}
