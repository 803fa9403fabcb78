//! Operations on workgroups and their parent projects.

use serde_json::{json, Map, Value};

use crate::client::ApiClient;
use crate::error::{ApiError, MessageTable};
use crate::json::{self, FromJson, JsonObject};

pub const ERROR_MESSAGES: MessageTable = &[
    ("create_workgroup", 403, "Permission Denied"),
    ("create_workgroup", 401, "Invalid data"),
];

impl ApiClient {
    /// Create a workgroup under a project. `workgroup_data` fields are
    /// merged into the payload.
    pub async fn create_workgroup<T: FromJson>(
        &self,
        name: &str,
        project_id: i64,
        workgroup_data: Option<&Value>,
    ) -> Result<T, ApiError> {
        let mut body = Map::new();
        body.insert("name".to_string(), Value::String(name.to_string()));
        body.insert("project".to_string(), json!(project_id));
        if let Some(Value::Object(extra)) = workgroup_data {
            for (key, value) in extra {
                body.insert(key.clone(), value.clone());
            }
        }

        let url = self.endpoint(&self.config().prefixes.workgroups, "/");
        let response = self
            .post("create_workgroup", &url, &Value::Object(body))
            .await?;
        json::parse_one(&response.body)
    }

    /// Fetch a workgroup by id.
    pub async fn fetch_workgroup<T: FromJson>(&self, workgroup_id: i64) -> Result<T, ApiError> {
        let url = self.endpoint(
            &self.config().prefixes.workgroups,
            &format!("/{}/", workgroup_id),
        );
        let response = self.get("fetch_workgroup", &url).await?;
        json::parse_one(&response.body)
    }

    /// Delete a workgroup. True when the server confirms with 204.
    pub async fn delete_workgroup(&self, workgroup_id: i64) -> Result<bool, ApiError> {
        let url = self.endpoint(
            &self.config().prefixes.workgroups,
            &format!("/{}/", workgroup_id),
        );
        let response = self.delete("delete_workgroup", &url).await?;
        Ok(response.is_no_content())
    }

    /// Fetch the workgroup's members.
    pub async fn get_workgroup_users<T: FromJson>(
        &self,
        workgroup_id: i64,
    ) -> Result<Vec<T>, ApiError> {
        let url = self.endpoint(
            &self.config().prefixes.workgroups,
            &format!("/{}/users/", workgroup_id),
        );
        let response = self.get("get_workgroup_users", &url).await?;
        json::parse_many(&response.body)
    }

    /// Add a user to the workgroup.
    pub async fn add_user_to_workgroup(
        &self,
        workgroup_id: i64,
        user_id: i64,
    ) -> Result<JsonObject, ApiError> {
        let url = self.endpoint(
            &self.config().prefixes.workgroups,
            &format!("/{}/users/", workgroup_id),
        );
        let response = self
            .post("add_user_to_workgroup", &url, &json!({"id": user_id}))
            .await?;
        json::parse_one(&response.body)
    }

    /// Remove a user from the workgroup. True when the server confirms
    /// with 204.
    pub async fn remove_user_from_workgroup(
        &self,
        workgroup_id: i64,
        user_id: i64,
    ) -> Result<bool, ApiError> {
        let url = self.endpoint(
            &self.config().prefixes.workgroups,
            &format!("/{}/users/{}/", workgroup_id, user_id),
        );
        let response = self.delete("remove_user_from_workgroup", &url).await?;
        Ok(response.is_no_content())
    }

    /// Create a project for a course content location, optionally owned
    /// by an organization.
    pub async fn create_project<T: FromJson>(
        &self,
        course_id: &str,
        content_id: &str,
        organization_id: Option<i64>,
    ) -> Result<T, ApiError> {
        let mut body = Map::new();
        body.insert("course_id".to_string(), Value::String(course_id.to_string()));
        body.insert(
            "content_id".to_string(),
            Value::String(content_id.to_string()),
        );
        if let Some(organization_id) = organization_id {
            body.insert("organization".to_string(), json!(organization_id));
        }

        let url = self.endpoint(&self.config().prefixes.projects, "/");
        let response = self
            .post("create_project", &url, &Value::Object(body))
            .await?;
        json::parse_one(&response.body)
    }

    /// Fetch a project by id.
    pub async fn fetch_project<T: FromJson>(&self, project_id: i64) -> Result<T, ApiError> {
        let url = self.endpoint(
            &self.config().prefixes.projects,
            &format!("/{}/", project_id),
        );
        let response = self.get("fetch_project", &url).await?;
        json::parse_one(&response.body)
    }

    /// Fetch all projects.
    pub async fn get_projects<T: FromJson>(&self) -> Result<Vec<T>, ApiError> {
        let url = self.endpoint(&self.config().prefixes.projects, "/");
        let response = self.get("get_projects", &url).await?;
        json::parse_many(&response.body)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::client::test_client;
    use crate::models::{Project, Workgroup};

    #[tokio::test]
    async fn test_create_workgroup_links_project() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/server/workgroups/"))
            .and(body_json(json!({"name": "Team 1", "project": 4})))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_json(json!({"id": 12, "name": "Team 1", "project": 4})),
            )
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let workgroup: Workgroup = client
            .create_workgroup("Team 1", 4, None)
            .await
            .expect("create");
        assert_eq!(workgroup.id(), Some(12));
        assert_eq!(workgroup.project(), Some(4));
    }

    #[tokio::test]
    async fn test_fetch_project_maps_fields() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/server/projects/4/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 4,
                "course_id": "course-v1",
                "content_id": "block-v1",
                "workgroups": [12, 13],
            })))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let project: Project = client.fetch_project(4).await.expect("fetch");
        assert_eq!(project.course_id(), Some("course-v1"));
        assert_eq!(project.workgroups(), vec![12, 13]);
    }
}
