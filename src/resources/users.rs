//! Operations on users, sessions and user-scoped sub-resources.

use reqwest::StatusCode;
use serde_json::{json, Map, Value};

use crate::client::ApiClient;
use crate::error::{ApiError, MessageTable};
use crate::json::{self, FromJson, JsonObject};
use crate::models::{AuthenticationResponse, CityList, Course, UserCourseStatus, UserRole};

pub const ERROR_MESSAGES: MessageTable = &[
    (
        "update_user_information",
        409,
        "User with matching username or email already exists",
    ),
    ("authenticate", 403, "User account not activated"),
    ("authenticate", 401, "Username or password invalid"),
    ("authenticate", 404, "Username or password invalid"),
    ("register_user", 409, "Username or email already registered"),
];

/// User fields the server accepts on registration and update; anything
/// else in the caller's payload is dropped before sending.
const VALID_USER_KEYS: &[&str] = &[
    "email",
    "first_name",
    "last_name",
    "full_name",
    "city",
    "country",
    "username",
    "level_of_education",
    "password",
    "gender",
    "title",
    "is_active",
    "avatar_url",
];

fn clean_user_keys(user_data: &Value) -> Value {
    let mut cleaned = Map::new();
    if let Value::Object(fields) = user_data {
        for key in VALID_USER_KEYS {
            if let Some(value) = fields.get(*key) {
                cleaned.insert((*key).to_string(), value.clone());
            }
        }
    }
    Value::Object(cleaned)
}

impl ApiClient {
    /// Authenticate against the API server, creating a session.
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<AuthenticationResponse, ApiError> {
        let url = self.endpoint(&self.config().prefixes.sessions, "/");
        let body = json!({
            "username": username,
            "password": password,
        });
        let response = self.post("authenticate", &url, &body).await?;
        json::parse_one(&response.body)
    }

    /// Delete the session with the given key.
    pub async fn delete_session(&self, session_key: &str) -> Result<(), ApiError> {
        let url = self.endpoint(
            &self.config().prefixes.sessions,
            &format!("/{}", session_key),
        );
        self.delete("delete_session", &url).await?;
        Ok(())
    }

    /// Fetch a user by id, with extended fields.
    // NB - the trailing-slash variant returns only the short field set;
    // this one deliberately omits it.
    pub async fn get_user<T: FromJson>(&self, user_id: i64) -> Result<T, ApiError> {
        let url = self.endpoint(&self.config().prefixes.users, &format!("/{}", user_id));
        let response = self.get("get_user", &url).await?;
        json::parse_one(&response.body)
    }

    /// Fetch a user by id as a plain mapped object (short field set).
    pub async fn get_user_raw(&self, user_id: i64) -> Result<JsonObject, ApiError> {
        let url = self.endpoint(&self.config().prefixes.users, &format!("/{}/", user_id));
        let response = self.get("get_user_raw", &url).await?;
        json::parse_one(&response.body)
    }

    /// Fetch all users matching the filter criteria. `fields` extends
    /// the id/email/username set always requested.
    pub async fn get_users<T: FromJson>(
        &self,
        fields: &[&str],
        filters: &[(&str, String)],
    ) -> Result<Vec<T>, ApiError> {
        let mut request_fields = vec!["id", "email", "username"];
        request_fields.extend_from_slice(fields);

        let mut query = vec![
            ("page_size", "0".to_string()),
            ("fields", request_fields.join(",")),
        ];
        query.extend(filters.iter().map(|(key, value)| (*key, value.clone())));

        let url = self.endpoint(&self.config().prefixes.users, "");
        let response = self.get_with_query("get_users", &url, &query).await?;
        json::parse_many(&response.body)
    }

    /// Register a new user. The payload is filtered to the valid user
    /// keys before sending.
    pub async fn register_user(&self, user_data: &Value) -> Result<JsonObject, ApiError> {
        let url = self.endpoint(&self.config().prefixes.users, "");
        let response = self
            .post("register_user", &url, &clean_user_keys(user_data))
            .await?;
        json::parse_one(&response.body)
    }

    /// Update the user's profile information (filtered to the valid
    /// user keys).
    pub async fn update_user_information(
        &self,
        user_id: i64,
        user_data: &Value,
    ) -> Result<JsonObject, ApiError> {
        let url = self.endpoint(&self.config().prefixes.users, &format!("/{}", user_id));
        let response = self
            .post("update_user_information", &url, &clean_user_keys(user_data))
            .await?;
        json::parse_one(&response.body)
    }

    /// Activate a registered user.
    pub async fn activate_user(&self, user_id: i64) -> Result<JsonObject, ApiError> {
        let url = self.endpoint(&self.config().prefixes.users, &format!("/{}", user_id));
        let response = self
            .post("activate_user", &url, &json!({"is_active": true}))
            .await?;
        json::parse_one(&response.body)
    }

    /// Fetch the user's course summaries.
    pub async fn get_user_courses(&self, user_id: i64) -> Result<Vec<Course>, ApiError> {
        let url = self.endpoint(
            &self.config().prefixes.users,
            &format!("/{}/courses", user_id),
        );
        let response = self.get("get_user_courses", &url).await?;
        json::parse_many(&response.body)
    }

    /// Enroll the user in a course and return the resulting enrollment.
    pub async fn enroll_user_in_course(
        &self,
        user_id: i64,
        course_id: &str,
    ) -> Result<Course, ApiError> {
        let url = self.endpoint(
            &self.config().prefixes.users,
            &format!("/{}/courses", user_id),
        );
        let body = json!({"course_id": course_id});
        let response = self.post("enroll_user_in_course", &url, &body).await?;
        json::parse_one(&response.body)
    }

    /// Unenroll the user from a course (inactivates the enrollment).
    /// True when the server confirms with 204.
    pub async fn unenroll_user_from_course(
        &self,
        user_id: i64,
        course_id: &str,
    ) -> Result<bool, ApiError> {
        let url = self.endpoint(
            &self.config().prefixes.users,
            &format!("/{}/courses/{}", user_id, course_id),
        );
        let response = self.delete("unenroll_user_from_course", &url).await?;
        Ok(response.is_no_content())
    }

    /// Fetch the user's status within a course.
    pub async fn get_user_course_detail(
        &self,
        user_id: i64,
        course_id: &str,
    ) -> Result<UserCourseStatus, ApiError> {
        let url = self.endpoint(
            &self.config().prefixes.users,
            &format!("/{}/courses/{}", user_id, course_id),
        );
        let response = self.get("get_user_course_detail", &url).await?;
        json::parse_one(&response.body)
    }

    /// Fetch the user's gradebook for a course. The target shape lets
    /// callers bring a richer gradebook model.
    pub async fn get_user_gradebook<G: FromJson>(
        &self,
        user_id: i64,
        course_id: &str,
    ) -> Result<G, ApiError> {
        let url = self.endpoint(
            &self.config().prefixes.users,
            &format!("/{}/courses/{}/grades", user_id, course_id),
        );
        let response = self.get("get_user_gradebook", &url).await?;
        json::parse_one(&response.body)
    }

    /// Record the most recently visited page for the user. `chapter_id`
    /// may be omitted to set only the position within the sequential.
    pub async fn set_user_bookmark(
        &self,
        user_id: i64,
        course_id: &str,
        chapter_id: Option<&str>,
        sequential_id: &str,
        page_id: &str,
    ) -> Result<JsonObject, ApiError> {
        let body = json!({
            "positions": [
                {
                    "parent_content_id": course_id,
                    "child_content_id": chapter_id,
                },
                {
                    "parent_content_id": chapter_id,
                    "child_content_id": sequential_id,
                },
                {
                    "parent_content_id": sequential_id,
                    "child_content_id": page_id,
                },
            ],
        });

        let url = self.endpoint(
            &self.config().prefixes.users,
            &format!("/{}/courses/{}", user_id, course_id),
        );
        let response = self.post("set_user_bookmark", &url, &body).await?;
        json::parse_one(&response.body)
    }

    /// Fetch the user's role assignments.
    pub async fn get_user_roles(&self, user_id: i64) -> Result<Vec<JsonObject>, ApiError> {
        let url = self.endpoint(
            &self.config().prefixes.users,
            &format!("/{}/roles", user_id),
        );
        let query = [("page_size", "0".to_string())];
        let response = self.get_with_query("get_user_roles", &url, &query).await?;
        json::parse_many(&response.body)
    }

    /// Grant the user a role within a course.
    pub async fn add_user_role(
        &self,
        user_id: i64,
        course_id: &str,
        role: UserRole,
    ) -> Result<JsonObject, ApiError> {
        let url = self.endpoint(
            &self.config().prefixes.users,
            &format!("/{}/roles", user_id),
        );
        let body = json!({
            "course_id": course_id,
            "role": role.as_str(),
        });
        let response = self.post("add_user_role", &url, &body).await?;
        json::parse_one(&response.body)
    }

    /// Replace the user's role assignments wholesale.
    pub async fn update_user_roles(
        &self,
        user_id: i64,
        roles: &[(&str, UserRole)],
    ) -> Result<JsonObject, ApiError> {
        let url = self.endpoint(
            &self.config().prefixes.users,
            &format!("/{}/roles", user_id),
        );
        let body = Value::Array(
            roles
                .iter()
                .map(|(course_id, role)| json!({"course_id": course_id, "role": role.as_str()}))
                .collect(),
        );
        let response = self.put("update_user_roles", &url, &body).await?;
        json::parse_one(&response.body)
    }

    /// Revoke a role the user holds within a course. True when the
    /// server confirms with 204.
    pub async fn delete_user_role(
        &self,
        user_id: i64,
        course_id: &str,
        role: UserRole,
    ) -> Result<bool, ApiError> {
        let url = self.endpoint(
            &self.config().prefixes.users,
            &format!("/{}/roles/{}/courses/{}", user_id, role.as_str(), course_id),
        );
        let response = self.delete("delete_user_role", &url).await?;
        Ok(response.is_no_content())
    }

    /// Fetch the groups in which the user is a member, optionally
    /// restricted to one group type.
    pub async fn get_user_groups<T: FromJson>(
        &self,
        user_id: i64,
        group_type: Option<&str>,
        filters: &[(&str, String)],
    ) -> Result<Vec<T>, ApiError> {
        let mut query: Vec<(&str, String)> = filters.to_vec();
        if let Some(group_type) = group_type {
            query.push(("type", group_type.to_string()));
        }

        let url = self.endpoint(
            &self.config().prefixes.users,
            &format!("/{}/groups", user_id),
        );
        let response = self.get_with_query("get_user_groups", &url, &query).await?;

        // The server wraps the list: {"groups": [...]}
        let object: JsonObject = json::parse_one(&response.body)?;
        let groups = object
            .get("groups")
            .cloned()
            .ok_or_else(|| ApiError::InvalidResponse("missing groups field".to_string()))?;
        json::many_from_value(groups)
    }

    /// Check group membership. Absence is a valid answer for this
    /// query, so a 404 maps to `false` rather than an error.
    pub async fn is_user_in_group(&self, user_id: i64, group_id: i64) -> Result<bool, ApiError> {
        let url = self.endpoint(
            &self.config().prefixes.groups,
            &format!("/{}/users/{}", group_id, user_id),
        );
        match self.get("is_user_in_group", &url).await {
            Ok(response) => Ok(response.status == StatusCode::OK),
            Err(ApiError::Http { status: 404, .. }) => Ok(false),
            Err(err) => Err(err),
        }
    }

    /// Set the user's preferences.
    pub async fn set_user_preferences(
        &self,
        user_id: i64,
        preferences: &Value,
    ) -> Result<(), ApiError> {
        let url = self.endpoint(
            &self.config().prefixes.users,
            &format!("/{}/preferences", user_id),
        );
        self.post("set_user_preferences", &url, preferences).await?;
        Ok(())
    }

    /// Fetch the user's preferences as a plain mapped object - they are
    /// set as a dictionary, so they come back as one.
    pub async fn get_user_preferences(&self, user_id: i64) -> Result<JsonObject, ApiError> {
        let url = self.endpoint(
            &self.config().prefixes.users,
            &format!("/{}/preferences", user_id),
        );
        let response = self.get("get_user_preferences", &url).await?;
        json::parse_one(&response.body)
    }

    /// Delete one preference key for the user.
    pub async fn delete_user_preference(
        &self,
        user_id: i64,
        preference_key: &str,
    ) -> Result<(), ApiError> {
        let url = self.endpoint(
            &self.config().prefixes.users,
            &format!("/{}/preferences/{}", user_id, preference_key),
        );
        self.delete("delete_user_preference", &url).await?;
        Ok(())
    }

    /// Fetch the organizations the user is associated with.
    pub async fn get_user_organizations<T: FromJson>(
        &self,
        user_id: i64,
    ) -> Result<Vec<T>, ApiError> {
        let url = self.endpoint(
            &self.config().prefixes.users,
            &format!("/{}/organizations/", user_id),
        );
        let query = [("page_size", "0".to_string())];
        let response = self
            .get_with_query("get_user_organizations", &url, &query)
            .await?;
        json::parse_many(&response.body)
    }

    /// Fetch the user's workgroups, optionally restricted to a course.
    pub async fn get_user_workgroups<T: FromJson>(
        &self,
        user_id: i64,
        course_id: Option<&str>,
    ) -> Result<Vec<T>, ApiError> {
        let mut query = vec![("page_size", "0".to_string())];
        if let Some(course_id) = course_id {
            query.push(("course_id", course_id.to_string()));
        }

        let url = self.endpoint(
            &self.config().prefixes.users,
            &format!("/{}/workgroups/", user_id),
        );
        let response = self
            .get_with_query("get_user_workgroups", &url, &query)
            .await?;
        json::parse_many(&response.body)
    }

    /// Fetch users-by-city metrics.
    pub async fn get_users_city_metrics(&self) -> Result<CityList, ApiError> {
        let url = self.endpoint(&self.config().prefixes.users, "/metrics/cities/");
        let query = [("page_size", "0".to_string())];
        let response = self
            .get_with_query("get_users_city_metrics", &url, &query)
            .await?;
        json::parse_one(&response.body)
    }

    /// Fetch the user's social metrics for a course.
    pub async fn get_course_social_metrics(
        &self,
        user_id: i64,
        course_id: &str,
    ) -> Result<JsonObject, ApiError> {
        let url = self.endpoint(
            &self.config().prefixes.users,
            &format!("/{}/courses/{}/metrics/social/", user_id, course_id),
        );
        let response = self.get("get_course_social_metrics", &url).await?;
        json::parse_one(&response.body)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::client::test_client;
    use crate::error::ApiError;
    use crate::json::JsonObject;
    use crate::models::UserRole;

    #[tokio::test]
    async fn test_authenticate_returns_session() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/server/sessions/"))
            .and(body_json(json!({"username": "ada", "password": "pw"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "token": "abc123",
                "user": {"id": 9, "username": "ada"},
            })))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let session = client.authenticate("ada", "pw").await.expect("auth");
        assert_eq!(session.token(), Some("abc123"));
        let user = session.user().expect("user present");
        assert_eq!(user.id(), Some(9));
    }

    #[tokio::test]
    async fn test_authenticate_401_uses_table_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/server/sessions/"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        match client.authenticate("ada", "wrong").await {
            Err(ApiError::Http { status, message, .. }) => {
                assert_eq!(status, 401);
                assert_eq!(message, "Username or password invalid");
            }
            other => panic!("expected HTTP error, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_register_user_strips_unknown_keys() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/server/users"))
            .and(body_json(json!({"username": "ada", "email": "ada@example.com"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 9})))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let created = client
            .register_user(&json!({
                "username": "ada",
                "email": "ada@example.com",
                "is_admin": true,
            }))
            .await
            .expect("register");
        assert_eq!(created.integer("id"), Some(9));
    }

    #[tokio::test]
    async fn test_get_users_builds_field_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/server/users"))
            .and(query_param("page_size", "0"))
            .and(query_param("fields", "id,email,username,city"))
            .and(query_param("is_active", "true"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 1}])))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let users: Vec<JsonObject> = client
            .get_users(&["city"], &[("is_active", "true".to_string())])
            .await
            .expect("list");
        assert_eq!(users.len(), 1);
    }

    #[tokio::test]
    async fn test_membership_check_tri_state() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/server/groups/5/users/1"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/server/groups/5/users/2"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/server/groups/5/users/3"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        assert!(client.is_user_in_group(1, 5).await.expect("member"));
        assert!(!client.is_user_in_group(2, 5).await.expect("not member"));
        assert!(matches!(
            client.is_user_in_group(3, 5).await,
            Err(ApiError::Http { status: 500, .. })
        ));
    }

    #[tokio::test]
    async fn test_unenroll_user_from_course_maps_status() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/server/users/1/courses/course-v1"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        assert!(client
            .unenroll_user_from_course(1, "course-v1")
            .await
            .expect("unenroll"));
    }

    #[tokio::test]
    async fn test_delete_user_role_builds_path() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/server/users/1/roles/assistant/courses/c1"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        assert!(client
            .delete_user_role(1, "c1", UserRole::Assistant)
            .await
            .expect("revoke"));
    }

    #[tokio::test]
    async fn test_get_user_groups_unwraps_list() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/server/users/1/groups"))
            .and(query_param("type", "contact_group"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "groups": [{"id": 11, "type": "contact_group"}],
            })))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let groups: Vec<JsonObject> = client
            .get_user_groups(1, Some("contact_group"), &[])
            .await
            .expect("groups");
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].integer("id"), Some(11));
    }

    #[tokio::test]
    async fn test_malformed_body_is_a_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/server/users/1/preferences"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{oops"))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        assert!(matches!(
            client.get_user_preferences(1).await,
            Err(ApiError::Parse(_))
        ));
    }
}
