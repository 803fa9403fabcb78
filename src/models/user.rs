//! User, session and user-metric shapes.

use crate::json::{FromJson, JsonObject};

/// Roles a user can hold within a course.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserRole {
    Staff,
    Instructor,
    Observer,
    Assistant,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Staff => "staff",
            UserRole::Instructor => "instructor",
            UserRole::Observer => "observer",
            UserRole::Assistant => "assistant",
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user, as mapped from an API response.
#[derive(Debug, Clone)]
pub struct User {
    object: JsonObject,
}

impl FromJson for User {
    fn from_object(object: JsonObject) -> Self {
        Self { object }
    }
}

impl User {
    pub fn object(&self) -> &JsonObject {
        &self.object
    }

    pub fn id(&self) -> Option<i64> {
        self.object.integer("id")
    }

    pub fn username(&self) -> Option<&str> {
        self.object.string("username")
    }

    pub fn email(&self) -> Option<&str> {
        self.object.string("email")
    }

    pub fn first_name(&self) -> Option<&str> {
        self.object.string("first_name")
    }

    pub fn last_name(&self) -> Option<&str> {
        self.object.string("last_name")
    }

    /// The server-supplied full name, or first + last when absent.
    pub fn full_name(&self) -> Option<String> {
        if let Some(full_name) = self.object.string("full_name") {
            return Some(full_name.to_string());
        }
        match (self.first_name(), self.last_name()) {
            (Some(first), Some(last)) => Some(format!("{} {}", first, last)),
            (Some(first), None) => Some(first.to_string()),
            (None, Some(last)) => Some(last.to_string()),
            (None, None) => None,
        }
    }

    pub fn city(&self) -> Option<&str> {
        self.object.string("city")
    }

    pub fn country(&self) -> Option<&str> {
        self.object.string("country")
    }

    pub fn title(&self) -> Option<&str> {
        self.object.string("title")
    }

    pub fn avatar_url(&self) -> Option<&str> {
        self.object.string("avatar_url")
    }

    pub fn is_active(&self) -> Option<bool> {
        self.object.boolean("is_active")
    }
}

/// Result of a successful `authenticate` call: the session token and
/// the authenticated user.
#[derive(Debug, Clone)]
pub struct AuthenticationResponse {
    object: JsonObject,
}

impl FromJson for AuthenticationResponse {
    fn from_object(object: JsonObject) -> Self {
        Self { object }
    }
}

impl AuthenticationResponse {
    pub fn object(&self) -> &JsonObject {
        &self.object
    }

    pub fn token(&self) -> Option<&str> {
        self.object.string("token")
    }

    pub fn user(&self) -> Option<User> {
        self.object.object("user").map(User::from_object)
    }
}

/// A user's status within a course: position bookmark and completion.
#[derive(Debug, Clone)]
pub struct UserCourseStatus {
    object: JsonObject,
}

impl FromJson for UserCourseStatus {
    fn from_object(object: JsonObject) -> Self {
        Self { object }
    }
}

impl UserCourseStatus {
    pub fn object(&self) -> &JsonObject {
        &self.object
    }

    pub fn course_id(&self) -> Option<&str> {
        self.object.string("course_id")
    }

    pub fn position(&self) -> Option<i64> {
        self.object.integer("position")
    }

    pub fn completed(&self) -> Option<bool> {
        self.object.boolean("completed")
    }
}

/// Users-by-city metrics.
#[derive(Debug, Clone)]
pub struct CityList {
    object: JsonObject,
}

impl FromJson for CityList {
    fn from_object(object: JsonObject) -> Self {
        Self { object }
    }
}

impl CityList {
    pub fn object(&self) -> &JsonObject {
        &self.object
    }

    /// One entry per city, each with the city name and user count.
    pub fn cities(&self) -> Vec<JsonObject> {
        self.object.objects("results")
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::json;

    #[test]
    fn test_full_name_falls_back_to_parts() {
        let user: User =
            json::from_value(json!({"first_name": "Ada", "last_name": "Lovelace"})).unwrap();
        assert_eq!(user.full_name().as_deref(), Some("Ada Lovelace"));

        let named: User = json::from_value(json!({
            "first_name": "Ada",
            "last_name": "Lovelace",
            "full_name": "Countess of Lovelace",
        }))
        .unwrap();
        assert_eq!(named.full_name().as_deref(), Some("Countess of Lovelace"));

        let anonymous: User = json::from_value(json!({"id": 1})).unwrap();
        assert_eq!(anonymous.full_name(), None);
    }

    #[test]
    fn test_role_names() {
        assert_eq!(UserRole::Staff.as_str(), "staff");
        assert_eq!(UserRole::Assistant.as_str(), "assistant");
        assert_eq!(UserRole::Instructor.to_string(), "instructor");
    }
}
