//! Operations on courses.

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::json::{self, FromJson, JsonObject};

impl ApiClient {
    /// Fetch all courses.
    pub async fn get_courses<T: FromJson>(&self) -> Result<Vec<T>, ApiError> {
        let url = self.endpoint(&self.config().prefixes.courses, "");
        let query = [("page_size", "0".to_string())];
        let response = self.get_with_query("get_courses", &url, &query).await?;
        json::parse_many(&response.body)
    }

    /// Fetch a course by id. `depth` controls how many levels of course
    /// content come back inline.
    pub async fn fetch_course<T: FromJson>(
        &self,
        course_id: &str,
        depth: Option<u32>,
    ) -> Result<T, ApiError> {
        let url = self.endpoint(&self.config().prefixes.courses, &format!("/{}", course_id));
        let mut query = Vec::new();
        if let Some(depth) = depth {
            query.push(("depth", depth.to_string()));
        }
        let response = self.get_with_query("fetch_course", &url, &query).await?;
        json::parse_one(&response.body)
    }

    /// Fetch the users enrolled in a course.
    pub async fn get_course_users<T: FromJson>(&self, course_id: &str) -> Result<Vec<T>, ApiError> {
        let url = self.endpoint(
            &self.config().prefixes.courses,
            &format!("/{}/users", course_id),
        );
        let response = self.get("get_course_users", &url).await?;
        json::parse_many(&response.body)
    }

    /// Fetch course metrics, filtered by the given query parameters.
    pub async fn get_course_metrics(
        &self,
        course_id: &str,
        filters: &[(&str, String)],
    ) -> Result<JsonObject, ApiError> {
        let url = self.endpoint(
            &self.config().prefixes.courses,
            &format!("/{}/metrics/", course_id),
        );
        let response = self
            .get_with_query("get_course_metrics", &url, filters)
            .await?;
        json::parse_one(&response.body)
    }
}
