//! Course-level gradebook operations. The per-user gradebook lives with
//! the user operations
//! ([`get_user_gradebook`](crate::ApiClient::get_user_gradebook)).

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::json::{self, FromJson, JsonObject};

impl ApiClient {
    /// Fetch the aggregate gradebook for a course.
    pub async fn get_course_gradebook<G: FromJson>(&self, course_id: &str) -> Result<G, ApiError> {
        let url = self.endpoint(
            &self.config().prefixes.courses,
            &format!("/{}/grades", course_id),
        );
        let response = self.get("get_course_gradebook", &url).await?;
        json::parse_one(&response.body)
    }

    /// Fetch the course grade leaderboard, optionally limited to the
    /// top `count` entries.
    pub async fn get_course_grades_leaders(
        &self,
        course_id: &str,
        count: Option<u32>,
    ) -> Result<JsonObject, ApiError> {
        let url = self.endpoint(
            &self.config().prefixes.courses,
            &format!("/{}/metrics/grades/leaders/", course_id),
        );
        let mut query = Vec::new();
        if let Some(count) = count {
            query.push(("count", count.to_string()));
        }
        let response = self
            .get_with_query("get_course_grades_leaders", &url, &query)
            .await?;
        json::parse_one(&response.body)
    }
}
