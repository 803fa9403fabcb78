//! Gradebook shape.

use crate::json::{FromJson, JsonObject};

/// Grade data for a user or a course, as mapped from an API response.
/// The summary structure varies by grading policy, so it stays
/// generically mapped.
#[derive(Debug, Clone)]
pub struct Gradebook {
    object: JsonObject,
}

impl FromJson for Gradebook {
    fn from_object(object: JsonObject) -> Self {
        Self { object }
    }
}

impl Gradebook {
    pub fn object(&self) -> &JsonObject {
        &self.object
    }

    pub fn course_id(&self) -> Option<&str> {
        self.object.string("course_id")
    }

    /// Current grade, 0.0 to 1.0.
    pub fn grade(&self) -> Option<f64> {
        self.object.float("grade")
    }

    /// Projected grade assuming remaining work scores like completed
    /// work.
    pub fn proforma_grade(&self) -> Option<f64> {
        self.object.float("proforma_grade")
    }

    /// Course-wide average, on aggregate gradebooks.
    pub fn grade_average(&self) -> Option<f64> {
        self.object.float("grade_average")
    }

    pub fn grade_summary(&self) -> Option<JsonObject> {
        self.object.object("grade_summary")
    }

    pub fn grades(&self) -> Vec<JsonObject> {
        self.object.objects("grades")
    }
}
