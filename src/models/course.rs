//! Course shape.

use crate::json::{FromJson, JsonObject};

/// A course summary, as mapped from an API response. Nested content
/// (chapters and below) stays generically mapped.
#[derive(Debug, Clone)]
pub struct Course {
    object: JsonObject,
}

impl FromJson for Course {
    fn from_object(object: JsonObject) -> Self {
        Self { object }
    }
}

impl Course {
    pub fn object(&self) -> &JsonObject {
        &self.object
    }

    pub fn id(&self) -> Option<&str> {
        self.object.string("id")
    }

    pub fn name(&self) -> Option<&str> {
        self.object.string("name")
    }

    pub fn category(&self) -> Option<&str> {
        self.object.string("category")
    }

    pub fn start(&self) -> Option<&str> {
        self.object.string("start")
    }

    pub fn end(&self) -> Option<&str> {
        self.object.string("end")
    }

    pub fn chapters(&self) -> Vec<JsonObject> {
        self.object.objects("chapters")
    }
}
