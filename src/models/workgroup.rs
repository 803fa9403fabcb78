//! Workgroup and project shapes.

use crate::json::{FromJson, JsonObject};

/// A workgroup within a project, as mapped from an API response.
#[derive(Debug, Clone)]
pub struct Workgroup {
    object: JsonObject,
}

impl FromJson for Workgroup {
    fn from_object(object: JsonObject) -> Self {
        Self { object }
    }
}

impl Workgroup {
    pub fn object(&self) -> &JsonObject {
        &self.object
    }

    pub fn id(&self) -> Option<i64> {
        self.object.integer("id")
    }

    pub fn name(&self) -> Option<&str> {
        self.object.string("name")
    }

    /// Id of the owning project.
    pub fn project(&self) -> Option<i64> {
        self.object.integer("project")
    }

    pub fn users(&self) -> Vec<JsonObject> {
        self.object.objects("users")
    }
}

/// A project anchoring workgroups to a course content location.
#[derive(Debug, Clone)]
pub struct Project {
    object: JsonObject,
}

impl FromJson for Project {
    fn from_object(object: JsonObject) -> Self {
        Self { object }
    }
}

impl Project {
    pub fn object(&self) -> &JsonObject {
        &self.object
    }

    pub fn id(&self) -> Option<i64> {
        self.object.integer("id")
    }

    pub fn course_id(&self) -> Option<&str> {
        self.object.string("course_id")
    }

    pub fn content_id(&self) -> Option<&str> {
        self.object.string("content_id")
    }

    pub fn organization(&self) -> Option<i64> {
        self.object.integer("organization")
    }

    pub fn workgroups(&self) -> Vec<i64> {
        self.object.integers("workgroups")
    }
}
