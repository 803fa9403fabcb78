//! Group shape.

use crate::json::{FromJson, JsonObject};

/// A group, as mapped from an API response.
#[derive(Debug, Clone)]
pub struct GroupInfo {
    object: JsonObject,
}

impl FromJson for GroupInfo {
    fn from_object(object: JsonObject) -> Self {
        Self { object }
    }
}

impl GroupInfo {
    pub fn object(&self) -> &JsonObject {
        &self.object
    }

    pub fn id(&self) -> Option<i64> {
        self.object.integer("id")
    }

    pub fn name(&self) -> Option<&str> {
        self.object.string("name")
    }

    pub fn group_type(&self) -> Option<&str> {
        self.object.string("type")
    }

    /// Free-form group data attached at creation.
    pub fn data(&self) -> Option<JsonObject> {
        self.object.object("data")
    }
}
