//! Generic JSON-to-object mapping.
//!
//! API responses arrive as arbitrary JSON objects or arrays of objects.
//! Rather than fixing a schema per endpoint, responses map into a
//! [`JsonObject`] - a dynamic record exposing every key of the payload
//! through typed accessor helpers - or into any target shape implementing
//! [`FromJson`]. Resource-specific shapes (see [`crate::models`]) wrap a
//! `JsonObject` and add convenience accessors without changing the
//! mapping mechanism.

use serde_json::{Map, Value};

use crate::error::ApiError;

/// Dynamic record over a JSON object's keys.
///
/// Accessors return `None` when the key is absent or has a different
/// type; nested objects and arrays are mapped recursively on access.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JsonObject {
    fields: Map<String, Value>,
}

impl JsonObject {
    /// Build from a parsed value. Fails unless the value is an object.
    pub fn from_value(value: Value) -> Result<Self, ApiError> {
        match value {
            Value::Object(fields) => Ok(Self { fields }),
            other => Err(ApiError::InvalidResponse(format!(
                "expected a JSON object, got {}",
                type_name(&other)
            ))),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Set a field locally. Does not touch the remote resource.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.fields.insert(key.into(), value);
    }

    pub fn string(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    pub fn integer(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(Value::as_i64)
    }

    pub fn float(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(Value::as_f64)
    }

    pub fn boolean(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(Value::as_bool)
    }

    /// Nested object under `key`, mapped as another `JsonObject`.
    pub fn object(&self, key: &str) -> Option<JsonObject> {
        match self.get(key) {
            Some(Value::Object(fields)) => Some(JsonObject {
                fields: fields.clone(),
            }),
            _ => None,
        }
    }

    /// Nested array of objects under `key`. Non-object elements are
    /// skipped; an absent or non-array field yields an empty vec.
    pub fn objects(&self, key: &str) -> Vec<JsonObject> {
        match self.get(key) {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|item| match item {
                    Value::Object(fields) => Some(JsonObject {
                        fields: fields.clone(),
                    }),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        }
    }

    pub fn integers(&self, key: &str) -> Vec<i64> {
        match self.get(key) {
            Some(Value::Array(items)) => items.iter().filter_map(Value::as_i64).collect(),
            _ => Vec::new(),
        }
    }

    pub fn strings(&self, key: &str) -> Vec<String> {
        match self.get(key) {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|item| item.as_str().map(str::to_string))
                .collect(),
            _ => Vec::new(),
        }
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.fields)
    }
}

/// Target shape for the mapper.
///
/// Implementors act as factories: the mapper constructs one instance per
/// JSON object in the payload. Wrapping the [`JsonObject`] keeps every
/// field reachable while letting shapes add resource-specific accessors.
pub trait FromJson: Sized {
    /// Advisory list of fields a well-formed instance is expected to
    /// carry. Not validated by the mapper; documentation only.
    const REQUIRED_FIELDS: &'static [&'static str] = &[];

    fn from_object(object: JsonObject) -> Self;
}

impl FromJson for JsonObject {
    fn from_object(object: JsonObject) -> Self {
        object
    }
}

/// Map raw JSON text holding a single object into one instance of `T`.
///
/// An array payload is rejected; use [`parse_many`] for those.
pub fn parse_one<T: FromJson>(text: &str) -> Result<T, ApiError> {
    let value: Value = serde_json::from_str(text)?;
    from_value(value)
}

/// Map raw JSON text into a sequence of `T`, one per top-level object.
///
/// An empty array yields an empty vec. A lone object yields a
/// one-element vec, matching endpoints that collapse single results.
pub fn parse_many<T: FromJson>(text: &str) -> Result<Vec<T>, ApiError> {
    let value: Value = serde_json::from_str(text)?;
    many_from_value(value)
}

/// Map an already-parsed value into one instance of `T`.
pub fn from_value<T: FromJson>(value: Value) -> Result<T, ApiError> {
    Ok(T::from_object(JsonObject::from_value(value)?))
}

/// Map an already-parsed value into a sequence of `T`.
pub fn many_from_value<T: FromJson>(value: Value) -> Result<Vec<T>, ApiError> {
    match value {
        Value::Array(items) => items.into_iter().map(from_value).collect(),
        Value::Object(_) => Ok(vec![from_value(value)?]),
        other => Err(ApiError::InvalidResponse(format!(
            "expected a JSON object or array, got {}",
            type_name(&other)
        ))),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_single_object_round_trips_keys() {
        let object: JsonObject =
            parse_one(r#"{"id": 42, "name": "Acme", "active": true, "score": 9.5}"#)
                .expect("valid object");
        assert_eq!(object.integer("id"), Some(42));
        assert_eq!(object.string("name"), Some("Acme"));
        assert_eq!(object.boolean("active"), Some(true));
        assert_eq!(object.float("score"), Some(9.5));
        assert_eq!(object.len(), 4);
        assert_eq!(object.into_value()["name"], json!("Acme"));
    }

    #[test]
    fn test_array_preserves_length_and_order() {
        let objects: Vec<JsonObject> =
            parse_many(r#"[{"id": 1}, {"id": 2}, {"id": 3}]"#).expect("valid array");
        assert_eq!(objects.len(), 3);
        let ids: Vec<i64> = objects.iter().filter_map(|o| o.integer("id")).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_empty_array_maps_to_empty_vec() {
        let objects: Vec<JsonObject> = parse_many("[]").expect("valid array");
        assert!(objects.is_empty());
    }

    #[test]
    fn test_lone_object_maps_to_single_element() {
        let objects: Vec<JsonObject> = parse_many(r#"{"id": 7}"#).expect("valid object");
        assert_eq!(objects.len(), 1);
        assert_eq!(objects[0].integer("id"), Some(7));
    }

    #[test]
    fn test_nested_objects_map_recursively() {
        let object: JsonObject = parse_one(
            r#"{"id": 1, "owner": {"name": "Ada"}, "tags": [{"label": "a"}, {"label": "b"}]}"#,
        )
        .expect("valid object");

        let owner = object.object("owner").expect("nested object");
        assert_eq!(owner.string("name"), Some("Ada"));

        let tags = object.objects("tags");
        assert_eq!(tags.len(), 2);
        assert_eq!(tags[1].string("label"), Some("b"));
    }

    #[test]
    fn test_malformed_json_is_a_parse_error() {
        let result = parse_one::<JsonObject>("{not json");
        assert!(matches!(result, Err(ApiError::Parse(_))));
    }

    #[test]
    fn test_array_rejected_by_parse_one() {
        let result = parse_one::<JsonObject>("[]");
        assert!(matches!(result, Err(ApiError::InvalidResponse(_))));
    }

    #[test]
    fn test_scalar_rejected_by_parse_many() {
        let result = parse_many::<JsonObject>("3");
        assert!(matches!(result, Err(ApiError::InvalidResponse(_))));
    }

    #[test]
    fn test_typed_accessors_tolerate_missing_and_mistyped() {
        let object: JsonObject = parse_one(r#"{"id": "not a number"}"#).expect("valid object");
        assert_eq!(object.integer("id"), None);
        assert_eq!(object.string("missing"), None);
        assert!(object.objects("missing").is_empty());
        assert!(object.integers("id").is_empty());
    }
}
