//! Mod objects backed by JSON documents.
//!
//! Mods that publish their events as JSON (or hosts that receive them over a
//! bridge) wrap each document in a [`JsonObject`]. Accessors map onto keys:
//! `getUUID` reads `uuid`, `getDisplayName` reads `displayName`, `isShiny`
//! reads `shiny`. Two reserved keys shape the object itself: `$type` names its
//! runtime type and `$text` overrides its textual form.

use super::value::{AccessError, ModObject, ModRef, ModValue};
use serde_json::{Map, Value};
use std::sync::Arc;
use uuid::Uuid;

const TYPE_KEY: &str = "$type";
const TEXT_KEY: &str = "$text";
const NESTED_TYPE: &str = "java.lang.Object";

#[derive(Debug, Clone)]
pub struct JsonObject {
    type_name: String,
    fields: Map<String, Value>,
}

impl JsonObject {
    /// Wraps a JSON value. A `$type` key inside the document takes
    /// precedence over `type_name`; a non-object value becomes an object
    /// whose textual form is the value itself.
    pub fn new(type_name: impl Into<String>, value: Value) -> Self {
        let mut fields = match value {
            Value::Object(map) => map,
            other => {
                let mut map = Map::new();
                map.insert(TEXT_KEY.to_string(), Value::String(json_text(&other)));
                map
            }
        };
        let type_name = match fields.remove(TYPE_KEY) {
            Some(Value::String(declared)) => declared,
            _ => type_name.into(),
        };
        Self { type_name, fields }
    }

    /// Wraps a JSON value as a shared mod object.
    pub fn from_json(type_name: impl Into<String>, value: Value) -> ModRef {
        Arc::new(Self::new(type_name, value))
    }

    fn convert(value: &Value) -> Option<ModValue> {
        match value {
            Value::Null => None,
            Value::Bool(flag) => Some(ModValue::Bool(*flag)),
            Value::Number(number) => Some(match number.as_i64() {
                Some(int) => ModValue::Int(int),
                None => ModValue::Float(number.as_f64().unwrap_or_default()),
            }),
            Value::String(text) => Some(match hyphenated_uuid(text) {
                Some(uuid) => ModValue::Uuid(uuid),
                None => ModValue::Text(text.clone()),
            }),
            Value::Object(_) => Some(ModValue::Object(Self::from_json(NESTED_TYPE, value.clone()))),
            Value::Array(_) => Some(ModValue::Text(value.to_string())),
        }
    }
}

impl ModObject for JsonObject {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn invoke(&self, accessor: &str) -> Result<Option<ModValue>, AccessError> {
        let key = accessor_key(accessor);
        if key.starts_with('$') {
            return Err(AccessError::no_such_accessor(&self.type_name, accessor));
        }
        self.fields
            .get(&key)
            .map(Self::convert)
            .ok_or_else(|| AccessError::no_such_accessor(&self.type_name, accessor))
    }

    fn to_text(&self) -> String {
        if let Some(Value::String(text)) = self.fields.get(TEXT_KEY) {
            return text.clone();
        }
        let body = self
            .fields
            .iter()
            .filter(|(key, _)| !key.starts_with('$'))
            .map(|(key, value)| format!("{}={}", key, json_text(value)))
            .collect::<Vec<_>>()
            .join(", ");
        format!("{}{{{}}}", self.simple_name(), body)
    }
}

/// Maps an accessor name onto the JSON key it reads.
///
/// `getLevel` → `level`, `getUUID` → `uuid`, `isShiny` → `shiny`. Names
/// without a `get`/`is` prefix are used unchanged.
pub fn accessor_key(accessor: &str) -> String {
    let property = accessor
        .strip_prefix("get")
        .or_else(|| accessor.strip_prefix("is"))
        .filter(|rest| rest.chars().next().is_some_and(|c| c.is_uppercase()));
    let Some(property) = property else {
        return accessor.to_string();
    };
    if property.chars().all(|c| !c.is_lowercase()) {
        return property.to_lowercase();
    }
    let mut chars = property.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Only the canonical 36 character form counts as a UUID; other shapes
/// `Uuid::parse_str` accepts (simple hex, braced, urn) stay text.
fn hyphenated_uuid(text: &str) -> Option<Uuid> {
    if text.len() != 36 {
        return None;
    }
    Uuid::parse_str(text).ok()
}

fn json_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Object(_) => JsonObject::new(NESTED_TYPE, value.clone()).to_text(),
        other => other.to_string(),
    }
}
