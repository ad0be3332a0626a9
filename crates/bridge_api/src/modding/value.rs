//! Loosely typed values and objects handed out by mods.

use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// Shared handle to an object owned by a mod.
pub type ModRef = Arc<dyn ModObject>;

/// An object owned by a mod, reachable only through named accessors.
///
/// Mods expose their domain objects through this trait instead of concrete
/// types so plugins never link against a mod directly. Every access is
/// fallible and every result is optional: `Ok(None)` means the accessor
/// exists and returned nothing.
pub trait ModObject: Send + Sync {
    /// Fully qualified runtime type name.
    fn type_name(&self) -> &str;

    /// Runtime type name without its package or module path.
    fn simple_name(&self) -> &str {
        simple_type_name(self.type_name())
    }

    /// Calls a named accessor, e.g. `getLevel`.
    fn invoke(&self, accessor: &str) -> Result<Option<ModValue>, AccessError>;

    /// Generic textual form of the object.
    fn to_text(&self) -> String;
}

/// Strips a dotted or `::` separated path down to its last segment.
pub fn simple_type_name(type_name: &str) -> &str {
    let after_dots = type_name.rsplit('.').next().unwrap_or(type_name);
    after_dots.rsplit("::").next().unwrap_or(after_dots)
}

/// A value returned from a mod accessor.
#[derive(Clone)]
pub enum ModValue {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Uuid(Uuid),
    Object(ModRef),
}

impl ModValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ModValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            ModValue::Int(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ModValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_uuid(&self) -> Option<Uuid> {
        match self {
            ModValue::Uuid(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ModRef> {
        match self {
            ModValue::Object(object) => Some(object),
            _ => None,
        }
    }

    /// Short name of the value's kind, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            ModValue::Text(_) => "text",
            ModValue::Int(_) => "int",
            ModValue::Float(_) => "float",
            ModValue::Bool(_) => "bool",
            ModValue::Uuid(_) => "uuid",
            ModValue::Object(_) => "object",
        }
    }

    /// Generic textual form of the value.
    pub fn to_text(&self) -> String {
        match self {
            ModValue::Text(text) => text.clone(),
            ModValue::Int(value) => value.to_string(),
            ModValue::Float(value) => value.to_string(),
            ModValue::Bool(value) => value.to_string(),
            ModValue::Uuid(value) => value.to_string(),
            ModValue::Object(object) => object.to_text(),
        }
    }
}

impl fmt::Debug for ModValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModValue::Text(text) => f.debug_tuple("Text").field(text).finish(),
            ModValue::Int(value) => f.debug_tuple("Int").field(value).finish(),
            ModValue::Float(value) => f.debug_tuple("Float").field(value).finish(),
            ModValue::Bool(value) => f.debug_tuple("Bool").field(value).finish(),
            ModValue::Uuid(value) => f.debug_tuple("Uuid").field(value).finish(),
            ModValue::Object(object) => f.debug_tuple("Object").field(&object.type_name()).finish(),
        }
    }
}

impl From<&str> for ModValue {
    fn from(text: &str) -> Self {
        ModValue::Text(text.to_string())
    }
}

impl From<String> for ModValue {
    fn from(text: String) -> Self {
        ModValue::Text(text)
    }
}

impl From<i64> for ModValue {
    fn from(value: i64) -> Self {
        ModValue::Int(value)
    }
}

impl From<bool> for ModValue {
    fn from(value: bool) -> Self {
        ModValue::Bool(value)
    }
}

impl From<Uuid> for ModValue {
    fn from(value: Uuid) -> Self {
        ModValue::Uuid(value)
    }
}

impl From<ModRef> for ModValue {
    fn from(object: ModRef) -> Self {
        ModValue::Object(object)
    }
}

/// Errors raised while reading from mod objects and types.
#[derive(Debug, thiserror::Error)]
pub enum AccessError {
    /// The runtime type has no accessor with this name
    #[error("{type_name} has no accessor `{accessor}`")]
    NoSuchAccessor { type_name: String, accessor: String },
    /// The runtime type has no static field with this name
    #[error("{type_name} has no static field `{field}`")]
    NoSuchField { type_name: String, field: String },
    /// The accessor exists but failed when called
    #[error("`{accessor}` failed: {message}")]
    Invocation { accessor: String, message: String },
}

impl AccessError {
    pub fn no_such_accessor(type_name: &str, accessor: &str) -> Self {
        AccessError::NoSuchAccessor {
            type_name: type_name.to_string(),
            accessor: accessor.to_string(),
        }
    }

    pub fn invocation(accessor: &str, message: impl Into<String>) -> Self {
        AccessError::Invocation {
            accessor: accessor.to_string(),
            message: message.into(),
        }
    }

    /// True when the accessor simply does not exist on the runtime type.
    pub fn is_missing_accessor(&self) -> bool {
        matches!(self, AccessError::NoSuchAccessor { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_name_strips_dotted_and_rust_paths() {
        assert_eq!(simple_type_name("net.minecraft.server.level.ServerPlayer"), "ServerPlayer");
        assert_eq!(simple_type_name("cobble::player::NativePlayer"), "NativePlayer");
        assert_eq!(simple_type_name("Plain"), "Plain");
    }

    #[test]
    fn typed_views_only_match_their_own_kind() {
        let level = ModValue::Int(12);
        assert_eq!(level.as_int(), Some(12));
        assert_eq!(level.as_bool(), None);
        assert_eq!(level.as_text(), None);
        assert_eq!(level.to_text(), "12");

        let shiny = ModValue::from(true);
        assert_eq!(shiny.as_bool(), Some(true));
        assert_eq!(shiny.kind(), "bool");
    }

    #[test]
    fn missing_accessor_is_distinguished_from_failures() {
        assert!(AccessError::no_such_accessor("Pokemon", "getShiny").is_missing_accessor());
        assert!(!AccessError::invocation("getShiny", "boom").is_missing_accessor());
    }
}
