//! Type lookup into mods sharing the host process.

use super::event::{ModEvent, Priority};
use super::value::{AccessError, ModValue};
use dashmap::DashMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Resolves mod types by fully qualified name.
///
/// This is the only way a plugin learns whether a mod is installed: a mod
/// that is absent simply has no types to resolve.
pub trait ModLoader: Send + Sync {
    fn load_type(&self, name: &str) -> Result<Arc<dyn ModType>, LoadError>;
}

/// A resolved mod type exposing static fields.
pub trait ModType: Send + Sync {
    fn name(&self) -> &str;

    fn static_field(&self, field: &str) -> Result<StaticField, AccessError>;
}

/// The value of a static field on a mod type.
#[derive(Clone)]
pub enum StaticField {
    Event(Arc<dyn ModEvent>),
    Priority(Priority),
    Value(ModValue),
}

impl StaticField {
    /// Short name of the field's kind, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            StaticField::Event(_) => "event",
            StaticField::Priority(_) => "priority",
            StaticField::Value(_) => "value",
        }
    }
}

impl fmt::Debug for StaticField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StaticField::Event(event) => f.debug_tuple("Event").field(&event.name()).finish(),
            StaticField::Priority(priority) => f.debug_tuple("Priority").field(priority).finish(),
            StaticField::Value(value) => f.debug_tuple("Value").field(value).finish(),
        }
    }
}

/// Errors raised while resolving a mod type.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// No type with this name is loaded
    #[error("type not found: {0}")]
    NotFound(String),
    /// The name is not a dotted identifier path
    #[error("malformed type name: {0:?}")]
    Malformed(String),
}

/// Checks that a name is a dotted path of identifier segments.
pub fn is_valid_type_name(name: &str) -> bool {
    !name.is_empty()
        && name.split('.').all(|segment| {
            let mut chars = segment.chars();
            match chars.next() {
                Some(first) if first.is_alphabetic() || first == '_' || first == '$' => {
                    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
                }
                _ => false,
            }
        })
}

// ============================================================================
// In-process registry
// ============================================================================

/// A mod type assembled in-process from named static fields.
pub struct ModClass {
    name: String,
    fields: DashMap<String, StaticField>,
}

impl ModClass {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: DashMap::new(),
        }
    }

    /// Adds or replaces a static field.
    pub fn with_field(self, field: impl Into<String>, value: StaticField) -> Self {
        self.fields.insert(field.into(), value);
        self
    }
}

impl ModType for ModClass {
    fn name(&self) -> &str {
        &self.name
    }

    fn static_field(&self, field: &str) -> Result<StaticField, AccessError> {
        self.fields
            .get(field)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| AccessError::NoSuchField {
                type_name: self.name.clone(),
                field: field.to_string(),
            })
    }
}

impl fmt::Debug for ModClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModClass")
            .field("name", &self.name)
            .field("fields", &self.fields.len())
            .finish()
    }
}

/// Registry of the types mods have made visible to the host.
///
/// An empty registry behaves like a host without any mods installed.
#[derive(Default)]
pub struct ModRegistry {
    types: DashMap<String, Arc<dyn ModType>>,
}

impl ModRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes a type resolvable under its own name, replacing any previous one.
    pub fn register(&self, ty: Arc<dyn ModType>) {
        debug!("🧩 ModRegistry: registering type {}", ty.name());
        self.types.insert(ty.name().to_string(), ty);
    }

    /// Removes a type, returning whether it was registered.
    pub fn unregister(&self, name: &str) -> bool {
        self.types.remove(name).is_some()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl ModLoader for ModRegistry {
    fn load_type(&self, name: &str) -> Result<Arc<dyn ModType>, LoadError> {
        if !is_valid_type_name(name) {
            return Err(LoadError::Malformed(name.to_string()));
        }
        self.types
            .get(name)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| LoadError::NotFound(name.to_string()))
    }
}

impl fmt::Debug for ModRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModRegistry")
            .field("types", &self.types.len())
            .finish()
    }
}
