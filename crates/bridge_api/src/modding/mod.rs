//! # Mod Capability Surface
//!
//! Mods loaded into the same process as the host are never linked against
//! directly. Plugins reach them through this module's traits only:
//!
//! - [`ModLoader`] resolves a mod type by name, or reports it missing
//! - [`ModType`] exposes static fields: events, priorities, constants
//! - [`ModEvent`] accepts subscribers at a [`Priority`]
//! - [`ModObject`] is an event payload or domain object read through named,
//!   fallible accessors returning [`ModValue`]s
//!
//! The in-process implementations ([`ModRegistry`], [`ModClass`],
//! [`EventChannel`], [`JsonObject`]) let a host publish mod types without
//! any mod-specific code.

pub mod event;
pub mod json;
pub mod loader;
pub mod value;

pub use event::{EventChannel, ModEvent, ModHandler, Priority};
pub use json::JsonObject;
pub use loader::{ModClass, ModLoader, ModRegistry, ModType, LoadError, StaticField};
pub use value::{simple_type_name, AccessError, ModObject, ModRef, ModValue};
