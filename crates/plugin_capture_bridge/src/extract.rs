//! # Payload Extraction
//!
//! Typed views over the capture event and its creature. All loosely typed
//! access to mod objects happens here; everything downstream works with
//! [`CapturePayload`].
//!
//! ## Fallbacks
//!
//! | Field   | Absent / null / wrong kind | Accessor fails |
//! |---------|----------------------------|----------------|
//! | creature | warn, skip event          | abort event    |
//! | species | `未知物种`                   | abort event    |
//! | level   | `0`                        | abort event    |
//! | shiny   | `false`                    | abort event    |
//! | nature  | `未知`                      | warn, `未知`    |
//! | player  | none                       | abort event    |

use crate::error::BridgeError;
use bridge_api::modding::{AccessError, ModObject, ModRef, ModValue};
use bridge_api::{LogLevel, ServerContext};

pub const UNKNOWN_SPECIES: &str = "未知物种";
pub const UNKNOWN_NATURE: &str = "未知";

/// Scalar fields read from one capture event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturePayload {
    pub species_name: String,
    pub level: i64,
    pub is_shiny: bool,
    pub nature_name: String,
}

/// A capture event's payload together with the player that caused it.
pub struct ExtractedCapture {
    pub payload: CapturePayload,
    /// The mod's own player object, not yet resolved to a host player
    pub native_player: Option<ModRef>,
}

/// Typed view over a capture event object.
pub struct CaptureEventView<'a> {
    event: &'a dyn ModObject,
}

impl<'a> CaptureEventView<'a> {
    pub fn new(event: &'a dyn ModObject) -> Self {
        Self { event }
    }

    /// The captured creature. The accessor itself is required.
    pub fn creature(&self) -> Result<Option<CreatureView>, BridgeError> {
        match self.event.invoke("getPokemon")? {
            None => Ok(None),
            Some(ModValue::Object(creature)) => Ok(Some(CreatureView { creature })),
            Some(other) => Err(BridgeError::UnexpectedValue {
                accessor: "getPokemon".to_string(),
                expected: "object",
                found: other.kind(),
            }),
        }
    }

    /// The native player that made the capture, if the event carries one.
    pub fn native_player(&self) -> Result<Option<ModRef>, BridgeError> {
        Ok(read_optional(self.event, "getPlayer")?.and_then(|value| value.as_object().cloned()))
    }
}

/// Typed view over a captured creature.
pub struct CreatureView {
    creature: ModRef,
}

impl CreatureView {
    pub fn species_name(&self) -> Result<String, BridgeError> {
        let Some(ModValue::Object(species)) = read_optional(self.creature.as_ref(), "getSpecies")? else {
            return Ok(UNKNOWN_SPECIES.to_string());
        };
        Ok(match read_optional(species.as_ref(), "getName")? {
            Some(ModValue::Text(name)) => name,
            _ => UNKNOWN_SPECIES.to_string(),
        })
    }

    pub fn level(&self) -> Result<i64, BridgeError> {
        Ok(read_optional(self.creature.as_ref(), "getLevel")?
            .and_then(|value| value.as_int())
            .unwrap_or(0))
    }

    pub fn is_shiny(&self) -> Result<bool, BridgeError> {
        Ok(read_optional(self.creature.as_ref(), "getShiny")?
            .and_then(|value| value.as_bool())
            .unwrap_or(false))
    }

    /// Display name of the creature's nature.
    ///
    /// The display name is either plain text or a text component that has
    /// to be unwrapped with `getString`; a component without `getString`
    /// falls back to its textual form.
    pub fn nature_name(&self) -> Result<String, AccessError> {
        let Some(nature) = self.creature.invoke("getNature")? else {
            return Ok(UNKNOWN_NATURE.to_string());
        };
        let nature = match nature {
            ModValue::Object(nature) => nature,
            other => return Err(AccessError::no_such_accessor(other.kind(), "getDisplayName")),
        };
        let Some(display_name) = nature.invoke("getDisplayName")? else {
            return Ok(UNKNOWN_NATURE.to_string());
        };
        match display_name {
            ModValue::Text(text) => Ok(text),
            ModValue::Object(component) => match component.invoke("getString") {
                Ok(Some(ModValue::Text(text))) => Ok(text),
                Ok(_) => Ok(UNKNOWN_NATURE.to_string()),
                Err(e) if e.is_missing_accessor() => Ok(component.to_text()),
                Err(e) => Err(e),
            },
            other => Ok(other.to_text()),
        }
    }
}

/// Reads every payload field from a capture event.
///
/// Returns `Ok(None)` when the event carries no creature, after logging a
/// warning. A failing nature lookup is logged and replaced with `未知`; any
/// other failure aborts extraction for this event.
pub fn extract_capture(
    event: &dyn ModObject,
    context: &dyn ServerContext,
) -> Result<Option<ExtractedCapture>, BridgeError> {
    let view = CaptureEventView::new(event);
    let Some(creature) = view.creature()? else {
        context.log(LogLevel::Warn, "🎣 CaptureBridge: capture event carried no creature");
        return Ok(None);
    };
    let native_player = view.native_player()?;

    let species_name = creature.species_name()?;
    let level = creature.level()?;
    let is_shiny = creature.is_shiny()?;
    let nature_name = creature.nature_name().unwrap_or_else(|e| {
        context.log(
            LogLevel::Warn,
            &format!("🎣 CaptureBridge: failed to read nature name: {}", e),
        );
        UNKNOWN_NATURE.to_string()
    });

    Ok(Some(ExtractedCapture {
        payload: CapturePayload {
            species_name,
            level,
            is_shiny,
            nature_name,
        },
        native_player,
    }))
}

/// Calls an accessor, treating a missing accessor like a null result.
fn read_optional(object: &dyn ModObject, accessor: &str) -> Result<Option<ModValue>, AccessError> {
    match object.invoke(accessor) {
        Err(e) if e.is_missing_accessor() => Ok(None),
        other => other,
    }
}
