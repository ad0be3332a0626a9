//! Availability probe for the creature mod.
//!
//! Whether the mod is installed cannot change while the host runs, so the
//! probe runs once per enable and its answer is kept as a [`ModCapability`].

use bridge_api::modding::{ModLoader, ModType};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

pub const EVENTS_TYPE: &str = "com.cobblemon.mod.common.api.events.CobblemonEvents";
pub const PRIORITY_TYPE: &str = "com.cobblemon.mod.common.api.Priority";
pub const CAPTURE_EVENT_TYPE: &str = "com.cobblemon.mod.common.api.events.pokemon.PokemonCapturedEvent";

/// Type names the probe must resolve before the mod counts as present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModSymbols {
    pub events_type: String,
    pub priority_type: String,
    pub capture_event_type: String,
}

impl Default for ModSymbols {
    fn default() -> Self {
        Self {
            events_type: EVENTS_TYPE.to_string(),
            priority_type: PRIORITY_TYPE.to_string(),
            capture_event_type: CAPTURE_EVENT_TYPE.to_string(),
        }
    }
}

/// Outcome of the availability probe.
#[derive(Clone)]
pub enum ModCapability {
    /// All probed types resolved
    Available {
        events: Arc<dyn ModType>,
        priority: Arc<dyn ModType>,
    },
    Unavailable,
}

impl ModCapability {
    /// Resolves every probed type through `loader`. Any failure, whether the
    /// type is missing or its name is malformed, makes the mod unavailable.
    pub fn detect(loader: &dyn ModLoader, symbols: &ModSymbols) -> Self {
        let resolve = |name: &str| match loader.load_type(name) {
            Ok(ty) => Some(ty),
            Err(e) => {
                debug!("🎣 CaptureBridge: probe failed for {}: {}", name, e);
                None
            }
        };

        let Some(events) = resolve(&symbols.events_type) else {
            return ModCapability::Unavailable;
        };
        let Some(priority) = resolve(&symbols.priority_type) else {
            return ModCapability::Unavailable;
        };
        if resolve(&symbols.capture_event_type).is_none() {
            return ModCapability::Unavailable;
        }

        ModCapability::Available { events, priority }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, ModCapability::Available { .. })
    }
}

impl fmt::Debug for ModCapability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModCapability::Available { events, priority } => f
                .debug_struct("Available")
                .field("events", &events.name())
                .field("priority", &priority.name())
                .finish(),
            ModCapability::Unavailable => f.write_str("Unavailable"),
        }
    }
}

/// True iff every probed type resolves.
pub fn probe(loader: &dyn ModLoader, symbols: &ModSymbols) -> bool {
    ModCapability::detect(loader, symbols).is_available()
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_api::modding::{ModClass, ModRegistry};

    fn registry_with(names: &[&str]) -> ModRegistry {
        let registry = ModRegistry::new();
        for name in names {
            registry.register(Arc::new(ModClass::new(*name)));
        }
        registry
    }

    #[test]
    fn all_types_present_means_available() {
        let registry = registry_with(&[EVENTS_TYPE, PRIORITY_TYPE, CAPTURE_EVENT_TYPE]);
        assert!(probe(&registry, &ModSymbols::default()));
    }

    #[test]
    fn any_missing_type_means_unavailable() {
        let all = [EVENTS_TYPE, PRIORITY_TYPE, CAPTURE_EVENT_TYPE];
        for missing in all {
            let present: Vec<&str> = all.iter().copied().filter(|name| *name != missing).collect();
            let registry = registry_with(&present);
            assert!(!probe(&registry, &ModSymbols::default()), "{} missing", missing);
        }
    }

    #[test]
    fn malformed_name_means_unavailable() {
        let registry = registry_with(&[EVENTS_TYPE, PRIORITY_TYPE, CAPTURE_EVENT_TYPE]);
        let symbols = ModSymbols {
            capture_event_type: "com..broken".to_string(),
            ..ModSymbols::default()
        };
        assert!(!probe(&registry, &symbols));
    }

    #[test]
    fn empty_host_means_unavailable() {
        let capability = ModCapability::detect(&ModRegistry::new(), &ModSymbols::default());
        assert!(!capability.is_available());
        assert_eq!(format!("{:?}", capability), "Unavailable");
    }
}
