//! Subscription of the capture handler to the mod's event bus.

use crate::error::BridgeError;
use crate::probe::ModCapability;
use bridge_api::modding::{ModHandler, ModType, StaticField};
use std::sync::Arc;

pub const CAPTURE_EVENT_FIELD: &str = "POKEMON_CAPTURED";
pub const NORMAL_PRIORITY_FIELD: &str = "NORMAL";

/// Registers `handler` on the capture event at normal priority.
///
/// Nothing deduplicates repeated calls; each call adds one more subscriber.
pub fn subscribe_capture(capability: &ModCapability, handler: ModHandler) -> Result<(), BridgeError> {
    let ModCapability::Available { events, priority } = capability else {
        return Err(BridgeError::Unavailable);
    };

    let event = match events.static_field(CAPTURE_EVENT_FIELD)? {
        StaticField::Event(event) => event,
        other => return Err(unexpected(events, CAPTURE_EVENT_FIELD, "event", &other)),
    };
    let normal = match priority.static_field(NORMAL_PRIORITY_FIELD)? {
        StaticField::Priority(normal) => normal,
        other => return Err(unexpected(priority, NORMAL_PRIORITY_FIELD, "priority", &other)),
    };

    event.subscribe(normal, handler)?;
    Ok(())
}

fn unexpected(ty: &Arc<dyn ModType>, field: &str, expected: &'static str, found: &StaticField) -> BridgeError {
    BridgeError::UnexpectedField {
        type_name: ty.name().to_string(),
        field: field.to_string(),
        expected,
        found: found.kind(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::{ModSymbols, CAPTURE_EVENT_TYPE, EVENTS_TYPE, PRIORITY_TYPE};
    use bridge_api::modding::{EventChannel, ModClass, ModRef, ModRegistry, ModValue, Priority};

    fn noop() -> ModHandler {
        Arc::new(|_event: ModRef| {})
    }

    fn capability(events: ModClass, priority: ModClass) -> ModCapability {
        let registry = ModRegistry::new();
        registry.register(Arc::new(events));
        registry.register(Arc::new(priority));
        registry.register(Arc::new(ModClass::new(CAPTURE_EVENT_TYPE)));
        ModCapability::detect(&registry, &ModSymbols::default())
    }

    #[test]
    fn subscribes_at_normal_priority() {
        let channel = Arc::new(EventChannel::new(CAPTURE_EVENT_FIELD));
        let capability = capability(
            ModClass::new(EVENTS_TYPE).with_field(CAPTURE_EVENT_FIELD, StaticField::Event(channel.clone())),
            ModClass::new(PRIORITY_TYPE).with_field(NORMAL_PRIORITY_FIELD, StaticField::Priority(Priority::Normal)),
        );

        subscribe_capture(&capability, noop()).unwrap();
        subscribe_capture(&capability, noop()).unwrap();

        assert_eq!(channel.handler_count(), 2);
    }

    #[test]
    fn unavailable_capability_is_rejected() {
        assert!(matches!(
            subscribe_capture(&ModCapability::Unavailable, noop()),
            Err(BridgeError::Unavailable)
        ));
    }

    #[test]
    fn missing_event_field_is_reported() {
        let capability = capability(
            ModClass::new(EVENTS_TYPE),
            ModClass::new(PRIORITY_TYPE).with_field(NORMAL_PRIORITY_FIELD, StaticField::Priority(Priority::Normal)),
        );

        assert!(matches!(
            subscribe_capture(&capability, noop()),
            Err(BridgeError::Access(_))
        ));
    }

    #[test]
    fn wrong_field_kind_is_reported() {
        let capability = capability(
            ModClass::new(EVENTS_TYPE)
                .with_field(CAPTURE_EVENT_FIELD, StaticField::Value(ModValue::from("not an event"))),
            ModClass::new(PRIORITY_TYPE).with_field(NORMAL_PRIORITY_FIELD, StaticField::Priority(Priority::Normal)),
        );

        let err = subscribe_capture(&capability, noop()).unwrap_err();
        assert!(matches!(
            err,
            BridgeError::UnexpectedField { expected: "event", found: "value", .. }
        ));
    }
}
