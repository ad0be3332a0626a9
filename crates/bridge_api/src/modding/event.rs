//! Mod-side event channels with priority-ordered subscribers.

use super::value::{AccessError, ModRef};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use tracing::{error, trace};

/// Subscriber ordering used by mod event buses.
///
/// Handlers registered at a higher priority run first; handlers sharing a
/// priority run in registration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Priority {
    Highest,
    High,
    Normal,
    Low,
    Lowest,
}

impl Priority {
    /// Every priority, in dispatch order.
    pub const ALL: [Priority; 5] = [
        Priority::Highest,
        Priority::High,
        Priority::Normal,
        Priority::Low,
        Priority::Lowest,
    ];
}

/// Callback invoked with the event object each time the event fires.
pub type ModHandler = Arc<dyn Fn(ModRef) + Send + Sync>;

/// A named event exported by a mod.
pub trait ModEvent: Send + Sync {
    fn name(&self) -> &str;

    /// Registers a handler. Registering the same handler twice delivers
    /// each event to it twice.
    fn subscribe(&self, priority: Priority, handler: ModHandler) -> Result<(), AccessError>;
}

/// In-process event channel.
///
/// Handlers are stored per priority in a `DashMap`. Dispatch snapshots the
/// handler lists first, so a handler may subscribe further handlers while an
/// event is being delivered; those only see later events.
pub struct EventChannel {
    name: String,
    handlers: DashMap<Priority, Vec<ModHandler>>,
}

impl EventChannel {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            handlers: DashMap::new(),
        }
    }

    /// Total number of registered handlers across all priorities.
    pub fn handler_count(&self) -> usize {
        self.handlers.iter().map(|entry| entry.value().len()).sum()
    }

    /// Delivers an event to every handler in priority order.
    ///
    /// A panicking handler is logged and skipped; the remaining handlers
    /// still run. Returns how many handlers completed normally.
    pub fn emit(&self, event: ModRef) -> usize {
        let snapshot: Vec<ModHandler> = Priority::ALL
            .iter()
            .filter_map(|priority| self.handlers.get(priority).map(|list| list.value().clone()))
            .flatten()
            .collect();

        trace!("📣 {}: dispatching to {} handlers", self.name, snapshot.len());

        let mut completed = 0;
        for handler in snapshot {
            let event = Arc::clone(&event);
            match catch_unwind(AssertUnwindSafe(|| handler(event))) {
                Ok(()) => completed += 1,
                Err(panic_info) => {
                    let message = if let Some(s) = panic_info.downcast_ref::<&str>() {
                        s.to_string()
                    } else if let Some(s) = panic_info.downcast_ref::<String>() {
                        s.clone()
                    } else {
                        "unknown panic".to_string()
                    };
                    error!("📣 {}: handler panicked: {}", self.name, message);
                }
            }
        }
        completed
    }
}

impl ModEvent for EventChannel {
    fn name(&self) -> &str {
        &self.name
    }

    fn subscribe(&self, priority: Priority, handler: ModHandler) -> Result<(), AccessError> {
        self.handlers.entry(priority).or_default().push(handler);
        Ok(())
    }
}

impl fmt::Debug for EventChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventChannel")
            .field("name", &self.name)
            .field("handlers", &self.handler_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modding::JsonObject;
    use serde_json::json;
    use std::sync::Mutex;

    fn recorder(log: &Arc<Mutex<Vec<&'static str>>>, tag: &'static str) -> ModHandler {
        let log = Arc::clone(log);
        Arc::new(move |_event: ModRef| log.lock().unwrap().push(tag))
    }

    fn sample_event() -> ModRef {
        JsonObject::from_json("PokemonCapturedEvent", json!({ "pokemon": null }))
    }

    #[test]
    fn handlers_run_in_priority_then_registration_order() {
        let channel = EventChannel::new("POKEMON_CAPTURED");
        let log = Arc::new(Mutex::new(Vec::new()));

        channel.subscribe(Priority::Low, recorder(&log, "low")).unwrap();
        channel.subscribe(Priority::Normal, recorder(&log, "normal-1")).unwrap();
        channel.subscribe(Priority::Highest, recorder(&log, "highest")).unwrap();
        channel.subscribe(Priority::Normal, recorder(&log, "normal-2")).unwrap();

        assert_eq!(channel.emit(sample_event()), 4);
        assert_eq!(*log.lock().unwrap(), vec!["highest", "normal-1", "normal-2", "low"]);
    }

    #[test]
    fn panicking_handler_does_not_stop_dispatch() {
        let channel = EventChannel::new("POKEMON_CAPTURED");
        let log = Arc::new(Mutex::new(Vec::new()));

        channel
            .subscribe(Priority::High, Arc::new(|_event: ModRef| panic!("handler exploded")))
            .unwrap();
        channel.subscribe(Priority::Normal, recorder(&log, "after")).unwrap();

        assert_eq!(channel.emit(sample_event()), 1);
        assert_eq!(*log.lock().unwrap(), vec!["after"]);
    }

    #[test]
    fn duplicate_subscriptions_each_receive_the_event() {
        let channel = EventChannel::new("POKEMON_CAPTURED");
        let log = Arc::new(Mutex::new(Vec::new()));
        let handler = recorder(&log, "dup");

        channel.subscribe(Priority::Normal, Arc::clone(&handler)).unwrap();
        channel.subscribe(Priority::Normal, handler).unwrap();

        assert_eq!(channel.handler_count(), 2);
        channel.emit(sample_event());
        assert_eq!(log.lock().unwrap().len(), 2);
    }
}
