//! Identity resolution for the native player behind a capture event.

use bridge_api::modding::{ModObject, ModRef, ModValue};
use bridge_api::{PlayerDirectory, PlayerRef};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

pub const UNKNOWN_PLAYER: &str = "未知玩家";

/// Last-resort parse of a `name=...` token out of an object's textual form.
static NAME_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"name=([^,}]+)").expect("name pattern compiles"));

type Step<'a, I, T> = Box<dyn Fn(&I) -> Option<T> + 'a>;

/// An ordered list of fallible lookups; the first one that produces a value
/// wins.
pub struct ResolverChain<'a, I: ?Sized, T> {
    steps: Vec<(&'static str, Step<'a, I, T>)>,
}

impl<'a, I: ?Sized, T> ResolverChain<'a, I, T> {
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Appends a step that runs after every step added so far.
    pub fn then(mut self, name: &'static str, step: impl Fn(&I) -> Option<T> + 'a) -> Self {
        self.steps.push((name, Box::new(step)));
        self
    }

    pub fn resolve(&self, input: &I) -> Option<T> {
        self.steps.iter().find_map(|(name, step)| {
            let value = step(input);
            if value.is_some() {
                trace!("🎣 CaptureBridge: resolved via {}", name);
            }
            value
        })
    }

    pub fn resolve_or_else(&self, input: &I, fallback: impl FnOnce(&I) -> T) -> T {
        self.resolve(input).unwrap_or_else(|| fallback(input))
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl<I: ?Sized, T> Default for ResolverChain<'_, I, T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Maps the native player onto the host's player by UUID.
///
/// Any failure along the way, including the player having gone offline,
/// yields `None`.
pub fn resolve_host_player(native: Option<&ModRef>, directory: &dyn PlayerDirectory) -> Option<PlayerRef> {
    host_player(native?.as_ref(), directory)
}

fn host_player(handle: &dyn ModObject, directory: &dyn PlayerDirectory) -> Option<PlayerRef> {
    let uuid = handle.invoke("getUUID").ok().flatten()?.as_uuid()?;
    directory.lookup_player(&uuid)
}

/// A display name for the native player.
///
/// Tries the game profile, then the host's own name for the player, then a
/// `name=` token in the handle's textual form. Falls back to `未知玩家`
/// tagged with the handle's type.
pub fn resolve_player_name(native: Option<&ModRef>, directory: &dyn PlayerDirectory) -> String {
    let Some(native) = native else {
        return UNKNOWN_PLAYER.to_string();
    };

    ResolverChain::new()
        .then("game profile", profile_name)
        .then("host player", |handle: &ModRef| {
            host_player(handle.as_ref(), directory).map(|player| player.name)
        })
        .then("textual form", text_name)
        .resolve_or_else(native, |handle| {
            format!("{}({})", UNKNOWN_PLAYER, handle.simple_name())
        })
}

fn profile_name(handle: &ModRef) -> Option<String> {
    let profile = match handle.invoke("getGameProfile").ok().flatten()? {
        ModValue::Object(profile) => profile,
        _ => return None,
    };
    match profile.invoke("getName").ok().flatten()? {
        ModValue::Text(name) if !name.is_empty() => Some(name),
        _ => None,
    }
}

fn text_name(handle: &ModRef) -> Option<String> {
    let text = handle.to_text();
    let name = NAME_TOKEN.captures(&text)?.get(1)?.as_str().trim();
    (!name.is_empty()).then(|| name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{native_player, ASH_UUID};
    use bridge_api::modding::JsonObject;
    use bridge_api::{OnlinePlayers, PlayerId};
    use serde_json::{json, Value};

    fn handle(fields: Value) -> ModRef {
        JsonObject::from_json("net.minecraft.server.level.ServerPlayer", native_player(fields))
    }

    fn directory_with_ash() -> OnlinePlayers {
        let players = OnlinePlayers::new();
        let (_ash, _inbox) = players.connect(PlayerId::from_str(ASH_UUID).unwrap(), "Ash");
        players
    }

    #[test]
    fn chain_takes_the_first_present_value() {
        let chain = ResolverChain::<str, usize>::new()
            .then("never", |_| None)
            .then("length", |s: &str| Some(s.len()))
            .then("constant", |_| Some(99));

        assert_eq!(chain.len(), 3);
        assert_eq!(chain.resolve("abcd"), Some(4));
    }

    #[test]
    fn chain_falls_back_when_every_step_misses() {
        let chain = ResolverChain::<str, String>::new().then("never", |_| None);
        assert_eq!(chain.resolve_or_else("x", |s| format!("default {}", s)), "default x");
        assert!(ResolverChain::<str, String>::default().is_empty());
    }

    #[test]
    fn game_profile_name_wins() {
        let native = handle(json!({ "gameProfile": { "name": "Satoshi" }, "uuid": ASH_UUID }));
        assert_eq!(resolve_player_name(Some(&native), &directory_with_ash()), "Satoshi");
    }

    #[test]
    fn empty_profile_name_falls_through_to_host_player() {
        let native = handle(json!({ "gameProfile": { "name": "" }, "uuid": ASH_UUID }));
        assert_eq!(resolve_player_name(Some(&native), &directory_with_ash()), "Ash");
    }

    #[test]
    fn textual_form_is_parsed_when_the_player_is_offline() {
        let native = handle(json!({ "name": "Ash", "uuid": ASH_UUID }));
        assert!(native.to_text().contains("name=Ash,"));
        assert_eq!(resolve_player_name(Some(&native), &OnlinePlayers::new()), "Ash");
    }

    #[test]
    fn unknown_player_is_tagged_with_the_type() {
        let native = handle(json!({ "level": 3 }));
        assert_eq!(
            resolve_player_name(Some(&native), &OnlinePlayers::new()),
            "未知玩家(ServerPlayer)"
        );
    }

    #[test]
    fn missing_handle_is_unknown() {
        assert_eq!(resolve_player_name(None, &OnlinePlayers::new()), UNKNOWN_PLAYER);
        assert!(resolve_host_player(None, &OnlinePlayers::new()).is_none());
    }

    #[test]
    fn host_player_is_looked_up_by_uuid() {
        let directory = directory_with_ash();
        let online = handle(json!({ "uuid": ASH_UUID }));
        let stranger = handle(json!({ "uuid": "00000000-0000-4000-8000-000000000001" }));
        let no_uuid = handle(json!({ "uuid": "not-a-uuid" }));

        assert_eq!(resolve_host_player(Some(&online), &directory).unwrap().name, "Ash");
        assert!(resolve_host_player(Some(&stranger), &directory).is_none());
        assert!(resolve_host_player(Some(&no_uuid), &directory).is_none());
    }
}
