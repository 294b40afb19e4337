//! Platform abstraction layer
//!
//! Browser-facing types the simulation consumes or emits:
//! - Raw keyboard events (from `keydown`/`keyup`)
//! - Navigation routes (menu, game and score screens)

use serde::{Deserialize, Serialize};

/// A raw key transition as delivered by the browser
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    /// DOM `KeyboardEvent.key` value (e.g. `"ArrowLeft"`, `" "`)
    pub key: String,
    /// `true` for keydown, `false` for keyup
    pub pressed: bool,
}

impl KeyEvent {
    pub fn down(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            pressed: true,
        }
    }

    pub fn up(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            pressed: false,
        }
    }

    /// Build from a DOM event type string (`"keydown"` / `"keyup"`)
    pub fn from_dom(key: &str, event_type: &str) -> Self {
        Self {
            key: key.to_string(),
            pressed: event_type == "keydown",
        }
    }
}

/// Screens the game can navigate to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Route {
    Home,
    Game,
    Rules,
    /// Score submission, shown after the player dies
    SaveScore,
    Score,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Game => "/game",
            Route::Rules => "/rules",
            Route::SaveScore => "/score/save",
            Route::Score => "/score",
        }
    }

    pub fn from_path(path: &str) -> Option<Self> {
        match path.trim_end_matches('/') {
            "" => Some(Route::Home),
            "/game" => Some(Route::Game),
            "/rules" => Some(Route::Rules),
            "/score/save" => Some(Route::SaveScore),
            "/score" => Some(Route::Score),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_paths_roundtrip() {
        for route in [
            Route::Home,
            Route::Game,
            Route::Rules,
            Route::SaveScore,
            Route::Score,
        ] {
            assert_eq!(Route::from_path(route.path()), Some(route));
        }
        assert_eq!(Route::from_path("/score/save/"), Some(Route::SaveScore));
        assert_eq!(Route::from_path("/nope"), None);
    }

    #[test]
    fn test_key_event_from_dom() {
        assert!(KeyEvent::from_dom(" ", "keydown").pressed);
        assert!(!KeyEvent::from_dom(" ", "keyup").pressed);
    }
}
