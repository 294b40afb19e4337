//! Game settings and preferences
//!
//! Persisted in LocalStorage on the web; defaults everywhere else.

use serde::{Deserialize, Serialize};

use crate::consts::{PLAYER_START_HEALTH, PLAYER_START_SPEED};

/// How enemies that fall past the arena bottom are culled each tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ExitCulling {
    /// Every enemy past the bottom is removed in the tick it crosses
    #[default]
    All,
    /// Only the first enemy past the bottom is removed, and movement stops
    /// for the rest of that tick (classic behavior)
    FirstPerTick,
}

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Match ===
    /// Player starting health
    pub player_health: i32,
    /// Player horizontal speed (pixels per frame unit)
    pub player_speed: f32,
    /// Fixed RNG seed (None = seed from the clock)
    pub seed: Option<u64>,
    /// Enemy exit culling mode
    pub exit_culling: ExitCulling,

    // === HUD ===
    /// Flash the health bar when the player is hit
    pub damage_flash: bool,
    /// Show FPS counter
    pub show_fps: bool,

    // === Accessibility ===
    /// Reduced motion (no ship lean, no flashes)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            player_health: PLAYER_START_HEALTH,
            player_speed: PLAYER_START_SPEED,
            seed: None,
            exit_culling: ExitCulling::All,

            damage_flash: true,
            show_fps: false,

            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Effective damage flash (respects reduced_motion)
    pub fn effective_damage_flash(&self) -> bool {
        self.damage_flash && !self.reduced_motion
    }

    /// Effective ship lean (respects reduced_motion)
    pub fn effective_lean(&self) -> bool {
        !self.reduced_motion
    }

    /// Parse settings JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Option<Self> {
        match serde_json::from_str::<Settings>(json) {
            Ok(settings) => Some(settings.sanitized()),
            Err(e) => {
                log::warn!("Ignoring malformed settings: {}", e);
                None
            }
        }
    }

    /// Clamp values a hand-edited store could break
    fn sanitized(mut self) -> Self {
        if self.player_health < 1 {
            self.player_health = PLAYER_START_HEALTH;
        }
        if !self.player_speed.is_finite() || self.player_speed <= 0.0 {
            self.player_speed = PLAYER_START_SPEED;
        }
        self
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "star_strike_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Some(settings) = Self::from_json(&json) {
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
