//! Star Strike - A vertical arcade shooter
//!
//! Core modules:
//! - `sim`: Frame-driven simulation (entities, collisions, match orchestration)
//! - `renderer`: WebGPU rendering pipeline
//! - `platform`: Browser input events and navigation routes
//! - `settings`: Player-facing configuration

pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{ExitCulling, Settings};

/// Game configuration constants
pub mod consts {
    /// Logical arena dimensions (y grows downward)
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;

    /// Milliseconds in one frame unit (`dt = 1.0` is one 60 Hz frame)
    pub const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Largest frame delta accepted from the platform (10 FPS floor)
    pub const MAX_FRAME_DELTA: f32 = 6.0;

    /// Player defaults
    pub const PLAYER_START_HEALTH: i32 = 3;
    pub const PLAYER_START_SPEED: f32 = 5.0;
    pub const PLAYER_START_X: f32 = ARENA_WIDTH / 2.0;
    pub const PLAYER_Y: f32 = 525.0;
    pub const PLAYER_SCALE: f32 = 0.5;
    /// Horizontal lean applied while moving
    pub const PLAYER_LEAN: f32 = 0.2;
    /// Frame units between player shots
    pub const PLAYER_FIRE_COOLDOWN: f32 = 15.0;
    /// Player laser speed (negative = upward)
    pub const PLAYER_LASER_SPEED: f32 = -5.0;
    /// Horizontal spread of player lasers, in whole pixels
    pub const PLAYER_LASER_JITTER: i32 = 6;

    /// Frame units between enemy shots
    pub const ENEMY_FIRE_INTERVAL: f32 = 15.0;
    /// Random samples tried when picking an enemy shooter
    pub const ENEMY_FIRE_ATTEMPTS: u32 = 100;
    /// Enemies below this line never fire
    pub const ENEMY_FIRE_FLOOR: f32 = 500.0;
    /// Enemy wave horizontal spawn band
    pub const WAVE_MIN_X: i32 = 200;
    pub const WAVE_MAX_X: i32 = 600;
    /// Vertical spacing budget per enemy in a wave (stacked above the arena)
    pub const WAVE_ROW_SPACING: i32 = 150;

    /// Initial wave at match start
    pub const OPENING_WAVE_SIZE: u32 = 10;
    /// Delay between player death and the score screen
    pub const GAME_OVER_DELAY_MS: f64 = 2000.0;
}

/// Convert a wall-clock interval to frame units, clamped to the accepted range
#[inline]
pub fn ms_to_frames(elapsed_ms: f64) -> f32 {
    ((elapsed_ms / consts::FRAME_MS) as f32).clamp(0.0, consts::MAX_FRAME_DELTA)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ms_to_frames() {
        assert!((ms_to_frames(consts::FRAME_MS) - 1.0).abs() < 0.0001);
        assert_eq!(ms_to_frames(-5.0), 0.0);
        // A stalled tab is capped
        assert_eq!(ms_to_frames(10_000.0), consts::MAX_FRAME_DELTA);
    }
}
