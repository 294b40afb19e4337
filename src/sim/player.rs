//! Player controller
//!
//! Turns held keys into movement and fire requests. The ship stays inside the
//! arena horizontally; death is terminal.

use glam::Vec2;
use rand::Rng;

use super::assets::{PLAYER_LASER, Texture};
use super::bullets::Shot;
use super::collision::Aabb;
use super::sprite::{Anchor, Sprite};
use super::surface::{RenderSurface, VisualKey};
use crate::consts::*;
use crate::platform::KeyEvent;

/// Player lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayerState {
    /// Not created yet
    #[default]
    Absent,
    Alive,
    /// Terminal
    Dead,
}

/// Direction of travel this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Movement {
    Left,
    #[default]
    Idle,
    Right,
}

/// Pressed state of the tracked keys
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyState {
    pub left: bool,
    pub right: bool,
    pub fire: bool,
    pub fire_alt: bool,
}

impl KeyState {
    pub const LEFT: &'static str = "ArrowLeft";
    pub const RIGHT: &'static str = "ArrowRight";
    pub const FIRE: &'static str = " ";
    pub const FIRE_ALT: &'static str = "ArrowUp";

    /// Record a transition; returns false for keys we don't track
    pub fn record(&mut self, event: &KeyEvent) -> bool {
        let slot = match event.key.as_str() {
            Self::LEFT => &mut self.left,
            Self::RIGHT => &mut self.right,
            Self::FIRE => &mut self.fire,
            Self::FIRE_ALT => &mut self.fire_alt,
            _ => return false,
        };
        *slot = event.pressed;
        true
    }

    #[inline]
    pub fn firing(&self) -> bool {
        self.fire || self.fire_alt
    }
}

#[derive(Debug, Default)]
pub struct PlayerController {
    sprite: Option<Sprite>,
    health: i32,
    speed: f32,
    keys: KeyState,
    /// Frame units since the last shot
    cooldown: f32,
    movement: Movement,
    state: PlayerState,
    lean_disabled: bool,
}

impl PlayerController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the ship at the bottom center of the arena
    pub fn initialize(&mut self, texture: Texture, health: i32, speed: f32) {
        self.sprite = Some(
            Sprite::new(texture, Vec2::new(PLAYER_START_X, PLAYER_Y))
                .with_anchor(Anchor::Center)
                .with_scale(PLAYER_SCALE),
        );
        self.health = health;
        self.speed = speed;
        self.keys = KeyState::default();
        self.cooldown = 0.0;
        self.movement = Movement::Idle;
        self.state = PlayerState::Alive;
    }

    /// Attach the ship visual (no-op before `initialize`)
    pub fn attach(&self, surface: &mut impl RenderSurface) {
        if let Some(sprite) = &self.sprite {
            surface.attach(VisualKey::player(), sprite.texture.path);
        }
    }

    /// Keep the ship upright regardless of movement
    pub fn set_lean_enabled(&mut self, enabled: bool) {
        self.lean_disabled = !enabled;
    }

    pub fn record_key_event(&mut self, event: &KeyEvent) -> bool {
        self.keys.record(event)
    }

    /// Advance one tick. Returns a shot when the ship fires.
    pub fn advance(&mut self, dt: f32, rng: &mut impl Rng) -> Option<Shot> {
        if self.state != PlayerState::Alive {
            return None;
        }
        let sprite = self.sprite.as_mut()?;

        self.cooldown += dt;

        let half_width = sprite.width() / 2.0;
        let lean = if self.lean_disabled { 0.0 } else { PLAYER_LEAN };
        let step = self.speed * dt;
        if self.keys.left && sprite.pos.x > half_width {
            sprite.pos.x = (sprite.pos.x - step).max(half_width);
            sprite.lean = -lean;
            self.movement = Movement::Left;
        } else if self.keys.right && sprite.pos.x < ARENA_WIDTH - half_width {
            sprite.pos.x = (sprite.pos.x + step).min(ARENA_WIDTH - half_width);
            sprite.lean = lean;
            self.movement = Movement::Right;
        } else {
            sprite.lean = 0.0;
            self.movement = Movement::Idle;
        }

        if self.keys.firing() && self.cooldown > PLAYER_FIRE_COOLDOWN {
            self.cooldown = 0.0;
            return self.fire(rng);
        }
        None
    }

    /// Upward laser just above the ship, with a little sideways spread
    fn fire(&self, rng: &mut impl Rng) -> Option<Shot> {
        let ship = self.sprite.as_ref()?;
        let jitter = rng.random_range(-PLAYER_LASER_JITTER..PLAYER_LASER_JITTER) as f32;
        let pos = Vec2::new(
            ship.pos.x - PLAYER_LASER.width / 2.0 + jitter,
            ship.pos.y - PLAYER_LASER.height / 2.0,
        );
        Some(Shot {
            sprite: Sprite::new(PLAYER_LASER, pos),
            speed: PLAYER_LASER_SPEED,
            sender: VisualKey::player(),
        })
    }

    /// Take one point of damage; returns true if this killed the player
    pub fn apply_damage(&mut self, surface: &mut impl RenderSurface) -> bool {
        if self.state != PlayerState::Alive {
            return false;
        }

        self.health -= 1;
        if self.health >= 1 {
            return false;
        }

        surface.detach(VisualKey::player());
        self.sprite = None;
        self.state = PlayerState::Dead;
        self.movement = Movement::Idle;
        true
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn state(&self) -> PlayerState {
        self.state
    }

    pub fn is_alive(&self) -> bool {
        self.state == PlayerState::Alive
    }

    pub fn movement(&self) -> Movement {
        self.movement
    }

    pub fn keys(&self) -> &KeyState {
        &self.keys
    }

    pub fn sprite(&self) -> Option<&Sprite> {
        self.sprite.as_ref()
    }

    pub fn position(&self) -> Option<Vec2> {
        self.sprite.as_ref().map(|s| s.pos)
    }

    /// Hit box, only while alive
    pub fn bounds(&self) -> Option<Aabb> {
        if !self.is_alive() {
            return None;
        }
        self.sprite.as_ref().map(Sprite::bounds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::assets::PLAYER_SHIP;
    use crate::sim::surface::Stage;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn player() -> PlayerController {
        let mut player = PlayerController::new();
        player.initialize(PLAYER_SHIP, 3, 5.0);
        player
    }

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(7)
    }

    #[test]
    fn test_initialize_centered() {
        let player = player();
        assert_eq!(player.position(), Some(Vec2::new(400.0, 525.0)));
        assert_eq!(player.health(), 3);
        assert!(player.is_alive());
        assert_eq!(player.sprite().unwrap().scale, 0.5);
    }

    #[test]
    fn test_only_tracked_keys_recorded() {
        let mut player = player();
        assert!(player.record_key_event(&KeyEvent::down("ArrowLeft")));
        assert!(player.record_key_event(&KeyEvent::down(" ")));
        assert!(player.record_key_event(&KeyEvent::down("ArrowUp")));
        assert!(!player.record_key_event(&KeyEvent::down("a")));
        assert!(!player.record_key_event(&KeyEvent::down("ArrowDown")));
        assert!(player.keys().left && player.keys().fire && player.keys().fire_alt);
        assert!(player.record_key_event(&KeyEvent::up("ArrowLeft")));
        assert!(!player.keys().left);
    }

    #[test]
    fn test_move_left_and_lean() {
        let mut player = player();
        let mut rng = rng();
        player.record_key_event(&KeyEvent::down("ArrowLeft"));
        player.advance(2.0, &mut rng);
        assert_eq!(player.position().unwrap().x, 390.0);
        assert_eq!(player.sprite().unwrap().lean, -PLAYER_LEAN);
        assert_eq!(player.movement(), Movement::Left);

        player.record_key_event(&KeyEvent::up("ArrowLeft"));
        player.advance(1.0, &mut rng);
        assert_eq!(player.sprite().unwrap().lean, 0.0);
        assert_eq!(player.movement(), Movement::Idle);
    }

    #[test]
    fn test_move_right() {
        let mut player = player();
        player.record_key_event(&KeyEvent::down("ArrowRight"));
        player.advance(1.0, &mut rng());
        assert_eq!(player.position().unwrap().x, 405.0);
        assert_eq!(player.sprite().unwrap().lean, PLAYER_LEAN);
    }

    #[test]
    fn test_lean_disabled() {
        let mut player = player();
        player.set_lean_enabled(false);
        player.record_key_event(&KeyEvent::down("ArrowRight"));
        player.advance(1.0, &mut rng());
        assert_eq!(player.sprite().unwrap().lean, 0.0);
        assert_eq!(player.movement(), Movement::Right);
    }

    #[test]
    fn test_left_blocked_at_edge_falls_through_to_right() {
        let mut player = player();
        let half = player.sprite().unwrap().width() / 2.0;
        if let Some(sprite) = player.sprite.as_mut() {
            sprite.pos = Vec2::new(half, PLAYER_Y);
        }
        player.record_key_event(&KeyEvent::down("ArrowLeft"));
        player.record_key_event(&KeyEvent::down("ArrowRight"));
        player.advance(1.0, &mut rng());
        assert_eq!(player.movement(), Movement::Right);
    }

    #[test]
    fn test_fire_cooldown() {
        let mut player = player();
        let mut rng = rng();
        player.record_key_event(&KeyEvent::down(" "));

        // Cooldown must exceed 15 frame units
        for _ in 0..15 {
            assert!(player.advance(1.0, &mut rng).is_none());
        }
        let shot = player.advance(1.0, &mut rng).unwrap();
        assert_eq!(shot.speed, PLAYER_LASER_SPEED);
        assert_eq!(shot.sender, VisualKey::player());
        assert!(player.advance(1.0, &mut rng).is_none());
    }

    #[test]
    fn test_fire_alt_key() {
        let mut player = player();
        player.record_key_event(&KeyEvent::down("ArrowUp"));
        assert!(player.advance(16.0, &mut rng()).is_some());
    }

    #[test]
    fn test_shot_placement() {
        let mut player = player();
        let mut rng = rng();
        player.record_key_event(&KeyEvent::down(" "));
        for _ in 0..50 {
            if let Some(shot) = player.advance(16.0, &mut rng) {
                let base = 400.0 - PLAYER_LASER.width / 2.0;
                let offset = shot.sprite.pos.x - base;
                assert!((-6.0..6.0).contains(&offset));
                assert_eq!(offset.fract(), 0.0);
                assert_eq!(shot.sprite.pos.y, 525.0 - PLAYER_LASER.height / 2.0);
            }
        }
    }

    #[test]
    fn test_damage_until_death() {
        let mut stage = Stage::new();
        let mut player = player();
        player.attach(&mut stage);
        assert!(stage.contains(VisualKey::player()));

        assert!(!player.apply_damage(&mut stage));
        assert!(!player.apply_damage(&mut stage));
        assert_eq!(player.health(), 1);
        assert!(player.apply_damage(&mut stage));
        assert_eq!(player.state(), PlayerState::Dead);
        assert!(!stage.contains(VisualKey::player()));
        assert!(player.bounds().is_none());

        // Terminal: no more damage, no more updates
        assert!(!player.apply_damage(&mut stage));
        player.record_key_event(&KeyEvent::down(" "));
        assert!(player.advance(100.0, &mut rng()).is_none());
    }

    #[test]
    fn test_uninitialized_is_inert() {
        let mut stage = Stage::new();
        let mut player = PlayerController::new();
        assert_eq!(player.state(), PlayerState::Absent);
        assert!(player.advance(20.0, &mut rng()).is_none());
        assert!(!player.apply_damage(&mut stage));
        player.attach(&mut stage);
        assert!(stage.is_empty());
    }

    proptest! {
        #[test]
        fn prop_player_stays_in_arena(
            steps in proptest::collection::vec((0u8..4, 0.0f32..6.0), 1..200),
            speed in 1.0f32..40.0,
        ) {
            let mut player = PlayerController::new();
            player.initialize(PLAYER_SHIP, 3, speed);
            let mut rng = rng();
            for (keys, dt) in steps {
                player.record_key_event(&KeyEvent { key: "ArrowLeft".into(), pressed: keys & 1 != 0 });
                player.record_key_event(&KeyEvent { key: "ArrowRight".into(), pressed: keys & 2 != 0 });
                player.advance(dt, &mut rng);
                let x = player.position().unwrap().x;
                prop_assert!((0.0..=ARENA_WIDTH).contains(&x));
            }
        }
    }
}
