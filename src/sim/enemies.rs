//! Enemy registry
//!
//! Spawns waves, drifts enemies down the arena, and periodically asks one of
//! them to fire. Damage that takes an enemy below 1 health removes it on the
//! spot, so every enemy in the registry is alive.

use glam::Vec2;
use rand::Rng;

use super::assets::{
    BLUE_ENEMIES, BLUE_LASER, GREEN_ENEMIES, GREEN_LASER, RED_ENEMIES, RED_LASER, Texture,
};
use super::bullets::Shot;
use super::collision::Aabb;
use super::sprite::{Anchor, Sprite};
use super::surface::{RenderSurface, VisualKey};
use crate::consts::*;
use crate::settings::ExitCulling;

pub type EnemyId = u32;

/// Enemy color class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    Red,
    Blue,
    Green,
}

/// Fixed stat tuple for a variant
#[derive(Debug, Clone, Copy)]
pub struct VariantStats {
    pub speed: f32,
    pub health: i32,
    pub score: u64,
    pub scale: f32,
    pub textures: &'static [Texture; 5],
    pub laser: Texture,
    pub laser_speed: f32,
}

impl Variant {
    pub const ALL: [Variant; 3] = [Variant::Red, Variant::Blue, Variant::Green];

    pub fn stats(&self) -> VariantStats {
        match self {
            Variant::Red => VariantStats {
                speed: 4.0,
                health: 1,
                score: 10,
                scale: 0.4,
                textures: &RED_ENEMIES,
                laser: RED_LASER,
                laser_speed: 7.0,
            },
            Variant::Blue => VariantStats {
                speed: 2.0,
                health: 2,
                score: 5,
                scale: 0.4,
                textures: &BLUE_ENEMIES,
                laser: BLUE_LASER,
                laser_speed: 5.0,
            },
            Variant::Green => VariantStats {
                speed: 1.0,
                health: 3,
                score: 15,
                scale: 0.8,
                textures: &GREEN_ENEMIES,
                laser: GREEN_LASER,
                laser_speed: 3.0,
            },
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Red => "red",
            Variant::Blue => "blue",
            Variant::Green => "green",
        }
    }
}

/// A live enemy
#[derive(Debug, Clone)]
pub struct Enemy {
    pub id: EnemyId,
    pub sprite: Sprite,
    pub health: i32,
    pub speed: f32,
    /// Per-enemy phase (0..100) that desynchronizes the sideways drift
    pub sway_phase: f32,
    pub variant: Variant,
    pub score: u64,
}

impl Enemy {
    #[inline]
    pub fn key(&self) -> VisualKey {
        VisualKey::enemy(self.id)
    }

    #[inline]
    pub fn bounds(&self) -> Aabb {
        self.sprite.bounds()
    }

    /// Can this enemy fire from where it is?
    #[inline]
    pub fn in_firing_band(&self) -> bool {
        (0.0..=ENEMY_FIRE_FLOOR).contains(&self.sprite.pos.y)
    }
}

/// Highest spawn row of a wave: one row spacing above the arena per enemy
fn wave_top(quantity: u32) -> i64 {
    -(i64::from(quantity) * i64::from(WAVE_ROW_SPACING))
}

#[derive(Debug)]
pub struct EnemyRegistry {
    enemies: Vec<Enemy>,
    next_id: EnemyId,
    /// Frame units since the registry was created
    elapsed: f32,
    last_fired: f32,
    culling: ExitCulling,
}

impl Default for EnemyRegistry {
    fn default() -> Self {
        Self::new(ExitCulling::default())
    }
}

impl EnemyRegistry {
    pub fn new(culling: ExitCulling) -> Self {
        Self {
            enemies: Vec::new(),
            next_id: 0,
            elapsed: 0.0,
            last_fired: 0.0,
            culling,
        }
    }

    /// Apply damage; returns true if the enemy died. Missing ids are ignored.
    pub fn apply_damage(
        &mut self,
        id: EnemyId,
        amount: i32,
        surface: &mut impl RenderSurface,
    ) -> bool {
        let Some(index) = self.enemies.iter().position(|e| e.id == id) else {
            return false;
        };

        let enemy = &mut self.enemies[index];
        enemy.health -= amount;
        if enemy.health >= 1 {
            return false;
        }

        let enemy = self.enemies.remove(index);
        surface.detach(enemy.key());
        log::debug!("Enemy {} ({}) destroyed", enemy.id, enemy.variant.as_str());
        true
    }

    /// Spawn a single enemy centered on `pos`
    pub fn spawn_one(
        &mut self,
        surface: &mut impl RenderSurface,
        rng: &mut impl Rng,
        pos: Vec2,
        variant: Variant,
    ) -> EnemyId {
        let stats = variant.stats();
        let texture = stats.textures[rng.random_range(0..stats.textures.len())];
        let sway_phase = rng.random_range(0..100) as f32;

        let id = self.next_id;
        self.next_id += 1;

        let sprite = Sprite::new(texture, pos)
            .with_anchor(Anchor::Center)
            .with_scale(stats.scale);
        surface.attach(VisualKey::enemy(id), texture.path);

        self.enemies.push(Enemy {
            id,
            sprite,
            health: stats.health,
            speed: stats.speed,
            sway_phase,
            variant,
            score: stats.score,
        });
        id
    }

    /// Spawn `quantity` enemies stacked above the arena so they stream in
    pub fn spawn_wave(
        &mut self,
        surface: &mut impl RenderSurface,
        rng: &mut impl Rng,
        quantity: u32,
        variant: Variant,
    ) -> Vec<EnemyId> {
        if quantity == 0 {
            return Vec::new();
        }

        let top = wave_top(quantity);
        let mut ids = Vec::with_capacity(quantity as usize);
        for _ in 0..quantity {
            let x = rng.random_range(WAVE_MIN_X..WAVE_MAX_X) as f32;
            let y = rng.random_range(top..0) as f32;
            ids.push(self.spawn_one(surface, rng, Vec2::new(x, y), variant));
        }

        log::debug!("Spawned {} {} enemies", quantity, variant.as_str());
        ids
    }

    /// Advance one tick. Returns a shot when an enemy fires this tick.
    ///
    /// `target_present` is false once the player is gone; nobody fires then.
    pub fn advance(
        &mut self,
        dt: f32,
        surface: &mut impl RenderSurface,
        rng: &mut impl Rng,
        target_present: bool,
    ) -> Option<Shot> {
        self.elapsed += dt;
        self.update_movements(dt, surface);

        if self.elapsed <= self.last_fired + ENEMY_FIRE_INTERVAL {
            return None;
        }
        self.last_fired = self.elapsed;

        if !target_present {
            return None;
        }
        self.pick_shooter(rng).map(|index| self.fire_from(&self.enemies[index]))
    }

    fn update_movements(&mut self, dt: f32, surface: &mut impl RenderSurface) {
        let elapsed = self.elapsed;
        let ids: Vec<EnemyId> = self.enemies.iter().map(|e| e.id).collect();

        for id in ids {
            let Some(enemy) = self.enemies.iter_mut().find(|e| e.id == id) else {
                continue;
            };
            enemy.sprite.pos.x += (elapsed / (enemy.sway_phase + 100.0)).cos();
            enemy.sprite.pos.y += enemy.speed * dt;

            if enemy.sprite.pos.y > ARENA_HEIGHT {
                self.remove(id, surface);
                if self.culling == ExitCulling::FirstPerTick {
                    return;
                }
            }
        }
    }

    /// Pick a random enemy inside the firing band, or None after
    /// `ENEMY_FIRE_ATTEMPTS` misses
    pub fn pick_shooter(&self, rng: &mut impl Rng) -> Option<usize> {
        if self.enemies.is_empty() {
            return None;
        }
        (0..ENEMY_FIRE_ATTEMPTS)
            .map(|_| rng.random_range(0..self.enemies.len()))
            .find(|&index| self.enemies[index].in_firing_band())
    }

    /// Straight-down laser from the shooter's position
    fn fire_from(&self, shooter: &Enemy) -> Shot {
        let stats = shooter.variant.stats();
        Shot {
            sprite: Sprite::new(stats.laser, shooter.sprite.pos)
                .with_anchor(Anchor::Center)
                .with_angle(180.0),
            speed: stats.laser_speed,
            sender: shooter.key(),
        }
    }

    /// Detach and drop an enemy without scoring it
    pub fn remove(&mut self, id: EnemyId, surface: &mut impl RenderSurface) -> bool {
        let Some(index) = self.enemies.iter().position(|e| e.id == id) else {
            return false;
        };
        let enemy = self.enemies.remove(index);
        surface.detach(enemy.key());
        true
    }

    /// Remove every enemy
    pub fn clear(&mut self, surface: &mut impl RenderSurface) {
        for enemy in self.enemies.drain(..) {
            surface.detach(enemy.key());
        }
    }

    pub fn get(&self, id: EnemyId) -> Option<&Enemy> {
        self.enemies.iter().find(|e| e.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Enemy> {
        self.enemies.iter()
    }

    pub fn len(&self) -> usize {
        self.enemies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enemies.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::surface::{Layer, Stage};
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(12345)
    }

    #[test]
    fn test_variant_stats() {
        let red = Variant::Red.stats();
        assert_eq!((red.speed, red.health, red.score), (4.0, 1, 10));
        assert_eq!(red.laser_speed, 7.0);
        let blue = Variant::Blue.stats();
        assert_eq!((blue.speed, blue.health, blue.score), (2.0, 2, 5));
        assert_eq!(blue.laser_speed, 5.0);
        let green = Variant::Green.stats();
        assert_eq!((green.speed, green.health, green.score), (1.0, 3, 15));
        assert_eq!(green.laser_speed, 3.0);
        assert_eq!(green.scale, 0.8);
        assert_eq!(red.scale, 0.4);
    }

    #[test]
    fn test_spawn_one() {
        let mut stage = Stage::new();
        let mut rng = rng();
        let mut registry = EnemyRegistry::default();

        let id = registry.spawn_one(&mut stage, &mut rng, Vec2::new(300.0, 50.0), Variant::Green);
        let enemy = registry.get(id).unwrap();
        assert_eq!(enemy.health, 3);
        assert_eq!(enemy.sprite.scale, 0.8);
        assert_eq!(enemy.sprite.anchor, Anchor::Center);
        assert!((0.0..100.0).contains(&enemy.sway_phase));
        assert!(GREEN_ENEMIES.contains(&enemy.sprite.texture));
        assert!(stage.contains(VisualKey::enemy(id)));
    }

    #[test]
    fn test_spawn_uses_every_texture() {
        let mut stage = Stage::new();
        let mut rng = rng();
        let mut registry = EnemyRegistry::default();
        registry.spawn_wave(&mut stage, &mut rng, 200, Variant::Red);
        for texture in RED_ENEMIES {
            assert!(registry.iter().any(|e| e.sprite.texture == texture));
        }
    }

    #[test]
    fn test_spawn_wave_placement() {
        let mut stage = Stage::new();
        let mut rng = rng();
        let mut registry = EnemyRegistry::default();

        let ids = registry.spawn_wave(&mut stage, &mut rng, 5, Variant::Blue);
        assert_eq!(ids.len(), 5);
        assert_eq!(registry.len(), 5);
        assert_eq!(stage.count(Layer::Enemy), 5);
        for enemy in registry.iter() {
            let pos = enemy.sprite.pos;
            assert!(pos.y < 0.0 && pos.y >= -750.0);
            assert!((200.0..600.0).contains(&pos.x));
            assert_eq!(enemy.variant, Variant::Blue);
        }
    }

    #[test]
    fn test_spawn_empty_wave() {
        let mut stage = Stage::new();
        let mut registry = EnemyRegistry::default();
        assert!(registry.spawn_wave(&mut stage, &mut rng(), 0, Variant::Red).is_empty());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_ids_monotonic() {
        let mut stage = Stage::new();
        let mut rng = rng();
        let mut registry = EnemyRegistry::default();
        let a = registry.spawn_one(&mut stage, &mut rng, Vec2::new(0.0, 0.0), Variant::Red);
        assert!(registry.apply_damage(a, 1, &mut stage));
        let b = registry.spawn_one(&mut stage, &mut rng, Vec2::new(0.0, 0.0), Variant::Red);
        assert!(b > a);
    }

    #[test]
    fn test_damage_on_removed_enemy_is_noop() {
        let mut stage = Stage::new();
        let mut rng = rng();
        let mut registry = EnemyRegistry::default();
        let id = registry.spawn_one(&mut stage, &mut rng, Vec2::new(400.0, 100.0), Variant::Red);
        assert!(registry.apply_damage(id, 1, &mut stage));
        assert!(!registry.apply_damage(id, 1, &mut stage));
        assert!(!registry.apply_damage(999, 5, &mut stage));
    }

    #[test]
    fn test_advance_moves_down_and_sways() {
        let mut stage = Stage::new();
        let mut rng = rng();
        let mut registry = EnemyRegistry::default();
        let id = registry.spawn_one(&mut stage, &mut rng, Vec2::new(400.0, 100.0), Variant::Blue);
        let phase = registry.get(id).unwrap().sway_phase;

        registry.advance(1.0, &mut stage, &mut rng, true);
        let enemy = registry.get(id).unwrap();
        assert_eq!(enemy.sprite.pos.y, 102.0);
        let expected_x = 400.0 + (1.0f32 / (phase + 100.0)).cos();
        assert!((enemy.sprite.pos.x - expected_x).abs() < 0.0001);
    }

    #[test]
    fn test_fall_off_bottom_removes_all() {
        let mut stage = Stage::new();
        let mut rng = rng();
        let mut registry = EnemyRegistry::new(ExitCulling::All);
        for x in [300.0, 400.0, 500.0] {
            registry.spawn_one(&mut stage, &mut rng, Vec2::new(x, 599.0), Variant::Red);
        }
        let survivor = registry.spawn_one(&mut stage, &mut rng, Vec2::new(450.0, 100.0), Variant::Red);

        registry.advance(1.0, &mut stage, &mut rng, true);
        assert_eq!(registry.len(), 1);
        assert!(registry.get(survivor).is_some());
        assert_eq!(stage.count(Layer::Enemy), 1);
    }

    #[test]
    fn test_fall_off_bottom_first_per_tick() {
        let mut stage = Stage::new();
        let mut rng = rng();
        let mut registry = EnemyRegistry::new(ExitCulling::FirstPerTick);
        for x in [300.0, 400.0, 500.0] {
            registry.spawn_one(&mut stage, &mut rng, Vec2::new(x, 599.0), Variant::Red);
        }

        registry.advance(1.0, &mut stage, &mut rng, true);
        assert_eq!(registry.len(), 2);
        // Movement stopped after the first removal
        assert!(registry.iter().all(|e| e.sprite.pos.y == 599.0));

        registry.advance(1.0, &mut stage, &mut rng, true);
        assert_eq!(registry.len(), 1);
        registry.advance(1.0, &mut stage, &mut rng, true);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_fire_interval_and_shot() {
        let mut stage = Stage::new();
        let mut rng = rng();
        let mut registry = EnemyRegistry::default();
        let id = registry.spawn_one(&mut stage, &mut rng, Vec2::new(400.0, 10.0), Variant::Green);

        // elapsed must exceed 15 before the first shot
        for _ in 0..15 {
            assert!(registry.advance(1.0, &mut stage, &mut rng, true).is_none());
        }
        let shot = registry.advance(1.0, &mut stage, &mut rng, true).unwrap();
        assert_eq!(shot.sender, VisualKey::enemy(id));
        assert_eq!(shot.speed, 3.0);
        assert_eq!(shot.sprite.angle, 180.0);
        assert_eq!(shot.sprite.texture, GREEN_LASER);
        assert_eq!(shot.sprite.pos, registry.get(id).unwrap().sprite.pos);

        // Next shot waits another interval
        assert!(registry.advance(1.0, &mut stage, &mut rng, true).is_none());
    }

    #[test]
    fn test_no_fire_without_target() {
        let mut stage = Stage::new();
        let mut rng = rng();
        let mut registry = EnemyRegistry::default();
        registry.spawn_one(&mut stage, &mut rng, Vec2::new(400.0, 100.0), Variant::Green);
        // One big tick crosses the fire interval
        assert!(registry.advance(16.0, &mut stage, &mut rng, false).is_none());
        // The cycle was consumed
        assert!(registry.advance(1.0, &mut stage, &mut rng, true).is_none());
    }

    #[test]
    fn test_wave_top_handles_huge_waves() {
        assert_eq!(wave_top(1), -150);
        assert_eq!(wave_top(20_000_000), -3_000_000_000);
        assert!(wave_top(u32::MAX) < i64::from(i32::MIN));
    }

    #[test]
    fn test_shooter_found_among_stragglers() {
        let mut stage = Stage::new();
        let mut rng = rng();
        let mut registry = EnemyRegistry::default();
        for y in [-200.0, -100.0, 550.0, 600.0] {
            registry.spawn_one(&mut stage, &mut rng, Vec2::new(400.0, y), Variant::Blue);
        }
        let id = registry.spawn_one(&mut stage, &mut rng, Vec2::new(400.0, 250.0), Variant::Red);

        let index = registry.pick_shooter(&mut rng).unwrap();
        assert_eq!(registry.iter().nth(index).unwrap().id, id);
    }

    #[test]
    fn test_no_shooter_outside_band() {
        let mut stage = Stage::new();
        let mut rng = rng();
        let mut registry = EnemyRegistry::default();
        registry.spawn_one(&mut stage, &mut rng, Vec2::new(400.0, -50.0), Variant::Green);
        registry.spawn_one(&mut stage, &mut rng, Vec2::new(400.0, 550.0), Variant::Green);
        assert!(registry.pick_shooter(&mut rng).is_none());
        assert!(EnemyRegistry::default().pick_shooter(&mut rng).is_none());
    }

    proptest! {
        #[test]
        fn prop_damage_kills_iff_amount_reaches_health(
            variant in prop_oneof![Just(Variant::Red), Just(Variant::Blue), Just(Variant::Green)],
            amount in 1i32..6,
        ) {
            let mut stage = Stage::new();
            let mut rng = rng();
            let mut registry = EnemyRegistry::default();
            let id = registry.spawn_one(&mut stage, &mut rng, Vec2::new(400.0, 100.0), variant);
            let health = variant.stats().health;

            let died = registry.apply_damage(id, amount, &mut stage);
            if amount >= health {
                prop_assert!(died);
                prop_assert!(registry.get(id).is_none());
                prop_assert!(!stage.contains(VisualKey::enemy(id)));
            } else {
                prop_assert!(!died);
                prop_assert_eq!(registry.get(id).unwrap().health, health - amount);
            }
        }

        #[test]
        fn prop_shooter_always_in_band(
            ys in proptest::collection::vec(-300.0f32..800.0, 1..20),
            seed in any::<u64>(),
        ) {
            let mut stage = Stage::new();
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut registry = EnemyRegistry::default();
            for y in &ys {
                registry.spawn_one(&mut stage, &mut rng, Vec2::new(400.0, *y), Variant::Blue);
            }
            if let Some(index) = registry.pick_shooter(&mut rng) {
                let y = registry.iter().nth(index).unwrap().sprite.pos.y;
                prop_assert!((0.0..=500.0).contains(&y));
            }
        }

        #[test]
        fn prop_full_band_always_has_shooter(
            ys in proptest::collection::vec(0.0f32..=500.0, 1..20),
            seed in any::<u64>(),
        ) {
            let mut stage = Stage::new();
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut registry = EnemyRegistry::default();
            for y in &ys {
                registry.spawn_one(&mut stage, &mut rng, Vec2::new(400.0, *y), Variant::Blue);
            }
            prop_assert!(registry.pick_shooter(&mut rng).is_some());
        }
    }
}
