//! Bullet registry
//!
//! Owns every in-flight laser, player and enemy alike. Each bullet carries a
//! hit rule `R` chosen by whoever fired it; the registry never inspects it and
//! only hands it back to the caller's resolver once per tick.

use super::collision::out_of_arena_vertical;
use super::sprite::Sprite;
use super::surface::{RenderSurface, VisualKey};

pub type BulletId = u32;

/// A bullet about to be spawned
#[derive(Debug, Clone)]
pub struct NewBullet<R> {
    pub sprite: Sprite,
    /// Vertical speed per frame unit (negative = up)
    pub speed: f32,
    /// Who fired it
    pub sender: VisualKey,
    pub rule: R,
}

/// A fire request from a shooter, before a hit rule is bound to it
#[derive(Debug, Clone, PartialEq)]
pub struct Shot {
    pub sprite: Sprite,
    pub speed: f32,
    pub sender: VisualKey,
}

impl Shot {
    pub fn with_rule<R>(self, rule: R) -> NewBullet<R> {
        NewBullet {
            sprite: self.sprite,
            speed: self.speed,
            sender: self.sender,
            rule,
        }
    }
}

/// A live bullet
#[derive(Debug, Clone)]
pub struct Bullet<R> {
    pub id: BulletId,
    pub sprite: Sprite,
    pub speed: f32,
    pub sender: VisualKey,
    pub rule: R,
}

impl<R> Bullet<R> {
    #[inline]
    pub fn key(&self) -> VisualKey {
        VisualKey::bullet(self.id)
    }
}

#[derive(Debug)]
pub struct BulletRegistry<R> {
    bullets: Vec<Bullet<R>>,
    next_id: BulletId,
    bound: bool,
}

impl<R> Default for BulletRegistry<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> BulletRegistry<R> {
    pub fn new() -> Self {
        Self {
            bullets: Vec::new(),
            next_id: 0,
            bound: false,
        }
    }

    /// Bind to the render surface. Spawns before this are dropped.
    pub fn initialize(&mut self) {
        self.bound = true;
    }

    pub fn is_initialized(&self) -> bool {
        self.bound
    }

    /// Add a bullet and attach its visual
    pub fn spawn(
        &mut self,
        surface: &mut impl RenderSurface,
        bullet: NewBullet<R>,
    ) -> Option<BulletId> {
        if !self.bound {
            log::warn!("Bullet spawned before the registry was initialized; dropped");
            return None;
        }

        let id = self.next_id;
        self.next_id += 1;

        surface.attach(VisualKey::bullet(id), bullet.sprite.texture.path);
        self.bullets.push(Bullet {
            id,
            sprite: bullet.sprite,
            speed: bullet.speed,
            sender: bullet.sender,
            rule: bullet.rule,
        });
        Some(id)
    }

    /// Detach and drop a bullet. Missing ids are ignored.
    pub fn remove(&mut self, id: BulletId, surface: &mut impl RenderSurface) -> bool {
        let Some(index) = self.bullets.iter().position(|b| b.id == id) else {
            return false;
        };
        let bullet = self.bullets.remove(index);
        surface.detach(bullet.key());
        true
    }

    /// Move every bullet and resolve hits.
    ///
    /// `hits` is called exactly once per bullet, after the move, even when the
    /// bullet already left the arena: a hit on the boundary still applies its
    /// damage. Bullets that left the arena or hit something are removed.
    pub fn advance<S, F>(&mut self, dt: f32, surface: &mut S, mut hits: F)
    where
        S: RenderSurface,
        F: FnMut(&Bullet<R>, &mut S) -> bool,
    {
        let ids: Vec<BulletId> = self.bullets.iter().map(|b| b.id).collect();
        let mut expired = Vec::new();

        for id in ids {
            let Some(bullet) = self.bullets.iter_mut().find(|b| b.id == id) else {
                continue;
            };
            bullet.sprite.pos.y += bullet.speed * dt;

            let out_of_bounds = out_of_arena_vertical(bullet.sprite.pos.y);
            let collided = hits(&*bullet, &mut *surface);
            if out_of_bounds || collided {
                expired.push(id);
            }
        }

        for id in expired {
            self.remove(id, surface);
        }
    }

    /// Remove every bullet
    pub fn clear(&mut self, surface: &mut impl RenderSurface) {
        for bullet in self.bullets.drain(..) {
            surface.detach(bullet.key());
        }
    }

    pub fn get(&self, id: BulletId) -> Option<&Bullet<R>> {
        self.bullets.iter().find(|b| b.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Bullet<R>> {
        self.bullets.iter()
    }

    pub fn len(&self) -> usize {
        self.bullets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bullets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::assets::PLAYER_LASER;
    use crate::sim::surface::{Layer, Stage};
    use glam::Vec2;
    use proptest::prelude::*;

    fn laser(y: f32, speed: f32) -> NewBullet<()> {
        NewBullet {
            sprite: Sprite::new(PLAYER_LASER, Vec2::new(100.0, y)),
            speed,
            sender: VisualKey::player(),
            rule: (),
        }
    }

    fn bound_registry() -> BulletRegistry<()> {
        let mut registry = BulletRegistry::new();
        registry.initialize();
        registry
    }

    #[test]
    fn test_spawn_requires_initialize() {
        let mut stage = Stage::new();
        let mut registry = BulletRegistry::new();
        assert!(registry.spawn(&mut stage, laser(300.0, -5.0)).is_none());
        assert!(registry.is_empty());
        assert!(stage.is_empty());

        registry.initialize();
        assert!(registry.is_initialized());
        assert_eq!(registry.spawn(&mut stage, laser(300.0, -5.0)), Some(0));
        assert_eq!(stage.count(Layer::Bullet), 1);
    }

    #[test]
    fn test_ids_never_reused() {
        let mut stage = Stage::new();
        let mut registry = bound_registry();
        let a = registry.spawn(&mut stage, laser(300.0, -5.0)).unwrap();
        assert!(registry.remove(a, &mut stage));
        let b = registry.spawn(&mut stage, laser(300.0, -5.0)).unwrap();
        assert!(b > a);
    }

    #[test]
    fn test_advance_moves_by_speed_times_dt() {
        let mut stage = Stage::new();
        let mut registry = bound_registry();
        let id = registry.spawn(&mut stage, laser(300.0, -5.0)).unwrap();
        registry.advance(2.0, &mut stage, |_, _| false);
        assert_eq!(registry.get(id).unwrap().sprite.pos.y, 290.0);
    }

    #[test]
    fn test_leaving_top_or_bottom_removes() {
        let mut stage = Stage::new();
        let mut registry = bound_registry();
        registry.spawn(&mut stage, laser(4.0, -5.0)).unwrap();
        registry.spawn(&mut stage, laser(597.0, 7.0)).unwrap();
        registry.spawn(&mut stage, laser(300.0, 7.0)).unwrap();

        registry.advance(1.0, &mut stage, |_, _| false);
        assert_eq!(registry.len(), 1);
        assert_eq!(stage.count(Layer::Bullet), 1);
    }

    #[test]
    fn test_hit_callback_runs_for_out_of_bounds_bullet() {
        let mut stage = Stage::new();
        let mut registry = bound_registry();
        registry.spawn(&mut stage, laser(2.0, -5.0)).unwrap();

        let mut calls = 0;
        registry.advance(1.0, &mut stage, |_, _| {
            calls += 1;
            false
        });
        assert_eq!(calls, 1);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_hit_removes_bullet_same_tick() {
        let mut stage = Stage::new();
        let mut registry = bound_registry();
        let keep = registry.spawn(&mut stage, laser(300.0, -5.0)).unwrap();
        let hit = registry.spawn(&mut stage, laser(200.0, -5.0)).unwrap();

        registry.advance(1.0, &mut stage, |b, _| b.id == hit);
        assert!(registry.get(hit).is_none());
        assert!(registry.get(keep).is_some());
        assert!(!stage.contains(VisualKey::bullet(hit)));
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut stage = Stage::new();
        let mut registry = bound_registry();
        assert!(!registry.remove(42, &mut stage));
        let id = registry.spawn(&mut stage, laser(300.0, -5.0)).unwrap();
        assert!(registry.remove(id, &mut stage));
        assert!(!registry.remove(id, &mut stage));
    }

    #[test]
    fn test_clear_detaches_everything() {
        let mut stage = Stage::new();
        let mut registry = bound_registry();
        for _ in 0..4 {
            registry.spawn(&mut stage, laser(300.0, -5.0));
        }
        registry.clear(&mut stage);
        assert!(registry.is_empty());
        assert!(stage.is_empty());
    }

    proptest! {
        #[test]
        fn prop_outside_arena_always_removed(
            y in prop_oneof![-500.0f32..=0.0, 600.0f32..1200.0],
            hit in any::<bool>(),
        ) {
            let mut stage = Stage::new();
            let mut registry = bound_registry();
            // Stationary, so the position after advance is `y`
            registry.spawn(&mut stage, laser(y, 0.0)).unwrap();
            registry.advance(1.0, &mut stage, |_, _| hit);
            prop_assert!(registry.is_empty());
            prop_assert!(stage.is_empty());
        }
    }
}
