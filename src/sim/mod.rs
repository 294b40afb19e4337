//! Simulation module
//!
//! All gameplay logic lives here. This module must stay platform-free:
//! - Frame-unit physics (`dt = 1.0` is one 60 Hz frame)
//! - Seeded RNG only
//! - Stable iteration order (insertion order, ids from per-store counters)
//! - Visuals reach the outside world only through `RenderSurface`

pub mod assets;
pub mod bullets;
pub mod collision;
pub mod enemies;
pub mod game;
pub mod player;
pub mod schedule;
pub mod sprite;
pub mod state;
pub mod surface;

pub use bullets::{Bullet, BulletId, BulletRegistry, NewBullet, Shot};
pub use collision::{Aabb, bullet_hits, out_of_arena_vertical};
pub use enemies::{Enemy, EnemyId, EnemyRegistry, Variant};
pub use game::Game;
pub use player::{KeyState, Movement, PlayerController, PlayerState};
pub use schedule::Scheduler;
pub use sprite::{Anchor, Sprite};
pub use state::{GameEvent, HitRule, MatchState, PHASES, Phase, Rank, TimerAction};
pub use surface::{Layer, RenderSurface, Stage, StageChild, VisualKey};
