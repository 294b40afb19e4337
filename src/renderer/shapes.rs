//! Quad generation for the attached visuals
//!
//! Textures are not loaded; each sprite is drawn as a flat quad in the color
//! its texture maps to.

use glam::Vec2;

use super::vertex::{Vertex, colors};
use crate::consts::{ARENA_HEIGHT, ARENA_WIDTH};
use crate::sim::surface::{Layer, Stage, StageChild};
use crate::sim::{Game, Sprite};

/// Axis-aligned quad from `min` to `max` (two triangles)
pub fn rect(min: Vec2, max: Vec2, color: [f32; 4]) -> [Vertex; 6] {
    [
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(max.x, max.y, color),
        Vertex::new(min.x, max.y, color),
    ]
}

/// Quad for a sprite, skewed by its lean and rotated around its anchor
pub fn sprite_quad(sprite: &Sprite, color: [f32; 4]) -> [Vertex; 6] {
    let bounds = sprite.bounds();
    let (sin_a, cos_a) = sprite.angle.to_radians().sin_cos();
    let (sin_l, cos_l) = sprite.lean.sin_cos();

    // Corners relative to the anchor point
    let transform = |corner: Vec2| {
        let local = corner - sprite.pos;
        // Lean tilts the horizontal axis (a scene graph's skew.y)
        let skewed = Vec2::new(local.x * cos_l, local.x * sin_l + local.y);
        let rotated = Vec2::new(
            skewed.x * cos_a - skewed.y * sin_a,
            skewed.x * sin_a + skewed.y * cos_a,
        );
        sprite.pos + rotated
    };

    let tl = transform(bounds.min);
    let tr = transform(Vec2::new(bounds.max.x, bounds.min.y));
    let bl = transform(Vec2::new(bounds.min.x, bounds.max.y));
    let br = transform(bounds.max);

    [
        Vertex::new(tl.x, tl.y, color),
        Vertex::new(tr.x, tr.y, color),
        Vertex::new(bl.x, bl.y, color),
        Vertex::new(tr.x, tr.y, color),
        Vertex::new(br.x, br.y, color),
        Vertex::new(bl.x, bl.y, color),
    ]
}

/// Arena backdrop, so letterboxing is visible
pub fn arena_backdrop() -> [Vertex; 6] {
    rect(
        Vec2::ZERO,
        Vec2::new(ARENA_WIDTH, ARENA_HEIGHT),
        colors::ARENA,
    )
}

/// Sprite behind an attached visual, if its entity is still alive
fn sprite_for<'a>(game: &'a Game<Stage>, child: &StageChild) -> Option<&'a Sprite> {
    match child.key.layer {
        Layer::Player => game.player.sprite(),
        Layer::Enemy => game.enemies.get(child.key.id).map(|e| &e.sprite),
        Layer::Bullet => game.bullets.get(child.key.id).map(|b| &b.sprite),
    }
}

/// Every attached visual in stage (draw) order, in arena coordinates
pub fn scene_vertices(game: &Game<Stage>) -> Vec<Vertex> {
    let children = game.stage.children();
    let mut vertices = Vec::with_capacity((children.len() + 1) * 6);
    vertices.extend_from_slice(&arena_backdrop());

    for child in children {
        let Some(sprite) = sprite_for(game, child) else {
            log::debug!("Stage child {:?} has no entity behind it", child.key);
            continue;
        };
        vertices.extend_from_slice(&sprite_quad(sprite, colors::for_texture(child.texture)));
    }
    vertices
}
