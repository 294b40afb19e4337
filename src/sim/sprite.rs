//! Visual state shared by every entity

use glam::Vec2;

use super::assets::Texture;
use super::collision::Aabb;

/// Anchor point of a sprite, as a fraction of its size
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Anchor {
    TopLeft,
    Center,
}

impl Anchor {
    fn offset(&self) -> Vec2 {
        match self {
            Anchor::TopLeft => Vec2::ZERO,
            Anchor::Center => Vec2::splat(0.5),
        }
    }
}

/// A textured quad placed in the arena
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    pub texture: Texture,
    /// Position of the anchor point
    pub pos: Vec2,
    pub anchor: Anchor,
    pub scale: f32,
    /// Horizontal lean (skew), used for the player banking
    pub lean: f32,
    /// Rotation in degrees (enemy lasers are flipped to 180)
    pub angle: f32,
}

impl Sprite {
    pub fn new(texture: Texture, pos: Vec2) -> Self {
        Self {
            texture,
            pos,
            anchor: Anchor::TopLeft,
            scale: 1.0,
            lean: 0.0,
            angle: 0.0,
        }
    }

    pub fn with_anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_angle(mut self, angle: f32) -> Self {
        self.angle = angle;
        self
    }

    /// Scaled width in arena pixels
    #[inline]
    pub fn width(&self) -> f32 {
        self.texture.width * self.scale
    }

    /// Scaled height in arena pixels
    #[inline]
    pub fn height(&self) -> f32 {
        self.texture.height * self.scale
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width(), self.height())
    }

    /// On-screen bounds. Rotation by 180 degrees keeps the box in place around
    /// a centered anchor, which is the only rotation used.
    pub fn bounds(&self) -> Aabb {
        let min = self.pos - self.anchor.offset() * self.size();
        Aabb::new(min, min + self.size())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEX: Texture = Texture::new("t.png", 100.0, 50.0);

    #[test]
    fn test_centered_bounds() {
        let sprite = Sprite::new(TEX, Vec2::new(400.0, 300.0))
            .with_anchor(Anchor::Center)
            .with_scale(0.5);
        let b = sprite.bounds();
        assert_eq!(b.min, Vec2::new(375.0, 287.5));
        assert_eq!(b.max, Vec2::new(425.0, 312.5));
    }

    #[test]
    fn test_top_left_bounds() {
        let sprite = Sprite::new(TEX, Vec2::new(10.0, 20.0));
        let b = sprite.bounds();
        assert_eq!(b.min, Vec2::new(10.0, 20.0));
        assert_eq!(b.max, Vec2::new(110.0, 70.0));
    }
}
