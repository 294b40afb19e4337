//! Render surface seam
//!
//! The simulation only ever attaches and detaches visuals. What a surface does
//! with them (draw, record, ignore) is up to the implementation.

/// Which entity store a visual belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Layer {
    Player,
    Enemy,
    Bullet,
}

/// Identifies a visual across all stores (ids are only unique per store)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VisualKey {
    pub layer: Layer,
    pub id: u32,
}

impl VisualKey {
    pub const fn player() -> Self {
        Self {
            layer: Layer::Player,
            id: 0,
        }
    }

    pub const fn enemy(id: u32) -> Self {
        Self {
            layer: Layer::Enemy,
            id,
        }
    }

    pub const fn bullet(id: u32) -> Self {
        Self {
            layer: Layer::Bullet,
            id,
        }
    }
}

/// Container visuals are attached to while they are alive
pub trait RenderSurface {
    fn attach(&mut self, key: VisualKey, texture: &'static str);
    fn detach(&mut self, key: VisualKey);
}

/// An attached visual
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageChild {
    pub key: VisualKey,
    pub texture: &'static str,
}

/// In-memory surface: children in attach order (draw order)
#[derive(Debug, Clone, Default)]
pub struct Stage {
    children: Vec<StageChild>,
}

impl Stage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn children(&self) -> &[StageChild] {
        &self.children
    }

    pub fn contains(&self, key: VisualKey) -> bool {
        self.children.iter().any(|c| c.key == key)
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of attached visuals on one layer
    pub fn count(&self, layer: Layer) -> usize {
        self.children.iter().filter(|c| c.key.layer == layer).count()
    }

    pub fn clear(&mut self) {
        self.children.clear();
    }
}

impl RenderSurface for Stage {
    fn attach(&mut self, key: VisualKey, texture: &'static str) {
        // Re-attaching moves the child to the top, as a scene graph would
        self.children.retain(|c| c.key != key);
        self.children.push(StageChild { key, texture });
    }

    fn detach(&mut self, key: VisualKey) {
        self.children.retain(|c| c.key != key);
    }
}
