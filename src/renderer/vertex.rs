//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Colors for game elements
pub mod colors {
    pub const BACKGROUND: [f32; 4] = [0.02, 0.02, 0.05, 1.0];
    pub const ARENA: [f32; 4] = [0.05, 0.05, 0.12, 1.0];
    pub const PLAYER: [f32; 4] = [0.3, 0.6, 1.0, 1.0];
    pub const ENEMY_RED: [f32; 4] = [0.9, 0.25, 0.2, 1.0];
    pub const ENEMY_BLUE: [f32; 4] = [0.25, 0.45, 0.95, 1.0];
    pub const ENEMY_GREEN: [f32; 4] = [0.3, 0.85, 0.35, 1.0];
    pub const LASER_RED: [f32; 4] = [1.0, 0.4, 0.3, 1.0];
    pub const LASER_BLUE: [f32; 4] = [0.5, 0.8, 1.0, 1.0];
    pub const LASER_GREEN: [f32; 4] = [0.5, 1.0, 0.5, 1.0];
    /// Unknown texture
    pub const FALLBACK: [f32; 4] = [1.0, 0.0, 1.0, 1.0];

    /// Stand-in color for a texture path
    pub fn for_texture(path: &str) -> [f32; 4] {
        let laser = path.contains("/Lasers/");
        if path.contains("playerShip") {
            PLAYER
        } else if path.contains("Red") {
            if laser { LASER_RED } else { ENEMY_RED }
        } else if path.contains("Blue") {
            if laser { LASER_BLUE } else { ENEMY_BLUE }
        } else if path.contains("Green") {
            if laser { LASER_GREEN } else { ENEMY_GREEN }
        } else {
            FALLBACK
        }
    }
}
