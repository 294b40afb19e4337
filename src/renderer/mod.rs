//! WebGPU rendering module
//!
//! Draws every attached visual as a flat quad, in stage order.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use shapes::scene_vertices;
pub use vertex::Vertex;
