//! Mesh generation for gravdisc
//!
//! Turns bodies into GPU-ready triangle geometry.
//!
//! ## Key Components
//!
//! - [`Vertex`] - Pod vertex layout (position + color) for buffer upload
//! - [`TessellationLevel`] - Validated angular resolution of body discs
//! - [`CircleTessellator`] - Triangle-fan discs at a fixed level
//! - [`Overlay`] - Input-driven triangles composed after the simulated mesh

pub mod overlay;
pub mod tessellate;
pub mod vertex;

pub use overlay::{Overlay, OverlayKey};
pub use tessellate::{
    fan_indices, tessellate, CircleMesh, CircleTessellator, LevelError, TessellationLevel,
    MAX_LEVEL, MIN_SEGMENTS,
};
pub use vertex::{Vertex, INDEX_SIZE, VERTEX_SIZE};
