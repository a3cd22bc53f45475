//! GPU-compatible vertex layout
//!
//! The layout matches a std430 storage buffer of
//! `struct Vertex { vec3 position; float pad; vec4 color; }`.
//! All types derive Pod and Zeroable for safe GPU buffer operations.

use bytemuck::{Pod, Zeroable};

/// A mesh vertex with position and color
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    /// Position in world space (x, y, z)
    pub position: [f32; 3],
    /// Padding to align color to 16 bytes
    pub _padding: f32,
    /// RGBA color
    pub color: [f32; 4],
}

impl Vertex {
    /// Create a new vertex
    pub fn new(position: [f32; 3], color: [f32; 4]) -> Self {
        Self {
            position,
            _padding: 0.0,
            color,
        }
    }
}

impl Default for Vertex {
    fn default() -> Self {
        Self::new([0.0; 3], [1.0; 4])
    }
}

/// Size of one vertex in bytes
pub const VERTEX_SIZE: usize = std::mem::size_of::<Vertex>();

/// Size of one index in bytes
pub const INDEX_SIZE: usize = std::mem::size_of::<u32>();

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::{align_of, size_of};

    #[test]
    fn test_vertex_size() {
        // 3 floats position + 1 padding + 4 floats color = 32 bytes
        assert_eq!(size_of::<Vertex>(), 32);
        assert_eq!(VERTEX_SIZE, 32);
        assert_eq!(INDEX_SIZE, 4);
    }

    #[test]
    fn test_alignment() {
        assert_eq!(align_of::<Vertex>(), 4);
    }

    #[test]
    fn test_color_offset() {
        let v = Vertex::new([1.0, 2.0, 3.0], [0.1, 0.2, 0.3, 0.4]);
        let floats: &[f32] = bytemuck::cast_slice(std::slice::from_ref(&v));
        assert_eq!(&floats[4..8], &[0.1, 0.2, 0.3, 0.4]);
    }

    #[test]
    fn test_default_is_white() {
        let v = Vertex::default();
        assert_eq!(v.color, [1.0; 4]);
        assert_eq!(v._padding, 0.0);
    }
}
