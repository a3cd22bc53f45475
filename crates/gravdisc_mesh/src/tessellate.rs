//! Circle tessellation
//!
//! Each body is drawn as a regular polygon of `segments(level)` perimeter
//! vertices. Triangles form a fan anchored at perimeter vertex 0, so there is
//! no center vertex:
//!
//! ```text
//! vertices_per_body = segments
//! indices_per_body  = 3 * (segments - 2)
//! triangle k        = (0, k + 1, k + 2)   for k in 0..segments - 2
//! ```
//!
//! Every body in a world shares one level, so the per-body stride is uniform
//! and body `i` owns vertices `i * vertices_per_body ..`.

use crate::vertex::Vertex;
use gravdisc_math::Vec3;
use gravdisc_physics::Body;

/// Highest accepted level (4096 vertices per body)
pub const MAX_LEVEL: u32 = 12;

/// Polygons never have fewer sides than this
pub const MIN_SEGMENTS: u32 = 3;

/// Angular resolution of body discs
///
/// `segments = max(2^level, 3)`: level 1 is a triangle, 2 a square, 5 gives
/// 32 sides.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TessellationLevel(u32);

impl TessellationLevel {
    /// Validate a level in `1..=MAX_LEVEL`
    pub fn new(level: u32) -> Result<Self, LevelError> {
        if (1..=MAX_LEVEL).contains(&level) {
            Ok(Self(level))
        } else {
            Err(LevelError::OutOfRange(level))
        }
    }

    /// The raw level
    #[inline]
    pub fn get(self) -> u32 {
        self.0
    }

    /// Number of perimeter vertices
    #[inline]
    pub fn segments(self) -> u32 {
        (1u32 << self.0).max(MIN_SEGMENTS)
    }

    #[inline]
    pub fn vertices_per_body(self) -> usize {
        self.segments() as usize
    }

    #[inline]
    pub fn indices_per_body(self) -> usize {
        3 * (self.segments() as usize - 2)
    }
}

/// Rejected tessellation level
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LevelError {
    OutOfRange(u32),
}

impl std::fmt::Display for LevelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LevelError::OutOfRange(level) => write!(
                f,
                "tessellation level {} out of range 1..={}",
                level, MAX_LEVEL
            ),
        }
    }
}

impl std::error::Error for LevelError {}

/// Positions and local fan indices for one disc
#[derive(Clone, Debug, PartialEq)]
pub struct CircleMesh {
    pub positions: Vec<Vec3>,
    /// 0-based, relative to the first perimeter vertex
    pub indices: Vec<u32>,
}

/// Tessellates discs at a fixed level
///
/// The unit-circle directions are computed once so per-frame rebuilds only
/// scale and translate.
#[derive(Clone, Debug)]
pub struct CircleTessellator {
    level: TessellationLevel,
    unit: Vec<(f32, f32)>,
}

impl CircleTessellator {
    pub fn new(level: TessellationLevel) -> Self {
        let segments = level.segments();
        let unit = (0..segments)
            .map(|k| {
                let theta = std::f32::consts::TAU * k as f32 / segments as f32;
                (theta.cos(), theta.sin())
            })
            .collect();

        Self { level, unit }
    }

    #[inline]
    pub fn level(&self) -> TessellationLevel {
        self.level
    }

    /// Perimeter positions of a disc, starting at angle 0
    pub fn positions(&self, center: Vec3, radius: f32) -> impl Iterator<Item = Vec3> + '_ {
        self.unit
            .iter()
            .map(move |&(c, s)| Vec3::new(center.x + radius * c, center.y + radius * s, center.z))
    }

    /// Write one body's disc into its vertex slot
    ///
    /// `out` must be exactly `vertices_per_body` long.
    pub fn write_body(&self, body: &Body, out: &mut [Vertex]) {
        debug_assert_eq!(out.len(), self.level.vertices_per_body());

        let color = body.color();
        for (slot, pos) in out.iter_mut().zip(self.positions(body.center(), body.radius())) {
            *slot = Vertex::new(pos.to_array(), color);
        }
    }

    /// Fan indices for the body in `slot`, offset into the shared vertex array
    pub fn fan_indices(&self, slot: usize) -> impl Iterator<Item = u32> {
        fan_indices(self.level, slot)
    }

    /// Positions and local indices for a body
    pub fn tessellate(&self, body: &Body) -> CircleMesh {
        CircleMesh {
            positions: self.positions(body.center(), body.radius()).collect(),
            indices: fan_indices(self.level, 0).collect(),
        }
    }
}

/// Tessellate a single body at the given level
pub fn tessellate(body: &Body, level: TessellationLevel) -> CircleMesh {
    CircleTessellator::new(level).tessellate(body)
}

/// Triangle-fan indices for slot `slot`, offset by `slot * vertices_per_body`
pub fn fan_indices(level: TessellationLevel, slot: usize) -> impl Iterator<Item = u32> {
    let base = (slot * level.vertices_per_body()) as u32;
    let triangles = level.segments() - 2;
    (0..triangles).flat_map(move |k| [base, base + k + 1, base + k + 2])
}
