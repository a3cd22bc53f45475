//! World container for bodies and their mesh
//!
//! The World owns the bodies, the gravity settings and the derived vertex and
//! index arrays. Body `i` owns vertex slot `i` (a fixed stride given by the
//! tessellation level), so index data only changes when bodies are added.

use gravdisc_math::Vec3;
use gravdisc_mesh::{fan_indices, CircleTessellator, TessellationLevel, Vertex};
use gravdisc_physics::{Body, Gravity, DEFAULT_GRAVITATIONAL_CONSTANT};

use crate::error::WorldError;
use crate::sync::{BufferCapacity, DirtyFlags, FrameChanges};

/// Setup parameters for a World
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WorldConfig {
    /// Tessellation level shared by every body
    pub level: u32,
    /// Initial gravitational constant
    pub gravitational_constant: f32,
    /// Device buffer sizes the mesh must fit in
    pub capacity: BufferCapacity,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            level: 5,
            gravitational_constant: DEFAULT_GRAVITATIONAL_CONSTANT,
            capacity: BufferCapacity::default(),
        }
    }
}

impl WorldConfig {
    pub fn with_level(mut self, level: u32) -> Self {
        self.level = level;
        self
    }

    pub fn with_gravitational_constant(mut self, g: f32) -> Self {
        self.gravitational_constant = g;
        self
    }

    pub fn with_capacity(mut self, capacity: BufferCapacity) -> Self {
        self.capacity = capacity;
        self
    }
}

/// A handle to a body in the world
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BodyHandle(usize);

impl BodyHandle {
    /// Get the raw index of this handle (also its vertex slot)
    #[inline]
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Owned copy of the mesh arrays
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshSnapshot {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

/// The simulated world
///
/// Holds all bodies and their tessellated mesh. `update` advances the
/// simulation; the mesh is uploaded separately through
/// [`MeshSync`](crate::sync::MeshSync).
#[derive(Clone, Debug)]
pub struct World {
    bodies: Vec<Body>,
    gravity: Gravity,
    tessellator: CircleTessellator,
    capacity: BufferCapacity,
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
    /// Pending uploads
    dirty: DirtyFlags,
    /// Body count seen by the last non-noop update
    last_update_body_count: usize,
}

impl World {
    /// Create an empty world
    ///
    /// Fails if the level is out of range or G is not finite.
    pub fn new(config: WorldConfig) -> Result<Self, WorldError> {
        let level = TessellationLevel::new(config.level)?;
        if !config.gravitational_constant.is_finite() {
            return Err(WorldError::InvalidGravitationalConstant(
                config.gravitational_constant,
            ));
        }

        log::debug!(
            "world setup: level {} ({} vertices/body), G = {}, room for {} bodies",
            level.get(),
            level.vertices_per_body(),
            config.gravitational_constant,
            config.capacity.max_bodies(level)
        );

        Ok(Self {
            bodies: Vec::new(),
            gravity: Gravity::new(config.gravitational_constant),
            tessellator: CircleTessellator::new(level),
            capacity: config.capacity,
            vertices: Vec::new(),
            indices: Vec::new(),
            dirty: DirtyFlags::ALL,
            last_update_body_count: 0,
        })
    }

    /// Add a body, tessellating its slot immediately
    ///
    /// Fails with `CapacityExceeded` if the grown mesh would not fit the
    /// device buffers; the world is left unchanged.
    pub fn add_body(&mut self, body: Body) -> Result<BodyHandle, WorldError> {
        let level = self.level();
        let slot = self.bodies.len();
        let bodies = slot + 1;
        let required_vertices = bodies * level.vertices_per_body();
        let required_indices = bodies * level.indices_per_body();

        if !self.capacity.fits(required_vertices, required_indices) {
            log::warn!(
                "rejecting body {}: needs {} vertices / {} indices",
                slot,
                required_vertices,
                required_indices
            );
            return Err(WorldError::CapacityExceeded {
                bodies,
                required_vertices,
                required_indices,
                capacity: self.capacity,
            });
        }

        self.vertices.resize(required_vertices, Vertex::default());
        let start = slot * level.vertices_per_body();
        self.tessellator
            .write_body(&body, &mut self.vertices[start..required_vertices]);
        self.indices.extend(fan_indices(level, slot));

        log::debug!(
            "added body {} at {:?} (mass {}, radius {})",
            slot,
            body.center(),
            body.mass(),
            body.radius()
        );

        self.bodies.push(body);
        self.dirty |= DirtyFlags::ALL;
        Ok(BodyHandle(slot))
    }

    /// Validate raw parameters and add a body at rest
    pub fn add_circle(
        &mut self,
        center: Vec3,
        radius: f32,
        mass: f32,
        color: [f32; 4],
    ) -> Result<BodyHandle, WorldError> {
        let body = Body::new(center, radius, mass, color)?;
        self.add_body(body)
    }

    /// Advance the simulation by `dt` seconds
    ///
    /// A `dt` that is not a finite positive number does nothing and reports
    /// no changes. Otherwise all bodies are integrated together and, if any
    /// moved, every disc is re-tessellated from the new positions.
    pub fn update(&mut self, dt: f32) -> FrameChanges {
        if !(dt.is_finite() && dt > 0.0) {
            return FrameChanges::NONE;
        }

        let moved = self.gravity.step(&mut self.bodies, dt);
        if moved {
            self.rebuild_vertices();
        }

        let indices_changed = self.bodies.len() != self.last_update_body_count;
        self.last_update_body_count = self.bodies.len();

        let changes = FrameChanges {
            vertices_changed: moved,
            indices_changed,
        };
        self.dirty |= changes.as_flags();

        log::trace!("update dt={} -> {:?}", dt, changes);
        changes
    }

    fn rebuild_vertices(&mut self) {
        let stride = self.level().vertices_per_body();
        for (body, slot) in self.bodies.iter().zip(self.vertices.chunks_exact_mut(stride)) {
            self.tessellator.write_body(body, slot);
        }
    }

    /// Change G for subsequent updates
    pub fn set_gravitational_constant(&mut self, g: f32) -> Result<(), WorldError> {
        if !g.is_finite() {
            return Err(WorldError::InvalidGravitationalConstant(g));
        }
        self.gravity.gravitational_constant = g;
        Ok(())
    }

    #[inline]
    pub fn gravitational_constant(&self) -> f32 {
        self.gravity.gravitational_constant
    }

    pub fn gravity(&self) -> &Gravity {
        &self.gravity
    }

    /// Vertex array, `body_count * vertices_per_body` long
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Index array, `body_count * indices_per_body` long
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Copy both mesh arrays
    pub fn snapshot(&self) -> MeshSnapshot {
        MeshSnapshot {
            vertices: self.vertices.clone(),
            indices: self.indices.clone(),
        }
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn body(&self, handle: BodyHandle) -> Option<&Body> {
        self.bodies.get(handle.0)
    }

    #[inline]
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    #[inline]
    pub fn level(&self) -> TessellationLevel {
        self.tessellator.level()
    }

    #[inline]
    pub fn capacity(&self) -> BufferCapacity {
        self.capacity
    }

    /// Buffers waiting to be uploaded
    #[inline]
    pub fn dirty(&self) -> DirtyFlags {
        self.dirty
    }

    /// Mark `flags` as uploaded
    pub fn clear_dirty(&mut self, flags: DirtyFlags) {
        self.dirty.remove(flags);
    }
}
