//! Mesh synchronization protocol
//!
//! The World never talks to the graphics device. It records which derived
//! arrays changed in [`DirtyFlags`]; an upload collaborator implementing
//! [`MeshUploader`] copies them into device buffers when [`MeshSync::flush`]
//! runs, and only the flags that were actually uploaded are cleared.

use bitflags::bitflags;
use gravdisc_mesh::{Overlay, TessellationLevel, Vertex};

use crate::error::SyncError;
use crate::world::World;

bitflags! {
    /// Which derived arrays need to be re-uploaded
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct DirtyFlags: u8 {
        /// No changes
        const NONE = 0;
        /// Vertex positions/colors changed
        const VERTICES = 1 << 0;
        /// Index topology changed
        const INDICES = 1 << 1;
        /// Everything must be uploaded
        const ALL = Self::VERTICES.bits() | Self::INDICES.bits();
    }
}

/// What a single `World::update` changed
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameChanges {
    /// Some body's center moved during this update
    pub vertices_changed: bool,
    /// Body count differs from the previous update
    pub indices_changed: bool,
}

impl FrameChanges {
    pub const NONE: Self = Self {
        vertices_changed: false,
        indices_changed: false,
    };

    pub fn any(&self) -> bool {
        self.vertices_changed || self.indices_changed
    }

    pub fn as_flags(&self) -> DirtyFlags {
        let mut flags = DirtyFlags::NONE;
        if self.vertices_changed {
            flags |= DirtyFlags::VERTICES;
        }
        if self.indices_changed {
            flags |= DirtyFlags::INDICES;
        }
        flags
    }
}

/// Fixed device buffer sizes, in elements
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BufferCapacity {
    pub max_vertex_count: u32,
    pub max_index_count: u32,
}

impl Default for BufferCapacity {
    fn default() -> Self {
        Self {
            max_vertex_count: 800,
            max_index_count: 4000,
        }
    }
}

impl BufferCapacity {
    pub fn new(max_vertex_count: u32, max_index_count: u32) -> Self {
        Self {
            max_vertex_count,
            max_index_count,
        }
    }

    /// Whether both counts fit
    #[inline]
    pub fn fits(&self, vertex_count: usize, index_count: usize) -> bool {
        vertex_count <= self.max_vertex_count as usize && index_count <= self.max_index_count as usize
    }

    /// How many bodies fit at the given level
    pub fn max_bodies(&self, level: TessellationLevel) -> usize {
        let by_vertices = self.max_vertex_count as usize / level.vertices_per_body();
        let by_indices = self.max_index_count as usize / level.indices_per_body();
        by_vertices.min(by_indices)
    }
}

/// Copies CPU geometry into device memory
///
/// Implementations own the device buffers. Both calls replace the buffer
/// contents from offset zero.
pub trait MeshUploader {
    fn upload_vertices(&mut self, vertices: &[Vertex]) -> Result<(), SyncError>;
    fn upload_indices(&mut self, indices: &[u32]) -> Result<(), SyncError>;

    /// Called once per flush that uploaded anything, including a flush that
    /// failed after an earlier buffer was uploaded
    fn finish(&mut self) -> Result<(), SyncError> {
        Ok(())
    }
}

/// Drives uploads from a World's dirty flags
///
/// Holds the overlay geometry and the composed index list (core indices
/// followed by overlay triangles) that was last sent to the device.
#[derive(Debug, Default)]
pub struct MeshSync {
    overlay: Overlay,
    composed: Vec<u32>,
    index_count: usize,
}

impl MeshSync {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn overlay(&self) -> &Overlay {
        &self.overlay
    }

    pub fn overlay_mut(&mut self) -> &mut Overlay {
        &mut self.overlay
    }

    /// Number of indices to draw, as of the last index upload
    pub fn index_count(&self) -> usize {
        self.index_count
    }

    /// Upload whatever is dirty and clear the flags that succeeded
    ///
    /// Returns the set of buffers uploaded. On error the failing buffer stays
    /// dirty so the next flush retries it; buffers uploaded before the failure
    /// are still finished.
    pub fn flush<U: MeshUploader + ?Sized>(
        &mut self,
        world: &mut World,
        uploader: &mut U,
    ) -> Result<DirtyFlags, SyncError> {
        let mut uploaded = DirtyFlags::NONE;
        let result = self.upload_dirty(world, uploader, &mut uploaded);

        if !uploaded.is_empty() {
            uploader.finish()?;
            log::trace!("flushed {:?} ({} indices)", uploaded, self.index_count);
        }

        result.map(|()| uploaded)
    }

    fn upload_dirty<U: MeshUploader + ?Sized>(
        &mut self,
        world: &mut World,
        uploader: &mut U,
        uploaded: &mut DirtyFlags,
    ) -> Result<(), SyncError> {
        let pending = world.dirty();

        if pending.contains(DirtyFlags::VERTICES) {
            uploader.upload_vertices(world.vertices())?;
            world.clear_dirty(DirtyFlags::VERTICES);
            *uploaded |= DirtyFlags::VERTICES;
        }

        if pending.contains(DirtyFlags::INDICES) || self.overlay.is_dirty() {
            self.overlay
                .compose(world.indices(), world.vertices().len(), &mut self.composed);

            let capacity = world.capacity().max_index_count as usize;
            if self.composed.len() > capacity {
                return Err(SyncError::IndexOverflow {
                    required: self.composed.len(),
                    capacity,
                });
            }

            uploader.upload_indices(&self.composed)?;
            world.clear_dirty(DirtyFlags::INDICES);
            self.overlay.clear_dirty();
            self.index_count = self.composed.len();
            *uploaded |= DirtyFlags::INDICES;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dirty_flags_all() {
        assert!(DirtyFlags::ALL.contains(DirtyFlags::VERTICES));
        assert!(DirtyFlags::ALL.contains(DirtyFlags::INDICES));
        assert!(DirtyFlags::default().is_empty());
    }

    #[test]
    fn test_frame_changes_as_flags() {
        assert_eq!(FrameChanges::NONE.as_flags(), DirtyFlags::NONE);
        assert!(!FrameChanges::NONE.any());

        let changes = FrameChanges {
            vertices_changed: true,
            indices_changed: false,
        };
        assert_eq!(changes.as_flags(), DirtyFlags::VERTICES);

        let changes = FrameChanges {
            vertices_changed: true,
            indices_changed: true,
        };
        assert_eq!(changes.as_flags(), DirtyFlags::ALL);
        assert!(changes.any());
    }

    #[test]
    fn test_default_capacity() {
        let capacity = BufferCapacity::default();
        assert_eq!(capacity.max_vertex_count, 800);
        assert_eq!(capacity.max_index_count, 4000);
    }

    #[test]
    fn test_capacity_fits() {
        let capacity = BufferCapacity::new(10, 20);
        assert!(capacity.fits(10, 20));
        assert!(!capacity.fits(11, 20));
        assert!(!capacity.fits(10, 21));
    }

    #[test]
    fn test_max_bodies() {
        let level5 = TessellationLevel::new(5).unwrap();
        // 800 / 32 = 25 by vertices, 4000 / 90 = 44 by indices
        assert_eq!(BufferCapacity::default().max_bodies(level5), 25);

        // Index-limited: 1000 / 32 = 31, 900 / 90 = 10
        assert_eq!(BufferCapacity::new(1000, 900).max_bodies(level5), 10);
    }
}
