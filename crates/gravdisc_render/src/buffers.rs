//! Fixed-capacity mesh buffers
//!
//! Both buffers are allocated once at the World's capacity and rewritten in
//! place, so the draw call only needs the current index count.

use gravdisc_core::{BufferCapacity, MeshUploader, SyncError};
use gravdisc_mesh::{Vertex, INDEX_SIZE, VERTEX_SIZE};

use crate::context::RenderContext;

/// Byte sizes of the vertex and index buffers for `capacity`
pub fn buffer_sizes(capacity: BufferCapacity) -> (u64, u64) {
    (
        capacity.max_vertex_count as u64 * VERTEX_SIZE as u64,
        capacity.max_index_count as u64 * INDEX_SIZE as u64,
    )
}

/// Check that `count` elements fit in a buffer of `capacity` elements
fn check_fits(
    count: usize,
    capacity: u32,
    overflow: fn(usize, usize) -> SyncError,
) -> Result<(), SyncError> {
    if count > capacity as usize {
        Err(overflow(count, capacity as usize))
    } else {
        Ok(())
    }
}

/// Vertex and index buffers on the device
///
/// Implements [`MeshUploader`] by writing through the queue; writes are
/// submitted when a flush finishes.
pub struct MeshBuffers {
    context: RenderContext,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    capacity: BufferCapacity,
    index_count: u32,
}

impl MeshBuffers {
    pub fn new(context: RenderContext, capacity: BufferCapacity) -> Self {
        let (vertex_size, index_size) = buffer_sizes(capacity);
        let device = &context.device;

        let vertex_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Mesh Vertex Buffer"),
            size: vertex_size,
            usage: wgpu::BufferUsages::VERTEX
                | wgpu::BufferUsages::STORAGE
                | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let index_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Mesh Index Buffer"),
            size: index_size,
            usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        log::debug!(
            "allocated mesh buffers: {} vertex bytes, {} index bytes",
            vertex_size,
            index_size
        );

        Self {
            context,
            vertex_buffer,
            index_buffer,
            capacity,
            index_count: 0,
        }
    }

    pub fn vertex_buffer(&self) -> &wgpu::Buffer {
        &self.vertex_buffer
    }

    pub fn index_buffer(&self) -> &wgpu::Buffer {
        &self.index_buffer
    }

    /// Indices to draw (as of the last index upload)
    pub fn index_count(&self) -> u32 {
        self.index_count
    }

    pub fn capacity(&self) -> BufferCapacity {
        self.capacity
    }

    pub fn context(&self) -> &RenderContext {
        &self.context
    }
}

impl MeshUploader for MeshBuffers {
    fn upload_vertices(&mut self, vertices: &[Vertex]) -> Result<(), SyncError> {
        check_fits(vertices.len(), self.capacity.max_vertex_count, |required, capacity| {
            SyncError::VertexOverflow { required, capacity }
        })?;
        if !vertices.is_empty() {
            self.context
                .queue
                .write_buffer(&self.vertex_buffer, 0, bytemuck::cast_slice(vertices));
        }
        Ok(())
    }

    fn upload_indices(&mut self, indices: &[u32]) -> Result<(), SyncError> {
        check_fits(indices.len(), self.capacity.max_index_count, |required, capacity| {
            SyncError::IndexOverflow { required, capacity }
        })?;
        // write_buffer needs a multiple of COPY_BUFFER_ALIGNMENT (4 bytes); u32 always is
        if !indices.is_empty() {
            self.context
                .queue
                .write_buffer(&self.index_buffer, 0, bytemuck::cast_slice(indices));
        }
        self.index_count = indices.len() as u32;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), SyncError> {
        self.context.queue.submit(std::iter::empty());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_sizes() {
        let (vertex_size, index_size) = buffer_sizes(BufferCapacity::default());
        assert_eq!(vertex_size, 800 * 32);
        assert_eq!(index_size, 4000 * 4);
    }

    #[test]
    fn test_check_fits() {
        let overflow = |required, capacity| SyncError::VertexOverflow { required, capacity };
        assert!(check_fits(800, 800, overflow).is_ok());
        assert_eq!(
            check_fits(801, 800, overflow),
            Err(SyncError::VertexOverflow {
                required: 801,
                capacity: 800
            })
        );
    }
}
