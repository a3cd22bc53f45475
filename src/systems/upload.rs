//! Upload targets for the frame loop

use gravdisc_core::{BufferCapacity, MeshUploader, SyncError, Vertex};
use gravdisc_render::MeshBuffers;

/// Host-memory copy of the device buffers, used when no GPU is available
#[derive(Debug, Default)]
pub struct CpuMirror {
    capacity: Option<BufferCapacity>,
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl CpuMirror {
    /// A mirror that enforces the same limits as device buffers
    pub fn with_capacity(capacity: BufferCapacity) -> Self {
        Self {
            capacity: Some(capacity),
            ..Self::default()
        }
    }
}

impl MeshUploader for CpuMirror {
    fn upload_vertices(&mut self, vertices: &[Vertex]) -> Result<(), SyncError> {
        if let Some(capacity) = self.capacity {
            let max = capacity.max_vertex_count as usize;
            if vertices.len() > max {
                return Err(SyncError::VertexOverflow {
                    required: vertices.len(),
                    capacity: max,
                });
            }
        }
        self.vertices.clear();
        self.vertices.extend_from_slice(vertices);
        Ok(())
    }

    fn upload_indices(&mut self, indices: &[u32]) -> Result<(), SyncError> {
        if let Some(capacity) = self.capacity {
            let max = capacity.max_index_count as usize;
            if indices.len() > max {
                return Err(SyncError::IndexOverflow {
                    required: indices.len(),
                    capacity: max,
                });
            }
        }
        self.indices.clear();
        self.indices.extend_from_slice(indices);
        Ok(())
    }
}

/// Where flushed geometry goes
pub enum UploadTarget {
    Gpu(MeshBuffers),
    Cpu(CpuMirror),
}

impl UploadTarget {
    pub fn name(&self) -> &'static str {
        match self {
            UploadTarget::Gpu(_) => "gpu",
            UploadTarget::Cpu(_) => "cpu",
        }
    }

    pub fn uploader(&mut self) -> &mut dyn MeshUploader {
        match self {
            UploadTarget::Gpu(buffers) => buffers,
            UploadTarget::Cpu(mirror) => mirror,
        }
    }
}
