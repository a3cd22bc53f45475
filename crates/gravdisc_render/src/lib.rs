//! GPU upload for gravdisc meshes
//!
//! ## Key Components
//!
//! - [`context::RenderContext`] - Headless wgpu device and queue
//! - [`buffers::MeshBuffers`] - Fixed-capacity vertex/index buffers implementing
//!   [`MeshUploader`](gravdisc_core::MeshUploader)

pub mod buffers;
pub mod context;

pub use buffers::MeshBuffers;
pub use context::{RenderContext, RenderError};
