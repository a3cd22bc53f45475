//! Core types for gravdisc
//!
//! This crate ties physics and mesh generation together:
//!
//! - [`World`] - Bodies, gravity and the derived vertex/index arrays
//! - [`WorldConfig`] - Level, initial G and buffer capacity
//! - [`DirtyFlags`] / [`FrameChanges`] - What needs re-uploading
//! - [`MeshUploader`] - Device-side collaborator that receives geometry
//! - [`MeshSync`] - Flushes dirty geometry (plus overlay) to an uploader
//! - [`Scenario`] - Loadable/saveable body layouts

mod error;
mod scenario;
mod sync;
mod world;

pub use error::{SyncError, WorldError};
pub use scenario::{BodyTemplate, Scenario, ScenarioError};
pub use sync::{BufferCapacity, DirtyFlags, FrameChanges, MeshSync, MeshUploader};
pub use world::{BodyHandle, MeshSnapshot, World, WorldConfig};

// Re-export commonly used types for convenient access through gravdisc_core
pub use gravdisc_math::Vec3;
pub use gravdisc_mesh::{Overlay, OverlayKey, TessellationLevel, Vertex};
pub use gravdisc_physics::{center_of_mass, total_momentum, Body, BodyError, Gravity};
