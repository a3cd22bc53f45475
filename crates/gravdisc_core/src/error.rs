//! Error types for the World and the sync protocol

use std::fmt;

use gravdisc_mesh::LevelError;
use gravdisc_physics::BodyError;

use crate::sync::BufferCapacity;

/// Error from World setup or mutation
///
/// Every failing call leaves the World unchanged.
#[derive(Clone, Debug, PartialEq)]
pub enum WorldError {
    /// Non-positive mass or radius at add time; the body is not added
    InvalidBodyParameters(BodyError),
    /// Tessellation level outside the supported range
    InvalidLevel(LevelError),
    /// Adding the body would overflow a device buffer
    CapacityExceeded {
        /// Body count the addition would have produced
        bodies: usize,
        required_vertices: usize,
        required_indices: usize,
        capacity: BufferCapacity,
    },
    /// G was NaN or infinite
    InvalidGravitationalConstant(f32),
}

impl fmt::Display for WorldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorldError::InvalidBodyParameters(e) => write!(f, "Invalid body parameters: {}", e),
            WorldError::InvalidLevel(e) => write!(f, "Invalid level: {}", e),
            WorldError::CapacityExceeded {
                bodies,
                required_vertices,
                required_indices,
                capacity,
            } => write!(
                f,
                "Capacity exceeded: {} bodies need {} vertices / {} indices, buffers hold {} / {}",
                bodies,
                required_vertices,
                required_indices,
                capacity.max_vertex_count,
                capacity.max_index_count
            ),
            WorldError::InvalidGravitationalConstant(g) => {
                write!(f, "Gravitational constant must be finite, got {}", g)
            }
        }
    }
}

impl std::error::Error for WorldError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WorldError::InvalidBodyParameters(e) => Some(e),
            WorldError::InvalidLevel(e) => Some(e),
            _ => None,
        }
    }
}

impl From<BodyError> for WorldError {
    fn from(e: BodyError) -> Self {
        WorldError::InvalidBodyParameters(e)
    }
}

impl From<LevelError> for WorldError {
    fn from(e: LevelError) -> Self {
        WorldError::InvalidLevel(e)
    }
}

/// Error while copying geometry to the device
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SyncError {
    /// More vertices than the vertex buffer holds
    VertexOverflow { required: usize, capacity: usize },
    /// More indices (core + overlay) than the index buffer holds
    IndexOverflow { required: usize, capacity: usize },
    /// Device-side failure reported by the uploader
    Device(String),
}

impl fmt::Display for SyncError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncError::VertexOverflow { required, capacity } => {
                write!(f, "Vertex buffer overflow: {} > {}", required, capacity)
            }
            SyncError::IndexOverflow { required, capacity } => {
                write!(f, "Index buffer overflow: {} > {}", required, capacity)
            }
            SyncError::Device(msg) => write!(f, "Device error: {}", msg),
        }
    }
}

impl std::error::Error for SyncError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_capacity_display() {
        let err = WorldError::CapacityExceeded {
            bodies: 26,
            required_vertices: 832,
            required_indices: 2340,
            capacity: BufferCapacity::default(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("26 bodies"));
        assert!(msg.contains("832"));
        assert!(msg.contains("800"));
    }

    #[test]
    fn test_from_body_error() {
        let err: WorldError = BodyError::NonPositiveMass(0.0).into();
        assert_eq!(err, WorldError::InvalidBodyParameters(BodyError::NonPositiveMass(0.0)));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_from_level_error() {
        let err: WorldError = LevelError::OutOfRange(0).into();
        assert!(matches!(err, WorldError::InvalidLevel(_)));
        assert!(format!("{}", err).contains("level"));
    }

    #[test]
    fn test_sync_error_display() {
        let err = SyncError::IndexOverflow {
            required: 10,
            capacity: 9,
        };
        assert_eq!(format!("{}", err), "Index buffer overflow: 10 > 9");
        assert_eq!(
            format!("{}", SyncError::Device("lost".to_string())),
            "Device error: lost"
        );
    }

    #[test]
    fn test_source_none_for_capacity() {
        let err = WorldError::InvalidGravitationalConstant(f32::NAN);
        assert!(err.source().is_none());
    }
}
