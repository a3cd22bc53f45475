//! Vector math for gravdisc
//!
//! - [`Vec3`] - 3D vector used for body positions, velocities and accelerations

mod vec3;

pub use vec3::Vec3;
