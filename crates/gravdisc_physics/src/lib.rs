//! Point-mass gravity for gravdisc
//!
//! This crate provides the simulation half of the pipeline:
//! - Circular point-mass bodies
//! - Direct pairwise Newtonian gravity with softening
//! - Semi-implicit Euler integration

pub mod body;
pub mod gravity;

// Re-export commonly used types
pub use body::{Body, BodyError};
pub use gravity::{center_of_mass, total_momentum, Gravity, DEFAULT_GRAVITATIONAL_CONSTANT, SOFTENING};
