//! gravdisc: gravitating discs rendered as triangle meshes
//!
//! The library half of the binary: configuration loading, world setup and
//! the frame-loop systems.

pub mod config;
pub mod setup;
pub mod systems;
