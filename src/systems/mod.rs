//! Application systems
//!
//! Pieces of the frame loop kept out of main.rs so they can be tested.

mod diagnostics;
mod simulation;
mod upload;

pub use diagnostics::DiagnosticsSystem;
pub use simulation::{cap_dt, FrameClock};
pub use upload::{CpuMirror, UploadTarget};
