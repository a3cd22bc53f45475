//! Periodic simulation reports

use gravdisc_core::{center_of_mass, total_momentum, World};

/// Logs momentum and center of mass every `interval` frames
pub struct DiagnosticsSystem {
    interval: u64,
    frame: u64,
}

impl DiagnosticsSystem {
    /// `interval == 0` disables reporting
    pub fn new(interval: u64) -> Self {
        Self { interval, frame: 0 }
    }

    /// Count a frame. Returns true if a report was logged.
    pub fn on_frame(&mut self, world: &World) -> bool {
        self.frame += 1;
        if self.interval == 0 || self.frame % self.interval != 0 {
            return false;
        }

        let momentum = total_momentum(world.bodies());
        match center_of_mass(world.bodies()) {
            Some(com) => log::info!(
                "frame {}: {} bodies, momentum ({:.5}, {:.5}, {:.5}), center of mass ({:.4}, {:.4}, {:.4})",
                self.frame,
                world.body_count(),
                momentum.x,
                momentum.y,
                momentum.z,
                com.x,
                com.y,
                com.z
            ),
            None => log::info!("frame {}: empty world", self.frame),
        }
        true
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }
}
