//! Frame timing
//!
//! Converts wall-clock time between frames into the `dt` fed to
//! `World::update`.

use std::time::Instant;

/// Monotonic frame clock with a capped timestep
pub struct FrameClock {
    last_frame: Instant,
    max_dt: f32,
}

impl FrameClock {
    /// Create a clock starting now
    ///
    /// A `max_dt` that is not a finite positive number disables the cap.
    pub fn new(max_dt: f32) -> Self {
        Self {
            last_frame: Instant::now(),
            max_dt,
        }
    }

    /// Seconds since the previous tick, capped at `max_dt`
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let raw_dt = (now - self.last_frame).as_secs_f32();
        self.last_frame = now;
        cap_dt(raw_dt, self.max_dt)
    }

    pub fn max_dt(&self) -> f32 {
        self.max_dt
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(0.25)
    }
}

/// Cap a frame time so a stall (first frame, debugger pause) cannot
/// produce one huge integration step
pub fn cap_dt(raw_dt: f32, max_dt: f32) -> f32 {
    if max_dt.is_finite() && max_dt > 0.0 {
        raw_dt.min(max_dt)
    } else {
        raw_dt
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_delta_time_capped() {
        let mut clock = FrameClock::new(0.05);
        std::thread::sleep(Duration::from_millis(100));
        assert_eq!(clock.tick(), 0.05);
    }

    #[test]
    fn test_tick_is_monotonic() {
        let mut clock = FrameClock::default();
        std::thread::sleep(Duration::from_millis(5));
        let dt = clock.tick();
        assert!(dt > 0.0);
        assert!(dt <= clock.max_dt());
    }

    #[test]
    fn test_cap_dt() {
        assert_eq!(cap_dt(0.01, 0.25), 0.01);
        assert_eq!(cap_dt(1.0, 0.25), 0.25);
        assert_eq!(cap_dt(1.0, 0.0), 1.0);
        assert_eq!(cap_dt(1.0, f32::NAN), 1.0);
    }
}
