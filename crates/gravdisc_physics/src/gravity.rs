//! Newtonian gravity and time integration
//!
//! Accelerations are summed directly over every unordered pair of bodies
//! (O(n²)), then bodies are advanced with semi-implicit Euler: velocity first,
//! then position from the updated velocity.

use crate::body::Body;
use gravdisc_math::Vec3;

/// Softening term added to |r|³ so coincident bodies contribute zero force
/// instead of NaN or infinity
pub const SOFTENING: f32 = 1e-6;

/// Default gravitational constant
pub const DEFAULT_GRAVITATIONAL_CONSTANT: f32 = 0.1;

/// Configuration for the gravity step
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Gravity {
    /// Gravitational constant G (negative values repel)
    pub gravitational_constant: f32,
    /// Softening term in the force denominator
    pub softening: f32,
}

impl Default for Gravity {
    fn default() -> Self {
        Self {
            gravitational_constant: DEFAULT_GRAVITATIONAL_CONSTANT,
            softening: SOFTENING,
        }
    }
}

impl Gravity {
    /// Create a gravity config with the given G and the default softening
    pub fn new(gravitational_constant: f32) -> Self {
        Self {
            gravitational_constant,
            softening: SOFTENING,
        }
    }

    /// G / (|r|³ + softening) for the displacement `r`
    #[inline]
    fn strength(&self, r: Vec3) -> f32 {
        let dist_sq = r.length_squared();
        let dist = dist_sq.sqrt();
        self.gravitational_constant / (dist_sq * dist + self.softening)
    }

    /// Force exerted on `a` by `b`
    ///
    /// Points from `a` toward `b` for positive G. Swapping the arguments gives
    /// exactly the negated vector.
    pub fn pair_force(&self, a: &Body, b: &Body) -> Vec3 {
        let r = b.center - a.center;
        r * (a.mass() * b.mass() * self.strength(r))
    }

    /// Acceleration of every body due to all others, in body order
    pub fn accelerations(&self, bodies: &[Body]) -> Vec<Vec3> {
        let n = bodies.len();
        let mut accel = vec![Vec3::ZERO; n];

        for i in 0..n {
            for j in (i + 1)..n {
                let r = bodies[j].center - bodies[i].center;
                let s = self.strength(r);

                // i is pulled along +r, j along -r
                accel[i] += r * (bodies[j].mass() * s);
                accel[j] -= r * (bodies[i].mass() * s);
            }
        }

        accel
    }

    /// Advance all bodies by `dt` seconds
    ///
    /// A `dt` that is not a finite positive number leaves every body untouched.
    /// Returns true if any body's center changed.
    pub fn step(&self, bodies: &mut [Body], dt: f32) -> bool {
        if !(dt.is_finite() && dt > 0.0) {
            log::trace!("gravity step skipped for dt = {}", dt);
            return false;
        }

        // All accelerations come from pre-step positions
        let accel = self.accelerations(bodies);

        let mut moved = false;
        for (body, a) in bodies.iter_mut().zip(accel) {
            body.velocity += a * dt;
            let next = body.center + body.velocity * dt;
            moved |= next != body.center;
            body.center = next;
        }

        moved
    }
}

/// Sum of mass * velocity over all bodies
pub fn total_momentum(bodies: &[Body]) -> Vec3 {
    bodies
        .iter()
        .fold(Vec3::ZERO, |acc, body| acc + body.momentum())
}

/// Mass-weighted mean position, or None for an empty slice
pub fn center_of_mass(bodies: &[Body]) -> Option<Vec3> {
    let total_mass: f32 = bodies.iter().map(Body::mass).sum();
    if bodies.is_empty() || total_mass <= 0.0 {
        return None;
    }

    let weighted = bodies
        .iter()
        .fold(Vec3::ZERO, |acc, body| acc + body.center * body.mass());
    Some(weighted / total_mass)
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: [f32; 4] = [1.0; 4];

    fn body(x: f32, y: f32, mass: f32) -> Body {
        Body::new(Vec3::new(x, y, 0.0), 0.2, mass, WHITE).unwrap()
    }

    #[test]
    fn test_default_gravity() {
        let gravity = Gravity::default();
        assert_eq!(gravity.gravitational_constant, DEFAULT_GRAVITATIONAL_CONSTANT);
        assert_eq!(gravity.softening, SOFTENING);
    }

    #[test]
    fn test_pair_force_symmetry() {
        let gravity = Gravity::new(1.0);
        let a = body(0.0, 0.0, 2.0);
        let b = body(0.7, -0.3, 2.0);

        let f_ab = gravity.pair_force(&a, &b);
        let f_ba = gravity.pair_force(&b, &a);

        assert_eq!(f_ab, -f_ba);
        assert!(f_ab.x > 0.0 && f_ab.y < 0.0, "force on a should point toward b");
    }

    #[test]
    fn test_pair_force_symmetry_unequal_mass() {
        let gravity = Gravity::new(0.5);
        let a = body(-1.0, 2.0, 1.0);
        let b = body(3.0, 0.5, 7.0);

        assert_eq!(gravity.pair_force(&a, &b), -gravity.pair_force(&b, &a));
    }

    #[test]
    fn test_inverse_square_falloff() {
        let gravity = Gravity::new(1.0);
        let a = body(0.0, 0.0, 1.0);
        let near = body(1.0, 0.0, 1.0);
        let far = body(2.0, 0.0, 1.0);

        let ratio = gravity.pair_force(&a, &near).length() / gravity.pair_force(&a, &far).length();
        assert!((ratio - 4.0).abs() < 0.001);
    }

    #[test]
    fn test_coincident_bodies_no_nan() {
        let gravity = Gravity::new(1.0);
        let mut bodies = vec![body(0.5, 0.5, 1.0), body(0.5, 0.5, 3.0)];

        let accel = gravity.accelerations(&bodies);
        assert_eq!(accel, vec![Vec3::ZERO, Vec3::ZERO]);

        gravity.step(&mut bodies, 0.1);
        assert!(bodies.iter().all(|b| b.center().is_finite() && b.velocity().is_finite()));
    }

    #[test]
    fn test_zero_g_no_drift() {
        let gravity = Gravity::new(0.0);
        let mut bodies = vec![body(0.0, 0.0, 1.0), body(1.0, 0.0, 5.0), body(0.0, 1.0, 2.0)];
        let before = bodies.clone();

        for _ in 0..100 {
            assert!(!gravity.step(&mut bodies, 0.016));
        }

        assert_eq!(bodies, before);
    }

    #[test]
    fn test_non_positive_dt_is_noop() {
        let gravity = Gravity::new(1.0);
        let mut bodies = vec![body(0.0, 0.0, 1.0), body(1.0, 0.0, 1.0)];
        let before = bodies.clone();

        assert!(!gravity.step(&mut bodies, 0.0));
        assert!(!gravity.step(&mut bodies, -0.5));
        assert!(!gravity.step(&mut bodies, f32::NAN));
        assert_eq!(bodies, before);
    }

    #[test]
    fn test_single_body_coasts() {
        let gravity = Gravity::new(1.0);
        let mut bodies = vec![body(0.0, 0.0, 1.0).with_velocity(Vec3::new(2.0, 0.0, 0.0))];

        assert!(gravity.step(&mut bodies, 0.5));
        assert_eq!(bodies[0].center(), Vec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_semi_implicit_euler_order() {
        // Position advances with the velocity updated in the same step
        let gravity = Gravity::new(1.0);
        let mut bodies = vec![body(0.0, 0.0, 1.0), body(1.0, 0.0, 1.0)];
        let dt = 0.25;
        let a = gravity.accelerations(&bodies)[0];

        gravity.step(&mut bodies, dt);

        let expected_velocity = Vec3::ZERO + a * dt;
        assert_eq!(bodies[0].velocity(), expected_velocity);
        assert_eq!(bodies[0].center(), Vec3::ZERO + expected_velocity * dt);
        assert!(bodies[0].center().x > 0.0);
    }

    #[test]
    fn test_two_body_attraction() {
        let gravity = Gravity::new(1.0);
        let mut bodies = vec![body(0.0, 0.0, 2.0), body(1.0, 0.0, 2.0)];

        gravity.step(&mut bodies, 1.0);

        // a = G * m / (1 + eps) ≈ 2, so each body moves ≈ 2 along x
        let da = bodies[0].center() - Vec3::new(0.0, 0.0, 0.0);
        let db = bodies[1].center() - Vec3::new(1.0, 0.0, 0.0);
        assert!(da.x > 0.0 && db.x < 0.0);
        assert!((da.x + db.x).abs() < 1e-5);
        assert!((da.x - 2.0).abs() < 1e-4);
        assert_eq!(da.y, 0.0);
        assert_eq!(db.y, 0.0);
    }

    #[test]
    fn test_momentum_conserved() {
        let gravity = Gravity::new(0.5);
        let mut bodies = vec![
            body(0.0, 0.0, 1.0).with_velocity(Vec3::new(0.0, 0.3, 0.0)),
            body(1.0, 0.2, 3.0),
            body(-0.4, 0.8, 2.0).with_velocity(Vec3::new(-0.1, 0.0, 0.0)),
        ];
        let initial = total_momentum(&bodies);

        for _ in 0..50 {
            gravity.step(&mut bodies, 0.01);
        }

        let drift = (total_momentum(&bodies) - initial).length();
        assert!(drift < 1e-3, "momentum drifted by {}", drift);
    }

    #[test]
    fn test_center_of_mass() {
        let bodies = vec![body(0.0, 0.0, 1.0), body(4.0, 0.0, 3.0)];
        assert_eq!(center_of_mass(&bodies), Some(Vec3::new(3.0, 0.0, 0.0)));
        assert_eq!(center_of_mass(&[]), None);
    }

    #[test]
    fn test_negative_g_repels() {
        let gravity = Gravity::new(-1.0);
        let mut bodies = vec![body(0.0, 0.0, 1.0), body(1.0, 0.0, 1.0)];

        gravity.step(&mut bodies, 0.1);

        assert!(bodies[0].center().x < 0.0);
        assert!(bodies[1].center().x > 1.0);
    }
}
