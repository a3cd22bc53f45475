//! Circular point-mass bodies

use gravdisc_math::Vec3;

/// A circular point mass
///
/// Mass, radius and color are fixed at creation. Only the integrator moves a
/// body, so position and velocity are read through accessors as well.
#[derive(Clone, Debug, PartialEq)]
pub struct Body {
    pub(crate) center: Vec3,
    pub(crate) velocity: Vec3,
    mass: f32,
    radius: f32,
    color: [f32; 4],
}

impl Body {
    /// Create a body at rest
    ///
    /// Fails if mass or radius is not a finite positive number. Color
    /// components are clamped to [0, 1].
    pub fn new(center: Vec3, radius: f32, mass: f32, color: [f32; 4]) -> Result<Self, BodyError> {
        if !(mass.is_finite() && mass > 0.0) {
            return Err(BodyError::NonPositiveMass(mass));
        }
        if !(radius.is_finite() && radius > 0.0) {
            return Err(BodyError::NonPositiveRadius(radius));
        }
        if !center.is_finite() {
            return Err(BodyError::NonFiniteCenter);
        }

        Ok(Self {
            center,
            velocity: Vec3::ZERO,
            mass,
            radius,
            color: color.map(|c| c.clamp(0.0, 1.0)),
        })
    }

    /// Seed the initial velocity of this body
    pub fn with_velocity(mut self, velocity: Vec3) -> Self {
        self.velocity = velocity;
        self
    }

    /// World-space position
    #[inline]
    pub fn center(&self) -> Vec3 {
        self.center
    }

    /// Velocity in units per second
    #[inline]
    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    #[inline]
    pub fn mass(&self) -> f32 {
        self.mass
    }

    /// Render radius (bodies never collide)
    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// RGBA color shared by every vertex of the body's disc
    #[inline]
    pub fn color(&self) -> [f32; 4] {
        self.color
    }

    /// Linear momentum (mass * velocity)
    #[inline]
    pub fn momentum(&self) -> Vec3 {
        self.velocity * self.mass
    }
}

/// Rejected body parameters
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BodyError {
    /// Mass was zero, negative or not finite
    NonPositiveMass(f32),
    /// Radius was zero, negative or not finite
    NonPositiveRadius(f32),
    /// Center had a NaN or infinite component
    NonFiniteCenter,
}

impl std::fmt::Display for BodyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BodyError::NonPositiveMass(m) => write!(f, "body mass must be positive, got {}", m),
            BodyError::NonPositiveRadius(r) => write!(f, "body radius must be positive, got {}", r),
            BodyError::NonFiniteCenter => write!(f, "body center must be finite"),
        }
    }
}

impl std::error::Error for BodyError {}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: [f32; 4] = [1.0, 0.0, 0.0, 1.0];

    #[test]
    fn test_new_body() {
        let pos = Vec3::new(1.0, 2.0, 0.0);
        let body = Body::new(pos, 0.2, 2.0, RED).unwrap();

        assert_eq!(body.center(), pos);
        assert_eq!(body.velocity(), Vec3::ZERO);
        assert_eq!(body.mass(), 2.0);
        assert_eq!(body.radius(), 0.2);
        assert_eq!(body.color(), RED);
    }

    #[test]
    fn test_rejects_non_positive_mass() {
        assert_eq!(
            Body::new(Vec3::ZERO, 0.2, 0.0, RED),
            Err(BodyError::NonPositiveMass(0.0))
        );
        assert_eq!(
            Body::new(Vec3::ZERO, 0.2, -1.0, RED),
            Err(BodyError::NonPositiveMass(-1.0))
        );
        assert!(Body::new(Vec3::ZERO, 0.2, f32::NAN, RED).is_err());
    }

    #[test]
    fn test_rejects_non_positive_radius() {
        assert_eq!(
            Body::new(Vec3::ZERO, 0.0, 1.0, RED),
            Err(BodyError::NonPositiveRadius(0.0))
        );
        assert!(Body::new(Vec3::ZERO, f32::INFINITY, 1.0, RED).is_err());
    }

    #[test]
    fn test_rejects_non_finite_center() {
        let center = Vec3::new(f32::NAN, 0.0, 0.0);
        assert_eq!(Body::new(center, 0.2, 1.0, RED), Err(BodyError::NonFiniteCenter));
    }

    #[test]
    fn test_color_clamped() {
        let body = Body::new(Vec3::ZERO, 0.2, 1.0, [1.5, -0.5, 0.5, 2.0]).unwrap();
        assert_eq!(body.color(), [1.0, 0.0, 0.5, 1.0]);
    }

    #[test]
    fn test_with_velocity_and_momentum() {
        let body = Body::new(Vec3::ZERO, 0.2, 3.0, RED)
            .unwrap()
            .with_velocity(Vec3::new(1.0, -2.0, 0.0));

        assert_eq!(body.velocity(), Vec3::new(1.0, -2.0, 0.0));
        assert_eq!(body.momentum(), Vec3::new(3.0, -6.0, 0.0));
    }

    #[test]
    fn test_error_display() {
        let msg = format!("{}", BodyError::NonPositiveMass(-2.0));
        assert!(msg.contains("mass"));
        assert!(msg.contains("-2"));
    }
}
