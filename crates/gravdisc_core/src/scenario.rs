//! Scenario serialization
//!
//! A scenario is a named list of body templates plus optional world settings,
//! stored as RON. Building a scenario produces a ready-to-run [`World`].

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;

use gravdisc_math::Vec3;
use gravdisc_physics::Body;

use crate::error::WorldError;
use crate::world::{World, WorldConfig};

/// Serializable description of one body
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BodyTemplate {
    pub center: [f32; 3],
    pub radius: f32,
    pub mass: f32,
    /// RGBA in [0, 1]
    pub color: [f32; 4],
    /// Initial velocity, at rest when omitted
    #[serde(default)]
    pub velocity: [f32; 3],
}

impl BodyTemplate {
    pub fn new(center: [f32; 3], radius: f32, mass: f32, color: [f32; 4]) -> Self {
        Self {
            center,
            radius,
            mass,
            color,
            velocity: [0.0; 3],
        }
    }

    pub fn with_velocity(mut self, velocity: [f32; 3]) -> Self {
        self.velocity = velocity;
        self
    }

    /// Validate into a body
    pub fn to_body(&self) -> Result<Body, WorldError> {
        let body = Body::new(self.center.into(), self.radius, self.mass, self.color)?;
        Ok(body.with_velocity(self.velocity.into()))
    }
}

/// A loadable/saveable set of bodies
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// Scenario name (for display/debugging)
    pub name: String,
    /// Overrides the configured tessellation level
    #[serde(default)]
    pub level: Option<u32>,
    /// Overrides the configured gravitational constant
    #[serde(default)]
    pub gravitational_constant: Option<f32>,
    pub bodies: Vec<BodyTemplate>,
}

impl Scenario {
    /// Create an empty scenario
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            level: None,
            gravitational_constant: None,
            bodies: Vec::new(),
        }
    }

    /// A `rows` x `cols` grid of identical bodies at rest
    ///
    /// Row `i` and column `j` sit at fractions `i / rows` and `j / cols` of
    /// the way from `bottom_left` to `top_right`, so the first body lands on
    /// `bottom_left` and the far corner is left empty.
    /// Colors follow the position, mapping [-1, 1] on each axis to [0, 1] in
    /// the red, green and blue channels.
    pub fn grid(
        rows: usize,
        cols: usize,
        bottom_left: Vec3,
        top_right: Vec3,
        radius: f32,
        mass: f32,
    ) -> Self {
        let interpolate = |a: f32, b: f32, i: usize, n: usize| {
            let t = i as f32 / n as f32;
            a * (1.0 - t) + b * t
        };

        let mut scenario = Self::new(format!("grid {}x{}", rows, cols));
        for row in 0..rows {
            for col in 0..cols {
                let x = interpolate(bottom_left.x, top_right.x, col, cols);
                let y = interpolate(bottom_left.y, top_right.y, row, rows);
                let z = interpolate(bottom_left.z, top_right.z, row, rows);
                let color = [(x + 1.0) * 0.5, (y + 1.0) * 0.5, (z + 1.0) * 0.5, 1.0];
                scenario.add_body(BodyTemplate::new([x, y, z], radius, mass, color));
            }
        }
        scenario
    }

    /// Load a scenario from a RON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ScenarioError> {
        let contents = fs::read_to_string(path)?;
        let scenario = ron::from_str(&contents)?;
        Ok(scenario)
    }

    /// Save a scenario to a RON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ScenarioError> {
        let pretty = ron::ser::PrettyConfig::new()
            .struct_names(true)
            .enumerate_arrays(false);
        let contents = ron::ser::to_string_pretty(self, pretty)?;
        fs::write(path, contents)?;
        Ok(())
    }

    pub fn add_body(&mut self, body: BodyTemplate) {
        self.bodies.push(body);
    }

    pub fn with_level(mut self, level: u32) -> Self {
        self.level = Some(level);
        self
    }

    pub fn with_gravitational_constant(mut self, g: f32) -> Self {
        self.gravitational_constant = Some(g);
        self
    }

    /// Create a world from `base`, overridden by this scenario's settings,
    /// and add every body in order
    pub fn build_world(&self, base: WorldConfig) -> Result<World, ScenarioError> {
        let mut config = base;
        if let Some(level) = self.level {
            config.level = level;
        }
        if let Some(g) = self.gravitational_constant {
            config.gravitational_constant = g;
        }

        let mut world = World::new(config)?;
        let room = world.capacity().max_bodies(world.level());
        if self.bodies.len() > room {
            log::warn!(
                "scenario '{}' has {} bodies but the buffers hold {}",
                self.name,
                self.bodies.len(),
                room
            );
        }
        for template in &self.bodies {
            world.add_body(template.to_body()?)?;
        }

        log::info!(
            "built scenario '{}': {} bodies at level {}",
            self.name,
            world.body_count(),
            world.level().get()
        );
        Ok(world)
    }
}

/// Error loading, saving or building a scenario
#[derive(Debug)]
pub enum ScenarioError {
    /// IO error (file not found, permission denied, etc.)
    Io(io::Error),
    /// Parse error (invalid RON syntax)
    Parse(ron::error::SpannedError),
    /// Serialization error
    Serialize(ron::Error),
    /// The scenario describes an invalid world
    World(WorldError),
}

impl From<io::Error> for ScenarioError {
    fn from(e: io::Error) -> Self {
        ScenarioError::Io(e)
    }
}

impl From<ron::error::SpannedError> for ScenarioError {
    fn from(e: ron::error::SpannedError) -> Self {
        ScenarioError::Parse(e)
    }
}

impl From<ron::Error> for ScenarioError {
    fn from(e: ron::Error) -> Self {
        ScenarioError::Serialize(e)
    }
}

impl From<WorldError> for ScenarioError {
    fn from(e: WorldError) -> Self {
        ScenarioError::World(e)
    }
}

impl std::fmt::Display for ScenarioError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScenarioError::Io(e) => write!(f, "IO error: {}", e),
            ScenarioError::Parse(e) => write!(f, "Parse error: {}", e),
            ScenarioError::Serialize(e) => write!(f, "Serialize error: {}", e),
            ScenarioError::World(e) => write!(f, "World error: {}", e),
        }
    }
}

impl std::error::Error for ScenarioError {}
