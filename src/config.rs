//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`GRAVDISC_SECTION__KEY`)

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use gravdisc_core::{BufferCapacity, WorldConfig};
use gravdisc_physics::DEFAULT_GRAVITATIONAL_CONSTANT;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub capacity: CapacityConfig,
    #[serde(default)]
    pub scenario: ScenarioConfig,
    #[serde(default)]
    pub gpu: GpuConfig,
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // GRAVDISC_SIMULATION__LEVEL=4 -> simulation.level = 4
        figment = figment.merge(Env::prefixed("GRAVDISC_").split("__"));

        figment.extract().map_err(ConfigError::from)
    }

    /// World setup parameters from the simulation and capacity sections
    pub fn to_world_config(&self) -> WorldConfig {
        WorldConfig {
            level: self.simulation.level,
            gravitational_constant: self.simulation.gravitational_constant,
            capacity: BufferCapacity::new(
                self.capacity.max_vertex_count,
                self.capacity.max_index_count,
            ),
        }
    }
}

/// Simulation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Tessellation level (segments per disc = 2^level)
    pub level: u32,
    /// Initial gravitational constant (negative repels)
    pub gravitational_constant: f32,
    /// Largest timestep fed to a single update, in seconds
    pub max_dt: f32,
    /// Frames to run before exiting (0 = run until interrupted)
    pub frames: u64,
    /// Frame pacing for the headless loop (0 = unpaced)
    pub target_fps: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            level: 5,
            gravitational_constant: DEFAULT_GRAVITATIONAL_CONSTANT,
            max_dt: 0.25,
            frames: 600,
            target_fps: 60,
        }
    }
}

/// Device buffer sizes, in elements
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CapacityConfig {
    pub max_vertex_count: u32,
    pub max_index_count: u32,
}

impl Default for CapacityConfig {
    fn default() -> Self {
        let capacity = BufferCapacity::default();
        Self {
            max_vertex_count: capacity.max_vertex_count,
            max_index_count: capacity.max_index_count,
        }
    }
}

/// Initial bodies
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    /// RON scenario file; empty uses the built-in grid
    pub path: String,
    pub grid_rows: usize,
    pub grid_cols: usize,
    pub body_radius: f32,
    pub body_mass: f32,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            path: String::new(),
            grid_rows: 5,
            grid_cols: 5,
            body_radius: 0.2,
            body_mass: 2.0,
        }
    }
}

/// GPU upload configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GpuConfig {
    /// Upload meshes to a headless wgpu device when an adapter exists
    pub enabled: bool,
}

impl Default for GpuConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
    /// Frames between momentum/center-of-mass reports (0 disables)
    pub report_interval: u64,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            report_interval: 60,
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.simulation.level, 5);
        assert_eq!(config.capacity.max_vertex_count, 800);
        assert_eq!(config.capacity.max_index_count, 4000);
        assert_eq!(config.scenario.grid_rows * config.scenario.grid_cols, 25);
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml = toml::to_string(&config).unwrap();
        assert!(toml.contains("gravitational_constant"));
        assert!(toml.contains("max_vertex_count"));
        assert!(toml.contains("report_interval"));
    }

    #[test]
    fn test_to_world_config() {
        let mut config = AppConfig::default();
        config.simulation.level = 3;
        config.simulation.gravitational_constant = -0.5;
        config.capacity.max_index_count = 100;

        let world = config.to_world_config();
        assert_eq!(world.level, 3);
        assert_eq!(world.gravitational_constant, -0.5);
        assert_eq!(world.capacity, BufferCapacity::new(800, 100));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: AppConfig = Figment::new()
            .merge(Toml::string("[simulation]\nlevel = 4\nframes = 10"))
            .extract()
            .unwrap();
        assert_eq!(config.simulation.level, 4);
        assert_eq!(config.simulation.frames, 10);
        assert_eq!(config.simulation.max_dt, 0.25);
        assert_eq!(config.debug.log_level, "info");
        assert!(config.gpu.enabled);
    }
}
