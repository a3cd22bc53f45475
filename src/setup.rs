//! World construction from configuration

use gravdisc_core::{Scenario, ScenarioError, Vec3, World};

use crate::config::AppConfig;

/// Corners of the built-in grid
pub const GRID_BOTTOM_LEFT: Vec3 = Vec3 { x: -1.0, y: -1.0, z: 0.0 };
pub const GRID_TOP_RIGHT: Vec3 = Vec3 { x: 1.0, y: 1.0, z: 0.0 };

/// The scenario named by `scenario.path`, or the built-in grid when empty
pub fn load_scenario(config: &AppConfig) -> Result<Scenario, ScenarioError> {
    let scenario = &config.scenario;
    if scenario.path.is_empty() {
        Ok(Scenario::grid(
            scenario.grid_rows,
            scenario.grid_cols,
            GRID_BOTTOM_LEFT,
            GRID_TOP_RIGHT,
            scenario.body_radius,
            scenario.body_mass,
        ))
    } else {
        log::info!("Loading scenario from {}", scenario.path);
        Scenario::load(&scenario.path)
    }
}

/// Build the initial World described by `config`
pub fn build_world(config: &AppConfig) -> Result<World, ScenarioError> {
    load_scenario(config)?.build_world(config.to_world_config())
}
