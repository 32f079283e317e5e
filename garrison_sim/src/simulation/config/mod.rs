// garrison_sim/src/simulation/config/mod.rs

//! This module handles loading and validating the scenario configuration
//! from disk.

pub mod structs;

use std::path::{Path, PathBuf};

use bevy::prelude::*;
use figment::{
    providers::{Format, Toml},
    Figment,
};
use garrison_core::production::{ParamsError, ProductionParams};
use garrison_core::scene::StaticScene;
use thiserror::Error;

use crate::cli::Cli;
use crate::prelude::AppState;
use crate::simulation::core::transforms::bevy_vec3_to_position;
pub use structs::{ObstacleConfig, RoadConfig, ScenarioConfig, TowerConfig, UnitConfig};

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("failed to load or parse scenario file at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: Box<figment::Error>,
    },
    #[error("invalid production parameters: {0}")]
    InvalidParams(#[from] ParamsError),
    #[error("road '{0}' has a non-positive size")]
    DegenerateRoad(String),
    #[error("'{0}' has a non-positive radius")]
    NonPositiveRadius(String),
}

/// The parameters every production run uses, plus the unit shape that
/// produced units get.
#[derive(Resource, Debug, Clone, Default)]
pub struct ProductionSettings {
    pub params: ProductionParams,
    pub unit: UnitConfig,
}

impl ScenarioConfig {
    /// Parses a scenario from TOML text.
    pub fn from_toml_str(toml: &str) -> Result<Self, ScenarioError> {
        let config: ScenarioConfig = Figment::new()
            .merge(Toml::string(toml))
            .extract()
            .map_err(|e| ScenarioError::Parse {
                path: PathBuf::from("<inline>"),
                source: Box::new(e),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a scenario file.
    pub fn load(path: &Path) -> Result<Self, ScenarioError> {
        let config: ScenarioConfig = Figment::new()
            .merge(Toml::file(path))
            .extract()
            .map_err(|e| ScenarioError::Parse {
                path: path.to_path_buf(),
                source: Box::new(e),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// The scenario's roads and obstacles as an in-memory scene, for running
    /// the production search without an engine.
    pub fn static_scene(&self) -> StaticScene {
        let mut scene = StaticScene::new();
        for road in &self.roads {
            scene.add_road(
                bevy_vec3_to_position(road.translation()),
                bevy_vec3_to_position(road.extents() * 0.5),
            );
        }
        for obstacle in &self.obstacles {
            scene.add_obstacle(
                bevy_vec3_to_position(obstacle.translation()),
                obstacle.radius as f64,
            );
        }
        scene
    }

    pub fn validate(&self) -> Result<(), ScenarioError> {
        self.production_params().validate()?;
        if let Some(road) = self
            .roads
            .iter()
            .find(|road| road.size.iter().any(|&s| !(s > 0.0)))
        {
            return Err(ScenarioError::DegenerateRoad(road.name.clone()));
        }
        if !(self.unit.radius > 0.0) {
            return Err(ScenarioError::NonPositiveRadius("unit".to_string()));
        }
        if let Some(obstacle) = self.obstacles.iter().find(|o| !(o.radius > 0.0)) {
            return Err(ScenarioError::NonPositiveRadius(obstacle.name.clone()));
        }
        Ok(())
    }
}

pub struct ConfigPlugin;

impl Plugin for ConfigPlugin {
    fn build(&self, app: &mut App) {
        app
            // The CLI decides which scenario to load. Binaries insert their own.
            .init_resource::<Cli>()
            .init_resource::<ScenarioConfig>()
            .init_resource::<ProductionSettings>()
            .add_systems(
                OnEnter(AppState::Loading),
                load_scenario.pipe(transition_to_scene_building),
            );
    }
}

/// Returns whether the scenario loaded.
fn load_scenario(
    cli: Res<Cli>,
    mut scenario_config: ResMut<ScenarioConfig>,
    mut settings: ResMut<ProductionSettings>,
    mut exit: EventWriter<AppExit>,
) -> bool {
    info!("Loading scenario from: {}", cli.scenario.display());

    match ScenarioConfig::load(&cli.scenario) {
        Ok(loaded) => {
            info!(
                "Scenario loaded: {} tower(s), {} road(s), {} obstacle(s)",
                loaded.towers.len(),
                loaded.roads.len(),
                loaded.obstacles.len()
            );
            *settings = ProductionSettings {
                params: loaded.production_params(),
                unit: loaded.unit.clone(),
            };
            debug!("Production parameters: {:?}", settings.params);
            *scenario_config = loaded;
            true
        }
        Err(e) => {
            error!("{}", e);
            exit.write(AppExit::error());
            false
        }
    }
}

fn transition_to_scene_building(
    In(loaded): In<bool>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if !loaded {
        return;
    }
    info!("Configuration loading complete. Transitioning to SceneBuilding state.");
    next_state.set(AppState::SceneBuilding);
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_empty_scenario_uses_defaults() {
        let config = ScenarioConfig::from_toml_str("").expect("empty scenario is valid");
        let params = config.production_params();
        assert_eq!(params, ProductionParams::default());
        assert!(config.towers.is_empty());
    }

    #[test]
    fn test_full_scenario_parses() {
        let config = ScenarioConfig::from_toml_str(
            r#"
            [production]
            unit_spacing = 1.5
            unit_count = 3

            [unit]
            height = 2.0

            [[towers]]
            name = "keep"
            position = [1.0, 0.0, -2.0]

            [[roads]]
            name = "lane"
            position = [2.0, 0.0, 0.0]
            size = [10.0, 0.2, 2.0]

            [[obstacles]]
            name = "goblin"
            position = [3.0, 1.0, 0.0]
            radius = 0.5
            "#,
        )
        .expect("scenario should parse");

        let params = config.production_params();
        assert_abs_diff_eq!(params.unit_spacing, 1.5);
        assert_eq!(params.unit_count, 3);
        assert_abs_diff_eq!(params.unit_height_offset, 2.0);
        // Untouched fields keep their defaults.
        assert_abs_diff_eq!(params.detection_radius, 10.0);
        assert_abs_diff_eq!(params.clearance_radius, 0.5);

        assert_eq!(config.towers[0].translation(), Vec3::new(1.0, 0.0, -2.0));
        assert_eq!(config.roads[0].extents(), Vec3::new(10.0, 0.2, 2.0));
        assert_eq!(config.obstacles[0].name, "goblin");
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let result = ScenarioConfig::from_toml_str(
            r#"
            [production]
            unit_spacin = 1.0
            "#,
        );
        assert!(matches!(result, Err(ScenarioError::Parse { .. })));
    }

    #[test]
    fn test_invalid_spacing_is_rejected() {
        let result = ScenarioConfig::from_toml_str(
            r#"
            [production]
            unit_spacing = -1.0
            "#,
        );
        assert!(matches!(
            result,
            Err(ScenarioError::InvalidParams(
                ParamsError::NonPositiveSpacing(_)
            ))
        ));
    }

    #[test]
    fn test_flat_road_is_rejected() {
        let result = ScenarioConfig::from_toml_str(
            r#"
            [[roads]]
            name = "painted_line"
            position = [0.0, 0.0, 0.0]
            size = [4.0, 0.0, 1.0]
            "#,
        );
        assert!(matches!(result, Err(ScenarioError::DegenerateRoad(name)) if name == "painted_line"));
    }

    #[test]
    fn test_non_positive_radii_are_rejected() {
        let unit = ScenarioConfig::from_toml_str(
            r#"
            [unit]
            radius = 0.0
            "#,
        );
        assert!(matches!(unit, Err(ScenarioError::NonPositiveRadius(name)) if name == "unit"));

        let obstacle = ScenarioConfig::from_toml_str(
            r#"
            [[obstacles]]
            name = "ghost"
            position = [0.0, 1.0, 0.0]
            radius = -0.5
            "#,
        );
        assert!(matches!(obstacle, Err(ScenarioError::NonPositiveRadius(name)) if name == "ghost"));
    }

    #[test]
    fn test_oversized_unit_count_is_rejected() {
        let result = ScenarioConfig::from_toml_str(
            r#"
            [production]
            unit_count = 100000
            "#,
        );
        assert!(matches!(
            result,
            Err(ScenarioError::InvalidParams(ParamsError::TooManyUnits(100000)))
        ));
    }

    fn bundled_scenario_path() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("assets/scenarios/crossroads.toml")
    }

    fn bundled_scenario() -> ScenarioConfig {
        ScenarioConfig::load(&bundled_scenario_path()).expect("bundled scenario should load")
    }

    fn loading_app(scenario: PathBuf) -> App {
        use bevy::state::app::StatesPlugin;

        let mut app = App::new();
        app.add_plugins((MinimalPlugins, StatesPlugin))
            .add_plugins(crate::simulation::core::simulation_setup::SimulationSetupPlugin)
            .add_plugins(ConfigPlugin)
            .insert_resource(Cli {
                scenario,
                headless: true,
                ..Default::default()
            });
        app
    }

    #[test]
    fn test_failed_load_stays_in_loading_and_exits() {
        let mut app = loading_app(PathBuf::from("does/not/exist.toml"));
        app.update();
        assert_eq!(app.should_exit(), Some(AppExit::error()));

        app.update();
        app.update();
        assert_eq!(
            *app.world().resource::<State<AppState>>().get(),
            AppState::Loading
        );
    }

    #[test]
    fn test_successful_load_fills_settings_and_moves_on() {
        let mut app = loading_app(bundled_scenario_path());
        for _ in 0..3 {
            app.update();
        }

        assert_ne!(
            *app.world().resource::<State<AppState>>().get(),
            AppState::Loading
        );
        assert!(app.should_exit().is_none());
        let settings = app.world().resource::<ProductionSettings>();
        assert_eq!(settings.params, bundled_scenario().production_params());
        assert_eq!(app.world().resource::<ScenarioConfig>().towers.len(), 1);
    }

    #[test]
    fn test_bundled_scenario_is_valid() {
        let config = bundled_scenario();
        assert_eq!(config.towers.len(), 1);
        assert_eq!(config.roads.len(), 2);
        assert_eq!(config.obstacles.len(), 2);
    }

    #[test]
    fn test_missing_file_is_a_parse_error() {
        let result = ScenarioConfig::load(Path::new("does/not/exist.toml"));
        assert!(matches!(result, Err(ScenarioError::Parse { .. })));
    }

    #[test]
    fn test_bundled_scenario_dry_run() {
        use garrison_core::production::{produce_units, ProductionError};
        use nalgebra::Vector3;

        let config = bundled_scenario();
        let scene = config.static_scene();
        let origin = bevy_vec3_to_position(config.towers[0].translation());

        let report = produce_units(&scene, &origin, &config.production_params(), |_| {})
            .expect("the east-west street is in range");

        // The scout pushes slot 2 forward and the brute pushes slot 3 forward;
        // slot 4 is boxed in by the brute and the edges of the street.
        let positions: Vec<_> = report.positions().collect();
        assert_eq!(
            positions,
            vec![
                Vector3::new(2.0, 1.0, 0.0),
                Vector3::new(3.0, 1.0, 0.0),
                Vector3::new(4.0, 1.0, 1.0),
                Vector3::new(5.0, 1.0, 1.0),
            ]
        );
        assert_eq!(
            report.halted,
            Some(ProductionError::NoValidSpawnPosition { slot: 4 })
        );
    }
}
