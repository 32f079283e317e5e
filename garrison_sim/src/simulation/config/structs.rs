// garrison_sim/src/simulation/config/structs.rs

use bevy::prelude::{Resource, Vec3};
use garrison_core::production::ProductionParams;
use serde::Deserialize;

// =========================================================================
// == Top-Level Configuration Resource ==
// =========================================================================

/// # ScenarioConfig
/// The Bevy resource holding everything parsed from a `scenario.toml` file.
#[derive(Resource, Debug, Deserialize, Default, Clone)]
#[serde(deny_unknown_fields)] // Fail if the TOML has fields not in our struct
pub struct ScenarioConfig {
    #[serde(default)] // Use default if the [production] section is missing
    pub production: ProductionConfig,

    #[serde(default)]
    pub unit: UnitConfig,

    // The TOML has `[[towers]]`, which becomes a Vec of TowerConfig structs.
    #[serde(default)]
    pub towers: Vec<TowerConfig>,

    #[serde(default)]
    pub roads: Vec<RoadConfig>,

    #[serde(default)]
    pub obstacles: Vec<ObstacleConfig>,
}

impl ScenarioConfig {
    /// Combines the `[production]` and `[unit]` sections into the parameters
    /// the core search runs with.
    pub fn production_params(&self) -> ProductionParams {
        let p = &self.production;
        ProductionParams {
            unit_spacing: p.unit_spacing,
            detection_radius: p.detection_radius,
            unit_count: p.unit_count,
            clearance_radius: p.clearance_radius,
            ray_max_distance: p.ray_max_distance,
            ray_start_height: p.ray_start_height,
            fallback_rings: p.fallback_rings,
            unit_height_offset: self.unit.height as f64,
        }
    }
}

// =========================================================================
// == Configuration Sub-Structs ==
// =========================================================================

/// The `[production]` section. Every field is optional.
#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields, default)]
pub struct ProductionConfig {
    pub unit_spacing: f64,
    pub detection_radius: f64,
    pub unit_count: usize,
    pub clearance_radius: f64,
    pub ray_max_distance: f64,
    pub ray_start_height: f64,
    pub fallback_rings: usize,
}

impl Default for ProductionConfig {
    fn default() -> Self {
        let d = ProductionParams::default();
        Self {
            unit_spacing: d.unit_spacing,
            detection_radius: d.detection_radius,
            unit_count: d.unit_count,
            clearance_radius: d.clearance_radius,
            ray_max_distance: d.ray_max_distance,
            ray_start_height: d.ray_start_height,
            fallback_rings: d.fallback_rings,
        }
    }
}

/// The `[unit]` section: the shape of every produced unit.
#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields, default)]
pub struct UnitConfig {
    /// Vertical extent. Units are raised this far above the road position.
    pub height: f32,
    /// Half of the unit's footprint width.
    pub radius: f32,
}

impl Default for UnitConfig {
    fn default() -> Self {
        Self {
            height: 1.0,
            radius: 0.3,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct TowerConfig {
    pub name: String,
    pub position: [f32; 3],
}

/// An axis-aligned road box.
#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct RoadConfig {
    pub name: String,
    /// Center of the box.
    pub position: [f32; 3],
    /// Full edge lengths along X, Y and Z.
    pub size: [f32; 3],
}

/// A spherical enemy or other unit already standing in the scene.
#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct ObstacleConfig {
    pub name: String,
    pub position: [f32; 3],
    pub radius: f32,
}

// --- Helpers ---

impl TowerConfig {
    pub fn translation(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }
}

impl RoadConfig {
    pub fn translation(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }

    pub fn extents(&self) -> Vec3 {
        Vec3::from_array(self.size)
    }
}

impl ObstacleConfig {
    pub fn translation(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }
}
