// garrison_sim/src/prelude.rs

// Re-export the entire Bevy prelude for convenience.
pub use bevy::prelude::*;

// Re-export the garrison_core prelude so the pure types like `Position`,
// `ProductionParams` and `PhysicsWorld` are easy to reach.
pub use garrison_core::prelude::*;

// Re-export common simulation-specific types for easy access in other plugins.
pub use crate::simulation::config::{ProductionSettings, ScenarioConfig};
pub use crate::simulation::core::app_state::{AppState, ProductionSet, SceneBuildSet};
pub use crate::simulation::core::components::{Obstacle, ProducedUnit, Road, Tower};
pub use crate::simulation::core::events::{
    ProduceUnitsRequested, ProductionFinished, UpgradeTowerRequested,
};
