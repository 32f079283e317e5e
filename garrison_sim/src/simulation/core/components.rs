// garrison_sim/src/simulation/core/components.rs

use bevy::prelude::{Component, Entity};

/// A unit producer. Buttons and keyboard shortcuts address towers.
#[derive(Component, Debug, Default)]
pub struct Tower;

/// A road collider that units can be placed on.
#[derive(Component, Debug, Default)]
pub struct Road;

/// An enemy or other obstacle that was part of the scenario.
#[derive(Component, Debug, Default)]
pub struct Obstacle;

/// A unit spawned by a production run.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProducedUnit {
    /// The tower whose run placed this unit.
    pub producer: Entity,
    /// The slot of the run it filled.
    pub slot: usize,
}
