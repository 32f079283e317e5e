// garrison_sim/src/simulation/core/events.rs
use bevy::prelude::{Entity, Event};
// Import the pure result types from the core library
use garrison_core::production::{ProductionError, ProductionReport};

/// Ask `tower` to produce a batch of units.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProduceUnitsRequested {
    pub tower: Entity,
}

/// Ask `tower` to upgrade itself.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpgradeTowerRequested {
    pub tower: Entity,
}

/// Emitted once per handled `ProduceUnitsRequested`.
#[derive(Event, Debug, Clone)]
pub struct ProductionFinished {
    pub tower: Entity,
    pub result: Result<ProductionReport, ProductionError>,
}

impl ProductionFinished {
    /// Number of units the run placed.
    pub fn placed(&self) -> usize {
        self.result
            .as_ref()
            .map(|report| report.placements.len())
            .unwrap_or(0)
    }
}
