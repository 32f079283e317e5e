// garrison_core/src/production/mod.rs

//! Placing a batch of units next to the road nearest to a producer.
//!
//! A run goes: find the nearest road (`locator`), then for each slot search
//! a fixed sequence of candidates (`search`) until one passes the checks in
//! `validator`. The first slot without a valid candidate ends the run.

pub mod locator;
pub mod params;
pub mod search;
pub mod validator;

use thiserror::Error;

use crate::physics::PhysicsWorld;
use crate::types::{Position, RoadCandidate};

pub use locator::nearest_road;
pub use params::{ParamsError, ProductionParams};
pub use search::{find_spawn_position, search_spawn_position, SlotSearch};
pub use validator::{is_spawn_position_valid, validate_spawn_position, SpawnRejection};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProductionError {
    #[error("no road found within {radius} of the producer")]
    NoRoadNearby { radius: f64 },
    #[error("no valid spawn position found for unit in slot {slot}")]
    NoValidSpawnPosition { slot: usize },
    #[error("invalid production parameters: {0}")]
    InvalidParams(#[from] ParamsError),
}

/// A unit that was placed during a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub slot: usize,
    pub position: Position,
    /// How many candidates the slot's search validated, including the chosen one.
    pub candidates_tried: usize,
}

/// What a production run did.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductionReport {
    pub road: RoadCandidate,
    /// Placements in slot order.
    pub placements: Vec<Placement>,
    /// Search traces of every slot that was attempted, in slot order.
    pub searches: Vec<SlotSearch>,
    /// Set when a slot had no valid candidate and the run stopped there.
    pub halted: Option<ProductionError>,
}

impl ProductionReport {
    pub fn is_complete(&self) -> bool {
        self.halted.is_none()
    }

    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.placements.iter().map(|p| p.position)
    }
}

/// Runs one production batch for a producer standing at `origin`.
///
/// `spawn` is called once per placement, in slot order, as soon as the slot's
/// position is known. Units spawned this way are not visible to the searches
/// of later slots in the same run; every slot has its own lateral offset, so
/// two slots never resolve to the same point.
///
/// Returns `Err(ProductionError::InvalidParams)` if `params` fail
/// `ProductionParams::validate`, and `Err(ProductionError::NoRoadNearby)` if
/// there is no road in range. Neither calls `spawn`. A slot without a valid position does not make
/// the run fail: the report records it in `halted` and the remaining slots
/// are never searched.
pub fn produce_units<W, F>(
    world: &W,
    origin: &Position,
    params: &ProductionParams,
    mut spawn: F,
) -> Result<ProductionReport, ProductionError>
where
    W: PhysicsWorld + ?Sized,
    F: FnMut(&Placement),
{
    params.validate()?;

    let road = nearest_road(
        world,
        origin,
        params.detection_radius,
        params.unit_height_offset,
    )
    .ok_or(ProductionError::NoRoadNearby {
        radius: params.detection_radius,
    })?;

    let mut report = ProductionReport {
        road,
        placements: Vec::with_capacity(params.unit_count),
        searches: Vec::with_capacity(params.unit_count),
        halted: None,
    };

    for slot in 0..params.unit_count {
        let search = search_spawn_position(world, &road.spawn_base, slot, params);
        let chosen = search.chosen;
        let candidates_tried = search.candidates_tried();
        report.searches.push(search);

        let Some(position) = chosen else {
            report.halted = Some(ProductionError::NoValidSpawnPosition { slot });
            break;
        };

        let placement = Placement {
            slot,
            position,
            candidates_tried,
        };
        spawn(&placement);
        report.placements.push(placement);
    }

    Ok(report)
}
