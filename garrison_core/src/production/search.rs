// garrison_core/src/production/search.rs

use nalgebra::Vector3;

use crate::physics::PhysicsWorld;
use crate::production::params::ProductionParams;
use crate::production::validator::{validate_spawn_position, SpawnRejection};
use crate::types::Position;

/// Axis along which slots are laid out.
pub fn lateral_axis() -> Vector3<f64> {
    Vector3::x()
}

/// Axis of the fallback search, perpendicular to `lateral_axis`. "Forward" is +Z.
pub fn forward_axis() -> Vector3<f64> {
    Vector3::z()
}

/// The candidates of one slot, in the order they are tried:
/// primary, forward(1), backward(1), forward(2), backward(2), ...
pub fn slot_candidates(
    base: &Position,
    slot: usize,
    spacing: f64,
    fallback_rings: usize,
) -> Vec<Position> {
    let primary = base + lateral_axis() * (slot as f64 * spacing);
    std::iter::once(primary)
        .chain((1..=fallback_rings).flat_map(|ring| {
            let step = forward_axis() * (ring as f64 * spacing);
            [primary + step, primary - step]
        }))
        .collect()
}

/// The full record of one slot's search.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SlotSearch {
    pub slot: usize,
    /// Candidates that failed validation, in the order they were tried.
    pub rejected: Vec<(Position, SpawnRejection)>,
    /// The first valid candidate, if any.
    pub chosen: Option<Position>,
}

impl SlotSearch {
    /// Number of candidates validated before the search stopped.
    pub fn candidates_tried(&self) -> usize {
        self.rejected.len() + usize::from(self.chosen.is_some())
    }
}

/// Runs the bounded search for `slot` and records every rejection.
pub fn search_spawn_position<W: PhysicsWorld + ?Sized>(
    world: &W,
    base: &Position,
    slot: usize,
    params: &ProductionParams,
) -> SlotSearch {
    let mut search = SlotSearch {
        slot,
        ..Default::default()
    };

    for candidate in slot_candidates(base, slot, params.unit_spacing, params.fallback_rings) {
        match validate_spawn_position(world, &candidate, params) {
            Ok(()) => {
                search.chosen = Some(candidate);
                break;
            }
            Err(rejection) => search.rejected.push((candidate, rejection)),
        }
    }
    search
}

/// Returns the first valid candidate for `slot`, or `None` if all of them fail.
pub fn find_spawn_position<W: PhysicsWorld + ?Sized>(
    world: &W,
    base: &Position,
    slot: usize,
    params: &ProductionParams,
) -> Option<Position> {
    search_spawn_position(world, base, slot, params).chosen
}
