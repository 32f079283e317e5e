// garrison_core/src/types.rs

use nalgebra::Vector3;

// --- Core Type Aliases ---
/// A point in world space. Y is up.
pub type Position = Vector3<f64>;

// --- Core Identifier ---
/// Opaque identifier of a collider owned by the physics collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ColliderHandle(pub u64);

impl ColliderHandle {
    // A convenience method for use in the Bevy adapter crate.
    #[cfg(feature = "bevy")] // This will only compile if the "bevy" feature is enabled
    pub fn from_entity(entity: bevy_ecs::prelude::Entity) -> Self {
        Self(entity.to_bits())
    }
}

/// The category a physics query is filtered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceLayer {
    /// Walkable road surfaces units are placed on.
    Road,
    /// Units and enemies. Anything that occupies space a new unit would need.
    Unit,
}

/// A collider returned by an overlap query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColliderHit {
    pub handle: ColliderHandle,
    /// World position of the collider's origin (not the closest point).
    pub position: Position,
}

/// The result of a single raycast against the physics collaborator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub handle: ColliderHandle,
    /// Distance along the ray to the hit point.
    pub distance: f64,
    pub point: Position,
}

/// A road collider chosen as the anchor of a production run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoadCandidate {
    pub handle: ColliderHandle,
    /// World position of the road collider.
    pub surface: Position,
    /// Distance from the producer to `surface`.
    pub distance: f64,
    /// `surface` raised by the unit's vertical extent. Slot 0 sits here.
    pub spawn_base: Position,
}
