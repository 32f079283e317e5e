// garrison_sim/src/simulation/core/collision_layers.rs

use avian3d::prelude::{CollisionLayers, LayerMask, PhysicsLayer};
use garrison_core::types::SurfaceLayer;

/// The physics layers of the scene. Spatial queries filter on these.
#[derive(PhysicsLayer, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GameLayer {
    /// Towers and everything else that is neither road nor unit.
    #[default]
    Default,
    Road,
    Unit,
}

impl From<SurfaceLayer> for GameLayer {
    fn from(layer: SurfaceLayer) -> Self {
        match layer {
            SurfaceLayer::Road => GameLayer::Road,
            SurfaceLayer::Unit => GameLayer::Unit,
        }
    }
}

/// Roads are hit by everything.
pub fn road_layers() -> CollisionLayers {
    CollisionLayers::new(GameLayer::Road, LayerMask::ALL)
}

/// Produced units, enemies and other obstacles.
pub fn unit_layers() -> CollisionLayers {
    CollisionLayers::new(GameLayer::Unit, LayerMask::ALL)
}

pub fn structure_layers() -> CollisionLayers {
    CollisionLayers::new(GameLayer::Default, LayerMask::ALL)
}
