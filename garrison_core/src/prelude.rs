// garrison_core/src/prelude.rs

// --- Core Abstractions (The main contracts of the library) ---
pub use crate::physics::{PhysicsWorld, WithPendingUnits};
pub use crate::types::{ColliderHandle, ColliderHit, Position, RayHit, RoadCandidate, SurfaceLayer};

// --- Production Logic ---
pub use crate::production::{
    produce_units, Placement, ProductionError, ProductionParams, ProductionReport, SpawnRejection,
};

// --- In-memory scene for tests and dry runs ---
pub use crate::scene::StaticScene;
