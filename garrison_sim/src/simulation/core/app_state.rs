// garrison_sim/src/simulation/core/app_state.rs

use bevy::{ecs::schedule::SystemSet, prelude::States};

/// Defines the major phases of the application's lifecycle.
#[derive(States, Debug, Clone, Eq, PartialEq, Hash, Default)]
pub enum AppState {
    /// The initial state. The scenario file is read here.
    #[default]
    Loading,

    /// The scenario is loaded. Roads, obstacles and towers are being spawned.
    SceneBuilding,

    /// The scene is built. Towers accept production and upgrade requests.
    Running,
}

/// System sets to control the order of execution during the SceneBuilding state.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SceneBuildSet {
    /// Pass 1: Create entity shells carrying the request components.
    CreateRequests,

    /// Pass 2: Attach colliders, rigid bodies and collision layers.
    Physics,

    /// Pass 3: Attach meshes and materials when a renderer is present.
    Visuals,

    /// Pass 4: Remove all temporary request components.
    Cleanup,
}

/// Runtime ordering of the production pipeline inside `Update`.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum ProductionSet {
    /// Systems that turn player input into request events.
    Input,
    /// Systems that answer requests: searching, spawning, upgrading.
    Execute,
    /// Systems that react to finished runs (status text, logs).
    Report,
}
