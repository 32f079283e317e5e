// garrison_sim/src/simulation/core/simulation_setup.rs

use crate::prelude::*;
use crate::simulation::core::events::{
    ProduceUnitsRequested, ProductionFinished, UpgradeTowerRequested,
};

pub struct SimulationSetupPlugin;

impl Plugin for SimulationSetupPlugin {
    fn build(&self, app: &mut App) {
        // --- INITIALIZE STATE & EVENTS ---
        app.init_state::<AppState>()
            .add_event::<ProduceUnitsRequested>()
            .add_event::<UpgradeTowerRequested>()
            .add_event::<ProductionFinished>();

        // --- CONFIGURE THE SPAWNING PIPELINE ---
        // This chain of SystemSets guarantees the correct spawning order.
        app.configure_sets(
            OnEnter(AppState::SceneBuilding),
            (
                SceneBuildSet::CreateRequests,
                SceneBuildSet::Physics,
                SceneBuildSet::Visuals,
                SceneBuildSet::Cleanup,
            )
                .chain(),
        );

        app.add_systems(
            OnEnter(AppState::SceneBuilding),
            transition_to_running.after(SceneBuildSet::Cleanup),
        );

        // Configure the runtime schedule graph.
        app.configure_sets(
            Update,
            (
                ProductionSet::Input,
                ProductionSet::Execute,
                ProductionSet::Report,
            )
                .chain()
                .run_if(in_state(AppState::Running)),
        );
    }
}

fn transition_to_running(mut next_state: ResMut<NextState<AppState>>) {
    info!("Scene building complete. Transitioning to Running state.");
    next_state.set(AppState::Running);
}
