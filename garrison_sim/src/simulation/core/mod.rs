// garrison_sim/src/simulation/core/mod.rs

pub mod app_state;
pub mod collision_layers;
pub mod components;
pub mod events;
pub mod simulation_setup;
pub mod spawn_requests;
pub mod transforms;
