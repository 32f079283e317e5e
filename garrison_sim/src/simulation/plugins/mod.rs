// garrison_sim/src/simulation/plugins/mod.rs

pub mod production;
pub mod ui;
pub mod world;
