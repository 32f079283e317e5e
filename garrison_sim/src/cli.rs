use bevy::prelude::Resource;
use clap::Parser;
use std::path::PathBuf;

/// Garrison: towers that raise units along the nearest road.
///
/// This struct defines the command-line arguments that can be passed to any
/// binary application that uses the Garrison simulation library.
#[derive(Parser, Debug, Resource, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// The path to the scenario TOML file to run.
    #[arg(short, long, default_value = "assets/scenarios/crossroads.toml")]
    pub scenario: PathBuf,

    /// Run the simulation in headless mode (without a graphical window).
    #[arg(long, default_value_t = false)]
    pub headless: bool,

    /// Ask every tower for a batch of units shortly after the scene is built.
    #[arg(long, default_value_t = false)]
    pub auto_produce: bool,

    /// Run the production search once per tower against the scenario file
    /// alone, print the outcome, and exit without starting the engine.
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            scenario: PathBuf::from("assets/scenarios/crossroads.toml"),
            headless: false,
            auto_produce: false,
            dry_run: false,
        }
    }
}
