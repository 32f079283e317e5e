// garrison_core/src/lib.rs

// This file defines the public modules of the library.
pub mod physics;
pub mod prelude;
pub mod production;
pub mod scene;
pub mod types;
