// garrison_sim/src/simulation/core/spawn_requests.rs
use crate::simulation::config::{ObstacleConfig, RoadConfig, TowerConfig};
use bevy::prelude::Component;

#[derive(Component, Clone)]
pub struct SpawnTowerRequest(pub TowerConfig);

#[derive(Component, Clone)]
pub struct SpawnRoadRequest(pub RoadConfig);

#[derive(Component, Clone)]
pub struct SpawnObstacleRequest(pub ObstacleConfig);
