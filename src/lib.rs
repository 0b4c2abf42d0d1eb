//! Predator/Prey Grid World
//!
//! A bordered 2-D grid of rocks, rabbits and foxes with a current/next state per cell,
//! plus a driver that advances the whole grid one generation at a time.

pub mod config;
pub mod simulation;
pub mod utils;
pub mod world;

pub use config::Settings;
pub use simulation::{HoldRule, Simulation, TransitionRule};
pub use world::{CellState, OccupantKind, World, WorldError, WorldParams};

use anyhow::Result;
use std::path::Path;

/// Load a world file and run it for its configured number of generations with `rule`
pub fn run_world_file<P: AsRef<Path>, R: TransitionRule>(path: P, rule: R) -> Result<World> {
    let world = world::load_world_from_file(path)?;
    let mut simulation = Simulation::new(world, rule);
    simulation.run()?;
    Ok(simulation.into_world())
}
