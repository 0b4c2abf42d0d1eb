//! Generation driver
//!
//! The driver runs the two-phase step: every interior cell's `next` state is computed from
//! committed `current` states only, then the whole grid is committed at once. The rule
//! that decides individual transitions is supplied by the caller.

use crate::world::{CellState, Census, OccupantKind, World};
use anyhow::{Context, Result};
use tracing::{debug, info, instrument};

/// Decides what a cell becomes in the next generation.
///
/// Implementations must only look at committed state (`read_current`, `neighborhood`);
/// `next` states of other cells are not authoritative while a step is running.
pub trait TransitionRule {
    fn next_state(&self, world: &World, x: i32, y: i32) -> CellState;
}

/// Keeps every cell exactly as it is
#[derive(Debug, Clone, Copy, Default)]
pub struct HoldRule;

impl TransitionRule for HoldRule {
    fn next_state(&self, world: &World, x: i32, y: i32) -> CellState {
        world.read_current(x, y).unwrap_or(CellState::OBSTACLE)
    }
}

/// Drives a world through successive generations with a transition rule
pub struct Simulation<R: TransitionRule> {
    world: World,
    rule: R,
    generation: u32,
}

impl<R: TransitionRule> Simulation<R> {
    pub fn new(world: World, rule: R) -> Self {
        Self {
            world,
            rule,
            generation: 0,
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Number of generations committed so far
    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn into_world(self) -> World {
        self.world
    }

    /// Compute every interior `next` state, then commit
    pub fn step(&mut self) -> Result<()> {
        let coords: Vec<(i32, i32)> = self.world.interior_coords().collect();
        for (x, y) in coords {
            let current = self.world.read_current(x, y)?;
            let next = if current.kind() == OccupantKind::Obstacle {
                current
            } else {
                self.rule.next_state(&self.world, x, y)
            };
            self.world
                .write_next(x, y, next)
                .with_context(|| format!("Rule produced an unwritable cell at ({}, {})", x, y))?;
        }

        self.world.advance_generation();
        self.generation += 1;

        let census = self.world.census();
        debug!(
            generation = self.generation,
            prey = census.prey,
            predators = census.predators,
            "Generation committed"
        );
        Ok(())
    }

    /// Run for the number of generations configured in the world's parameters
    pub fn run(&mut self) -> Result<Census> {
        let generations = self.world.params().generations.max(0) as u32;
        self.run_for(generations)
    }

    #[instrument(skip(self), fields(rows = self.world.rows(), cols = self.world.cols()))]
    pub fn run_for(&mut self, generations: u32) -> Result<Census> {
        info!("Starting simulation for {} generations", generations);

        for _ in 0..generations {
            self.step()?;
        }

        let census = self.world.census();
        info!(
            generation = self.generation,
            prey = census.prey,
            predators = census.predators,
            obstacles = census.obstacles,
            "Simulation finished"
        );
        Ok(census)
    }
}
