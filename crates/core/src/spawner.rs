//! Item spawner - placement policy for new collectibles.

use std::time::Duration;

use crate::rng::SimpleRng;
use crate::types::SPAWN_RETRY_BUDGET;
use crate::world::World;

/// Stateless spawn policy: a capacity cap and a bounded number of placement samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemSpawner {
    cap: usize,
    retry_budget: u32,
}

impl ItemSpawner {
    pub fn new(cap: usize) -> Self {
        Self {
            cap,
            retry_budget: SPAWN_RETRY_BUDGET,
        }
    }

    pub fn with_retry_budget(mut self, retry_budget: u32) -> Self {
        self.retry_budget = retry_budget;
        self
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    /// Try to place one item at a uniformly sampled free interior cell.
    ///
    /// Returns `false` without touching the world when the cap is reached or no
    /// free cell was hit within the retry budget; the caller tries again later.
    pub fn try_spawn(&self, world: &mut World, rng: &mut SimpleRng, now: Duration) -> bool {
        if world.active_item_count() >= self.cap {
            return false;
        }
        let n = world.grid_size();
        for _ in 0..self.retry_budget {
            let cell = rng.interior_cell(n);
            if world.is_free_for_item(cell) {
                return world.place_item(cell, now);
            }
        }
        false
    }
}
