//! PowderWorld - owns the grid and drives the per-frame simulation step

use std::collections::BTreeMap;

use grainbox_simulation::{GrainRng, MaterialKind};

use super::{Grid, SimStats};
use crate::simulation::BehaviorSystem;

/// The falling-sand world: a grid plus a frame counter
///
/// External input (tools, emitters, scenario setup) mutates the grid through
/// [`grid_mut`](Self::grid_mut) between calls to [`step`](Self::step); the
/// step itself is the only writer while it runs.
#[derive(Clone, Debug)]
pub struct PowderWorld {
    grid: Grid,
    frame: u64,
}

impl PowderWorld {
    /// Create an empty world; panics on a zero dimension
    pub fn new(width: usize, height: usize) -> Self {
        Self::from_grid(Grid::new(width, height))
    }

    pub fn from_grid(grid: Grid) -> Self {
        Self { grid, frame: 0 }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    /// Number of completed steps
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Advance the world by one frame
    ///
    /// Unmark: every grain loses its UPDATED flag and ages by one.
    /// Move: cells are visited column by column (x outer, y inner, top row
    /// first). An unmarked grain is marked and then runs its rule, so the
    /// mark travels with it wherever it ends up. Passes repeat until one
    /// finds nothing left to process, which picks up grains pushed back into
    /// cells the scan had already passed.
    pub fn step<R: GrainRng + ?Sized>(&mut self, rng: &mut R, stats: &mut dyn SimStats) {
        for grain in self.grid.grains_mut() {
            grain.clear_updated();
            grain.age = grain.age.saturating_add(1);
        }

        let mut passes = 0u32;
        loop {
            let processed = self.move_pass(rng, stats);
            passes += 1;
            if processed == 0 {
                break;
            }
            log::trace!("frame {} pass {passes}: {processed} grains", self.frame);
        }

        self.frame += 1;
        if passes > 2 {
            log::debug!("frame {} needed {passes} passes", self.frame);
        }
    }

    fn move_pass<R: GrainRng + ?Sized>(&mut self, rng: &mut R, stats: &mut dyn SimStats) -> usize {
        let width = self.grid.width() as i32;
        let height = self.grid.height() as i32;
        let mut processed = 0;

        for x in 0..width {
            for y in 0..height {
                let Some(grain) = self.grid.get_mut(x, y) else {
                    continue;
                };
                if grain.is_updated() {
                    continue;
                }
                grain.mark_updated();

                BehaviorSystem::do_frame(&mut self.grid, x, y, rng, stats);
                stats.record_grain_processed();
                processed += 1;
            }
        }

        processed
    }

    /// Grain counts per material, omitting materials with no grains
    pub fn population(&self) -> BTreeMap<MaterialKind, usize> {
        let mut counts = BTreeMap::new();
        for (_, _, grain) in self.grid.iter() {
            *counts.entry(grain.kind).or_insert(0) += 1;
        }
        counts
    }
}
