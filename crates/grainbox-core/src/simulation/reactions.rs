//! Reactive spread: combustion, melting and corrosion
//!
//! Each check probes the four orthogonal neighbors (S, N, E, W) and rolls
//! the neighbor's own rate. Grains created here are born already marked as
//! updated, so a cell is transformed at most once per frame.

use grainbox_simulation::{Grain, GrainRng, MaterialDef, MaterialKind, Transition};

use crate::world::{Grid, NeighborQueries, SimStats};

/// Handles neighbor transformations triggered by reactive grains
pub struct ReactionSystem;

impl ReactionSystem {
    /// Ignite flammable neighbors; returns true if any caught fire
    pub fn set_on_fire<R: GrainRng + ?Sized>(
        grid: &mut Grid,
        x: i32,
        y: i32,
        rng: &mut R,
        stats: &mut dyn SimStats,
    ) -> bool {
        Self::spread(grid, x, y, rng, stats, |def| def.burns)
    }

    /// Melt meltable neighbors; returns true if any melted
    pub fn melt<R: GrainRng + ?Sized>(
        grid: &mut Grid,
        x: i32,
        y: i32,
        rng: &mut R,
        stats: &mut dyn SimStats,
    ) -> bool {
        Self::spread(grid, x, y, rng, stats, |def| def.melts)
    }

    /// Dissolve corrodable neighbors; returns true if any were destroyed
    pub fn corrode<R: GrainRng + ?Sized>(
        grid: &mut Grid,
        x: i32,
        y: i32,
        rng: &mut R,
        stats: &mut dyn SimStats,
    ) -> bool {
        let mut any = false;
        for (nx, ny, kind) in NeighborQueries::orthogonal_kinds(grid, x, y) {
            let Some(kind) = kind else { continue };
            let rate = kind.def().corrodability;
            if rate > 0.0 && rng.chance(rate) {
                grid.put(nx, ny, None);
                stats.record_destroyed();
                any = true;
            }
        }
        any
    }

    /// Replace the grain at `(x, y)`; the newcomer is marked updated
    pub fn replace_with<R: GrainRng + ?Sized>(
        grid: &mut Grid,
        x: i32,
        y: i32,
        into: Option<MaterialKind>,
        rng: &mut R,
        stats: &mut dyn SimStats,
    ) {
        match into {
            Some(kind) => {
                let mut grain = Grain::spawn(kind, rng);
                grain.mark_updated();
                grid.put(x, y, Some(grain));
                stats.record_transition();
            }
            None => {
                grid.put(x, y, None);
                stats.record_destroyed();
            }
        }
    }

    fn spread<R, F>(
        grid: &mut Grid,
        x: i32,
        y: i32,
        rng: &mut R,
        stats: &mut dyn SimStats,
        transition: F,
    ) -> bool
    where
        R: GrainRng + ?Sized,
        F: Fn(&MaterialDef) -> Option<Transition>,
    {
        let mut any = false;
        for (nx, ny, kind) in NeighborQueries::orthogonal_kinds(grid, x, y) {
            let Some(t) = kind.and_then(|k| transition(k.def())) else {
                continue;
            };
            if rng.chance(t.rate) {
                log::trace!("({nx}, {ny}) {} -> {}", kind.map_or("?", |k| k.name()), t.into);
                Self::replace_with(grid, nx, ny, Some(t.into), rng, stats);
                any = true;
            }
        }
        any
    }
}
