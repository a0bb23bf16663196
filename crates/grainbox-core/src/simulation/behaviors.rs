//! Per-material frame rules
//!
//! One function per material, dispatched by an exhaustive `match` on the
//! kind. Every rule works from the grain's starting cell: fallbacks only run
//! after the preceding move failed, so `(x, y)` is still where the grain is.
//! Direction tie-breaks always cost exactly one `chance(0.5)` draw.

use grainbox_simulation::{GrainRng, MaterialKind};

use super::{MovementSystem, ReactionSystem};
use crate::world::{Grid, NeighborQueries, SimStats};

/// Dispatches a grain's per-frame behavior
pub struct BehaviorSystem;

/// Shorthand for the arguments every rule threads through
struct Cell<'a, R: ?Sized> {
    grid: &'a mut Grid,
    x: i32,
    y: i32,
    rng: &'a mut R,
    stats: &'a mut dyn SimStats,
}

impl<R: GrainRng + ?Sized> Cell<'_, R> {
    fn go(&mut self, dx: i32, dy: i32, steps: u32) -> bool {
        MovementSystem::try_move_in_direction(self.grid, self.x, self.y, dx, dy, steps, self.stats)
    }

    fn chance(&mut self, probability: f64) -> bool {
        self.rng.chance(probability)
    }

    /// -1 or +1 from a single fair draw
    fn side(&mut self) -> i32 {
        if self.rng.chance(0.5) { -1 } else { 1 }
    }

    fn replace_with(&mut self, into: Option<MaterialKind>) {
        ReactionSystem::replace_with(self.grid, self.x, self.y, into, self.rng, self.stats);
    }

    fn set_on_fire(&mut self) -> bool {
        ReactionSystem::set_on_fire(self.grid, self.x, self.y, self.rng, self.stats)
    }

    fn melt(&mut self) -> bool {
        ReactionSystem::melt(self.grid, self.x, self.y, self.rng, self.stats)
    }

    fn corrode(&mut self) -> bool {
        ReactionSystem::corrode(self.grid, self.x, self.y, self.rng, self.stats)
    }

    /// Fall `down` cells; otherwise slide diagonally `diagonal` cells
    fn fall(&mut self, down: u32, diagonal: u32) {
        if !self.go(0, 1, down) {
            let side = self.side();
            self.go(side, 1, diagonal);
        }
    }

    /// Fall `down`; otherwise diagonal, and failing that spread sideways
    fn flow(&mut self, down: u32, diagonal: u32, horizontal: u32) {
        if !self.go(0, 1, down) {
            self.slide(1, diagonal, horizontal);
        }
    }

    /// Diagonal towards `dy` on a random side, then horizontal on the same side
    fn slide(&mut self, dy: i32, diagonal: u32, horizontal: u32) {
        let side = self.side();
        if !self.go(side, dy, diagonal) {
            self.go(side, 0, horizontal);
        }
    }

    /// One cell left or right
    fn drift(&mut self) {
        let side = self.side();
        self.go(side, 0, 1);
    }

    /// Gas motion: frequent sideways drift, otherwise rise one cell
    fn rise(&mut self) {
        if self.chance(0.5) {
            self.drift();
            return;
        }
        if !self.go(0, -1, 1) {
            self.slide(-1, 1, 1);
        }
    }
}

impl BehaviorSystem {
    /// Run one tick of the grain at `(x, y)`
    ///
    /// Empty cells are ignored. The grain may move, transform itself or its
    /// neighbors, and draw from `rng`; it never touches cells beyond its
    /// movement ray and orthogonal neighbors.
    pub fn do_frame<R: GrainRng + ?Sized>(
        grid: &mut Grid,
        x: i32,
        y: i32,
        rng: &mut R,
        stats: &mut dyn SimStats,
    ) {
        let Some(kind) = grid.get(x, y).map(|g| g.kind) else {
            return;
        };
        let mut cell = Cell {
            grid,
            x,
            y,
            rng,
            stats,
        };

        match kind {
            MaterialKind::Sand => cell.fall(1, 1),
            MaterialKind::FineSand => fine_sand(&mut cell),
            MaterialKind::Water | MaterialKind::Oil => cell.flow(3, 5, 6),
            MaterialKind::Wood | MaterialKind::Rock | MaterialKind::Fuse => {}
            MaterialKind::Fire => fire(&mut cell),
            MaterialKind::Smoke => smoke(&mut cell),
            MaterialKind::Steam => steam(&mut cell),
            MaterialKind::Ice => ice(&mut cell),
            MaterialKind::Snow => snow(&mut cell),
            MaterialKind::Lava => lava(&mut cell),
            MaterialKind::Stone => cell.fall(5, 2),
            MaterialKind::Brick => {
                cell.go(0, 1, 5);
            }
            MaterialKind::Gunpowder => cell.fall(4, 2),
            MaterialKind::Acid => acid(&mut cell),
            MaterialKind::Void => void(&mut cell),
        }
    }
}

fn fine_sand<R: GrainRng + ?Sized>(cell: &mut Cell<'_, R>) {
    if !cell.go(0, 1, 4) {
        let side = cell.side();
        if !cell.go(side, 1, 2) {
            cell.go(2 * side, 1, 2);
        }
    }
}

fn fire<R: GrainRng + ?Sized>(cell: &mut Cell<'_, R>) {
    if cell.chance(0.02) {
        cell.replace_with(Some(MaterialKind::Smoke));
        return;
    }
    if cell.melt() && cell.chance(0.5) {
        cell.replace_with(Some(MaterialKind::Smoke));
        return;
    }
    cell.set_on_fire();
    if cell.chance(0.6) {
        cell.drift();
        return;
    }
    cell.fall(1, 1);
}

fn smoke<R: GrainRng + ?Sized>(cell: &mut Cell<'_, R>) {
    if cell.chance(0.001) {
        cell.replace_with(None);
        return;
    }
    if cell.chance(0.15) {
        cell.melt();
    }
    cell.rise();
}

fn steam<R: GrainRng + ?Sized>(cell: &mut Cell<'_, R>) {
    if cell.chance(0.0001) {
        let into = if cell.chance(0.2) {
            Some(MaterialKind::Water)
        } else {
            None
        };
        cell.replace_with(into);
        return;
    }
    cell.rise();
}

fn ice<R: GrainRng + ?Sized>(cell: &mut Cell<'_, R>) {
    if cell.chance(0.000003) {
        cell.replace_with(Some(MaterialKind::Water));
    }
}

fn snow<R: GrainRng + ?Sized>(cell: &mut Cell<'_, R>) {
    if cell.chance(0.000006) {
        cell.replace_with(Some(MaterialKind::Water));
        return;
    }
    cell.fall(1, 1);
}

fn lava<R: GrainRng + ?Sized>(cell: &mut Cell<'_, R>) {
    cell.set_on_fire();
    if !cell.go(0, 1, 4) {
        // Viscous: mostly sits still once it lands
        if cell.chance(0.8) {
            return;
        }
        cell.slide(1, 1, 1);
    }
}

fn acid<R: GrainRng + ?Sized>(cell: &mut Cell<'_, R>) {
    if cell.corrode() && cell.chance(0.3) {
        cell.replace_with(None);
        return;
    }
    cell.flow(3, 2, 3);
}

fn void<R: GrainRng + ?Sized>(cell: &mut Cell<'_, R>) {
    let (x, y) = (cell.x, cell.y);
    if let Some(grain) = cell.grid.get_mut(x, y) {
        grain.recolor([true, false, true], cell.rng);
    }
    for (nx, ny, kind) in NeighborQueries::orthogonal_kinds(cell.grid, x, y) {
        if kind.is_some_and(|k| k != MaterialKind::Void) {
            cell.grid.put(nx, ny, None);
            cell.stats.record_destroyed();
        }
    }
}
