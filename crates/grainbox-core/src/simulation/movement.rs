//! Grain movement primitives

use crate::world::{Grid, SimStats};

/// Movement physics - every relocation in the simulation goes through here
pub struct MovementSystem;

impl MovementSystem {
    /// Try to move the grain at `(x, y)` into `(tx, ty)`
    ///
    /// Succeeds when the target is inside the grid and either empty or
    /// displaceable per [`Grain::can_swap`](grainbox_simulation::Grain::can_swap).
    /// The two cells are swapped, so a displaced grain ends up at `(x, y)`.
    pub fn try_move_to(
        grid: &mut Grid,
        x: i32,
        y: i32,
        tx: i32,
        ty: i32,
        stats: &mut dyn SimStats,
    ) -> bool {
        if !grid.in_range(tx, ty) {
            return false;
        }
        let Some(mover) = grid.get(x, y) else {
            return false;
        };
        if !mover.can_swap(grid.get(tx, ty), ty == y) {
            return false;
        }

        grid.swap((x, y), (tx, ty));
        stats.record_grain_moved();
        true
    }

    /// Walk up to `steps` cells along `(dx, dy)`, stopping at the first block
    ///
    /// Returns true if at least one step succeeded. This is how materials get
    /// distinct fall speeds without a velocity field.
    pub fn try_move_in_direction(
        grid: &mut Grid,
        x: i32,
        y: i32,
        dx: i32,
        dy: i32,
        steps: u32,
        stats: &mut dyn SimStats,
    ) -> bool {
        let (mut cx, mut cy) = (x, y);
        let mut moved = false;

        for _ in 0..steps {
            if !Self::try_move_to(grid, cx, cy, cx + dx, cy + dy, stats) {
                break;
            }
            cx += dx;
            cy += dy;
            moved = true;
        }

        moved
    }
}
