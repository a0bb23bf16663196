use grainbox_simulation::{Grain, GrainRng, MaterialKind};
use serde::{Deserialize, Serialize};

use crate::world::Grid;

/// Per-frame "rain": drops `rate` grains at random columns of one row
///
/// Columns are drawn from `[min_x, max_x)`. Drops overwrite whatever is in
/// the target cell; a drop that lands outside the grid is discarded.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Emitter {
    pub kind: MaterialKind,
    #[serde(default = "default_rate")]
    pub rate: u32,
    #[serde(default)]
    pub row: i32,
    pub min_x: i32,
    pub max_x: i32,
}

fn default_rate() -> u32 {
    1
}

impl Emitter {
    pub fn new(kind: MaterialKind, rate: u32, row: i32, min_x: i32, max_x: i32) -> Self {
        Self {
            kind,
            rate,
            row,
            min_x,
            max_x,
        }
    }

    /// Drop this frame's grains; returns how many landed in the grid
    pub fn emit<R: GrainRng + ?Sized>(&self, grid: &mut Grid, rng: &mut R) -> usize {
        let mut placed = 0;
        for _ in 0..self.rate {
            let x = rng.int(self.min_x, self.max_x);
            let grain = Grain::spawn(self.kind, rng);
            if grid.try_put(x, self.row, Some(grain)).is_ok() {
                placed += 1;
            }
        }
        placed
    }
}
