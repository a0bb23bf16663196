use glam::IVec2;
use grainbox_simulation::{Grain, GrainRng, MaterialKind};

use super::{Tool, brush_cells};
use crate::world::Grid;

/// Paints freshly spawned grains of one material, overwriting whatever is there
#[derive(Clone, Copy, Debug)]
pub struct PenTool {
    pub kind: MaterialKind,
}

impl PenTool {
    pub fn new(kind: MaterialKind) -> Self {
        Self { kind }
    }
}

impl Tool for PenTool {
    fn name(&self) -> &str {
        self.kind.name()
    }

    fn apply(&self, grid: &mut Grid, center: IVec2, brush_size: u32, rng: &mut dyn GrainRng) {
        let cells = brush_cells(grid, center, brush_size);
        log::trace!("pen {} at {center}: {} cells", self.kind, cells.len());
        for (x, y) in cells {
            grid.put(x, y, Some(Grain::spawn(self.kind, rng)));
        }
    }
}
