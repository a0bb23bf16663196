use glam::IVec2;
use grainbox_simulation::GrainRng;

use super::{Tool, brush_cells};
use crate::world::Grid;

/// Clears every cell under the brush
#[derive(Clone, Copy, Debug, Default)]
pub struct EraseTool;

impl Tool for EraseTool {
    fn name(&self) -> &str {
        "Erase"
    }

    fn apply(&self, grid: &mut Grid, center: IVec2, brush_size: u32, _rng: &mut dyn GrainRng) {
        for (x, y) in brush_cells(grid, center, brush_size) {
            grid.put(x, y, None);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::PenTool;
    use grainbox_simulation::{MaterialKind, ReplayRng};

    #[test]
    fn test_erase_clears_circle() {
        let mut grid = Grid::new(10, 10);
        let mut rng = ReplayRng::always();
        PenTool::new(MaterialKind::Sand).apply(&mut grid, IVec2::new(5, 5), 6, &mut rng);
        let painted = grid.occupied();

        EraseTool.apply(&mut grid, IVec2::new(5, 5), 2, &mut rng);
        assert_eq!(grid.occupied(), painted - 5);
        assert!(grid.get(5, 5).is_none());
        assert!(grid.get(5, 8).is_some());
    }

    #[test]
    fn test_erase_empty_and_off_grid() {
        let mut grid = Grid::new(3, 3);
        EraseTool.apply(&mut grid, IVec2::new(1, 1), 4, &mut ReplayRng::always());
        EraseTool.apply(&mut grid, IVec2::new(50, 50), 4, &mut ReplayRng::always());
        assert!(grid.is_empty());
    }
}
