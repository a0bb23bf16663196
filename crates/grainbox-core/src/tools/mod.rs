//! Brush tools and emitters - the external input that mutates the grid
//! between simulation steps

mod emitter;
mod erase;
mod pen;

pub use emitter::Emitter;
pub use erase::EraseTool;
pub use pen::PenTool;

use bresenham::Bresenham;
use glam::IVec2;
use grainbox_simulation::GrainRng;

use crate::world::{Grid, NeighborQueries};

/// A brush applied at a grid position
pub trait Tool {
    fn name(&self) -> &str;

    /// Apply the tool centered on `center`; cells outside the grid are skipped
    fn apply(&self, grid: &mut Grid, center: IVec2, brush_size: u32, rng: &mut dyn GrainRng);

    /// Apply the tool at every cell of the line `from..=to`, like a mouse drag
    fn stroke(
        &self,
        grid: &mut Grid,
        from: IVec2,
        to: IVec2,
        brush_size: u32,
        rng: &mut dyn GrainRng,
    ) {
        for point in line(from, to) {
            self.apply(grid, point, brush_size, rng);
        }
    }
}

/// Cells on the line between two points, both endpoints included
pub fn line(from: IVec2, to: IVec2) -> Vec<IVec2> {
    let start = (from.x as isize, from.y as isize);
    let end = (to.x as isize, to.y as isize);
    // Bresenham stops short of the end point
    let mut points: Vec<IVec2> = Bresenham::new(start, end)
        .map(|(x, y)| IVec2::new(x as i32, y as i32))
        .collect();
    points.push(to);
    points
}

/// Cells covered by a round brush of `brush_size` diameter
///
/// A size of 0 or 1 covers just the center cell.
pub(crate) fn brush_cells(grid: &Grid, center: IVec2, brush_size: u32) -> Vec<(i32, i32)> {
    let radius = (brush_size / 2) as i32;
    NeighborQueries::cells_in_radius(grid, center.x, center.y, radius)
}
