//! Neighbor cell collection utilities

use super::Grid;
use grainbox_simulation::MaterialKind;

/// Orthogonal offsets in probe order: S, N, E, W
pub const ORTHOGONAL: [(i32, i32); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

/// Neighbor collection utilities - stateless methods for querying neighboring cells
pub struct NeighborQueries;

impl NeighborQueries {
    /// Materials of the 4 orthogonal neighbors, in `ORTHOGONAL` order
    ///
    /// Out-of-range neighbors and empty cells both read as `None`; the grid
    /// edge is never an error.
    pub fn orthogonal_kinds(grid: &Grid, x: i32, y: i32) -> [(i32, i32, Option<MaterialKind>); 4] {
        ORTHOGONAL.map(|(dx, dy)| {
            let (nx, ny) = (x + dx, y + dy);
            (nx, ny, grid.safe_get(nx, ny, None).map(|g| g.kind))
        })
    }

    /// Cells inside a circle of `radius` around the center, clipped to the grid
    ///
    /// Useful for brushes and area effects.
    pub fn cells_in_radius(grid: &Grid, center_x: i32, center_y: i32, radius: i32) -> Vec<(i32, i32)> {
        let mut cells = Vec::new();

        // Iterate over square containing circle
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                if dx * dx + dy * dy <= radius * radius {
                    let x = center_x + dx;
                    let y = center_y + dy;
                    if grid.in_range(x, y) {
                        cells.push((x, y));
                    }
                }
            }
        }

        cells
    }
}
