//! Fixed-size grain storage
//!
//! A flat arena of `width * height` cells, each either empty or owning one
//! grain. Moving a grain is always a swap of two cells, never a copy.

use grainbox_simulation::{Grain, MaterialKind};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("cell ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfRange {
        x: i32,
        y: i32,
        width: usize,
        height: usize,
    },
    #[error("grid dimensions must be non-zero, got {width}x{height}")]
    InvalidSize { width: usize, height: usize },
}

/// 2D cell storage indexed `y * width + x`
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Option<Grain>>,
}

impl Grid {
    /// Create an empty grid
    ///
    /// # Panics
    /// If either dimension is zero. Use [`Grid::try_new`] for untrusted sizes.
    pub fn new(width: usize, height: usize) -> Self {
        match Self::try_new(width, height) {
            Ok(grid) => grid,
            Err(e) => panic!("{e}"),
        }
    }

    pub fn try_new(width: usize, height: usize) -> Result<Self, GridError> {
        if width == 0 || height == 0 || width > i32::MAX as usize || height > i32::MAX as usize {
            return Err(GridError::InvalidSize { width, height });
        }
        Ok(Self {
            width,
            height,
            cells: vec![None; width * height],
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of cells (occupied or not)
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }

    #[inline]
    pub fn in_range(&self, x: i32, y: i32) -> bool {
        x >= 0 && (x as usize) < self.width && y >= 0 && (y as usize) < self.height
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> usize {
        debug_assert!(self.in_range(x, y), "({x}, {y}) out of range");
        y as usize * self.width + x as usize
    }

    /// Grain at a cell, or `None` when empty
    ///
    /// # Panics
    /// If `(x, y)` is out of range; probe neighbors with [`Grid::safe_get`].
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> Option<&Grain> {
        self.assert_in_range(x, y);
        self.cells[self.index(x, y)].as_ref()
    }

    #[inline]
    pub fn get_mut(&mut self, x: i32, y: i32) -> Option<&mut Grain> {
        self.assert_in_range(x, y);
        let idx = self.index(x, y);
        self.cells[idx].as_mut()
    }

    /// Grain at a cell, or `default` when the cell is outside the grid
    #[inline]
    pub fn safe_get<'a>(&'a self, x: i32, y: i32, default: Option<&'a Grain>) -> Option<&'a Grain> {
        if self.in_range(x, y) {
            self.cells[self.index(x, y)].as_ref()
        } else {
            default
        }
    }

    /// Overwrite a cell unconditionally (`None` clears it)
    ///
    /// # Panics
    /// If `(x, y)` is out of range; external input should use [`Grid::try_put`].
    #[inline]
    pub fn put(&mut self, x: i32, y: i32, grain: Option<Grain>) {
        self.assert_in_range(x, y);
        let idx = self.index(x, y);
        self.cells[idx] = grain;
    }

    pub fn try_put(&mut self, x: i32, y: i32, grain: Option<Grain>) -> Result<(), GridError> {
        if !self.in_range(x, y) {
            return Err(self.out_of_range(x, y));
        }
        self.put(x, y, grain);
        Ok(())
    }

    /// Exchange the contents of two cells
    #[inline]
    pub fn swap(&mut self, (ax, ay): (i32, i32), (bx, by): (i32, i32)) {
        self.assert_in_range(ax, ay);
        self.assert_in_range(bx, by);
        let (a, b) = (self.index(ax, ay), self.index(bx, by));
        self.cells.swap(a, b);
    }

    /// Empty every cell
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Iterate occupied cells in storage (row-major) order
    pub fn iter(&self) -> impl Iterator<Item = (i32, i32, &Grain)> + '_ {
        let width = self.width;
        self.cells.iter().enumerate().filter_map(move |(i, cell)| {
            cell.as_ref()
                .map(|grain| ((i % width) as i32, (i / width) as i32, grain))
        })
    }

    pub(crate) fn grains_mut(&mut self) -> impl Iterator<Item = &mut Grain> + '_ {
        self.cells.iter_mut().flatten()
    }

    /// Number of occupied cells
    pub fn occupied(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Number of grains of one material
    pub fn count(&self, kind: MaterialKind) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|grain| grain.kind == kind)
            .count()
    }

    #[inline]
    fn assert_in_range(&self, x: i32, y: i32) {
        if !self.in_range(x, y) {
            panic!("{}", self.out_of_range(x, y));
        }
    }

    fn out_of_range(&self, x: i32, y: i32) -> GridError {
        GridError::OutOfRange {
            x,
            y,
            width: self.width,
            height: self.height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sand() -> Grain {
        Grain::with_color(MaterialKind::Sand, [153, 68, 0])
    }

    #[test]
    fn test_new_grid_is_empty() {
        let grid = Grid::new(4, 3);
        assert_eq!(grid.width(), 4);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.len(), 12);
        assert!(grid.is_empty());
        assert_eq!(grid.occupied(), 0);
    }

    #[test]
    fn test_zero_size_rejected() {
        assert_eq!(
            Grid::try_new(0, 5),
            Err(GridError::InvalidSize {
                width: 0,
                height: 5
            })
        );
        assert!(Grid::try_new(5, 0).is_err());
    }

    #[test]
    fn test_in_range() {
        let grid = Grid::new(10, 5);
        assert!(grid.in_range(0, 0));
        assert!(grid.in_range(9, 4));
        assert!(!grid.in_range(10, 0));
        assert!(!grid.in_range(0, 5));
        assert!(!grid.in_range(-1, 0));
        assert!(!grid.in_range(0, -1));
    }

    #[test]
    fn test_put_and_get() {
        let mut grid = Grid::new(10, 10);
        grid.put(3, 7, Some(sand()));
        assert_eq!(grid.get(3, 7), Some(&sand()));
        assert_eq!(grid.get(7, 3), None);

        grid.put(3, 7, None);
        assert_eq!(grid.get(3, 7), None);
    }

    #[test]
    fn test_safe_get_out_of_range_returns_default() {
        let mut grid = Grid::new(2, 2);
        grid.put(0, 0, Some(sand()));
        let marker = Grain::with_color(MaterialKind::Rock, [1, 1, 1]);

        assert_eq!(grid.safe_get(0, 0, None), Some(&sand()));
        assert_eq!(grid.safe_get(1, 1, Some(&marker)), None);
        assert_eq!(grid.safe_get(-1, 0, None), None);
        assert_eq!(grid.safe_get(2, 0, Some(&marker)), Some(&marker));
    }

    #[test]
    #[should_panic(expected = "outside the 2x2 grid")]
    fn test_get_out_of_range_panics() {
        let grid = Grid::new(2, 2);
        let _ = grid.get(2, 0);
    }

    #[test]
    fn test_try_put_out_of_range() {
        let mut grid = Grid::new(3, 3);
        assert_eq!(
            grid.try_put(3, 1, Some(sand())),
            Err(GridError::OutOfRange {
                x: 3,
                y: 1,
                width: 3,
                height: 3
            })
        );
        assert!(grid.try_put(2, 2, Some(sand())).is_ok());
        assert_eq!(grid.occupied(), 1);
    }

    #[test]
    fn test_swap_moves_without_duplication() {
        let mut grid = Grid::new(3, 3);
        grid.put(1, 0, Some(sand()));
        grid.swap((1, 0), (1, 1));
        assert_eq!(grid.get(1, 0), None);
        assert_eq!(grid.get(1, 1), Some(&sand()));
        assert_eq!(grid.occupied(), 1);
    }

    #[test]
    fn test_iter_reports_coordinates() {
        let mut grid = Grid::new(4, 4);
        grid.put(3, 1, Some(sand()));
        grid.put(0, 2, Some(Grain::with_color(MaterialKind::Water, [0, 0, 120])));

        let cells: Vec<(i32, i32, MaterialKind)> =
            grid.iter().map(|(x, y, g)| (x, y, g.kind)).collect();
        assert_eq!(
            cells,
            vec![(3, 1, MaterialKind::Sand), (0, 2, MaterialKind::Water)]
        );
    }

    #[test]
    fn test_count_and_clear() {
        let mut grid = Grid::new(5, 5);
        for x in 0..5 {
            grid.put(x, 4, Some(sand()));
        }
        grid.put(2, 2, Some(Grain::with_color(MaterialKind::Oil, [255, 255, 0])));
        assert_eq!(grid.count(MaterialKind::Sand), 5);
        assert_eq!(grid.count(MaterialKind::Oil), 1);
        assert_eq!(grid.occupied(), 6);

        grid.clear();
        assert!(grid.is_empty());
    }
}
