use thiserror::Error;

use crate::world::Grid;

/// Background color behind empty cells (#222222)
pub const BACKGROUND: [u8; 4] = [0x22, 0x22, 0x22, 0xff];

/// Largest output image, in pixels (1 GiB of RGBA)
pub const MAX_PIXELS: usize = 1 << 28;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RenderError {
    #[error("{grid_width}x{grid_height} grid at scale {scale} exceeds the {} pixel limit", MAX_PIXELS)]
    TooLarge {
        grid_width: usize,
        grid_height: usize,
        scale: u32,
    },
}

/// Paints each cell as a `scale` x `scale` block of its grain's color
pub struct PixelRenderer {
    width: u32,
    height: u32,
    scale: u32,
    buffer: Vec<u8>,
}

impl PixelRenderer {
    /// Renderer for a `grid_width` x `grid_height` grid; a scale of 0 is
    /// treated as 1
    ///
    /// # Panics
    /// If the output exceeds [`MAX_PIXELS`]. Use [`PixelRenderer::try_new`]
    /// for configured sizes.
    pub fn new(grid_width: usize, grid_height: usize, scale: u32) -> Self {
        match Self::try_new(grid_width, grid_height, scale) {
            Ok(renderer) => renderer,
            Err(e) => panic!("{e}"),
        }
    }

    pub fn try_new(grid_width: usize, grid_height: usize, scale: u32) -> Result<Self, RenderError> {
        let scale = scale.max(1);
        let too_large = RenderError::TooLarge {
            grid_width,
            grid_height,
            scale,
        };
        let width = grid_width.checked_mul(scale as usize);
        let height = grid_height.checked_mul(scale as usize);
        let pixels = width.zip(height).and_then(|(w, h)| w.checked_mul(h));
        let (Some(width), Some(height), Some(pixels)) = (width, height, pixels) else {
            return Err(too_large);
        };
        if pixels.max(width).max(height) > MAX_PIXELS {
            return Err(too_large);
        }

        let mut buffer = vec![0; pixels * 4];
        for pixel in buffer.chunks_exact_mut(4) {
            pixel.copy_from_slice(&BACKGROUND);
        }
        // Both fit: each side is at most MAX_PIXELS
        Ok(Self {
            width: width as u32,
            height: height as u32,
            scale,
            buffer,
        })
    }

    /// Output width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Output height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }

    /// RGBA8 pixels, row-major
    pub fn buffer(&self) -> &[u8] {
        &self.buffer
    }

    /// Redraw the whole buffer from `grid`
    ///
    /// A grid whose size no longer matches the buffer is drawn clipped.
    pub fn render(&mut self, grid: &Grid) {
        for pixel in self.buffer.chunks_exact_mut(4) {
            pixel.copy_from_slice(&BACKGROUND);
        }

        for (x, y, grain) in grid.iter() {
            let [r, g, b] = grain.color;
            self.fill_cell(x as u32, y as u32, [r, g, b, 0xff]);
        }
    }

    fn fill_cell(&mut self, cx: u32, cy: u32, rgba: [u8; 4]) {
        let (width, height, scale) = (self.width as u64, self.height as u64, self.scale as u64);
        let px0 = cx as u64 * scale;
        let py0 = cy as u64 * scale;
        if px0 >= width || py0 >= height {
            return;
        }
        let px1 = (px0 + scale).min(width);
        let py1 = (py0 + scale).min(height);

        for py in py0..py1 {
            let row = (py * width) as usize * 4;
            let start = row + px0 as usize * 4;
            let end = row + px1 as usize * 4;
            for pixel in self.buffer[start..end].chunks_exact_mut(4) {
                pixel.copy_from_slice(&rgba);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grainbox_simulation::{Grain, MaterialKind};

    fn pixel(renderer: &PixelRenderer, x: u32, y: u32) -> [u8; 4] {
        let i = ((y * renderer.width() + x) * 4) as usize;
        let mut out = [0; 4];
        out.copy_from_slice(&renderer.buffer()[i..i + 4]);
        out
    }

    #[test]
    fn test_empty_grid_is_background() {
        let mut renderer = PixelRenderer::new(4, 3, 1);
        renderer.render(&Grid::new(4, 3));
        assert_eq!(renderer.buffer().len(), 4 * 3 * 4);
        assert!(renderer.buffer().chunks_exact(4).all(|p| p == BACKGROUND));
    }

    #[test]
    fn test_scaled_cell() {
        let mut grid = Grid::new(4, 4);
        grid.put(1, 2, Some(Grain::with_color(MaterialKind::Water, [0, 0, 120])));
        let mut renderer = PixelRenderer::new(4, 4, 3);
        renderer.render(&grid);

        assert_eq!((renderer.width(), renderer.height()), (12, 12));
        for (x, y) in [(3, 6), (5, 8), (4, 7)] {
            assert_eq!(pixel(&renderer, x, y), [0, 0, 120, 0xff]);
        }
        assert_eq!(pixel(&renderer, 2, 6), BACKGROUND);
        assert_eq!(pixel(&renderer, 6, 6), BACKGROUND);
    }

    #[test]
    fn test_render_clears_previous_frame() {
        let mut grid = Grid::new(2, 2);
        grid.put(0, 0, Some(Grain::with_color(MaterialKind::Sand, [153, 68, 0])));
        let mut renderer = PixelRenderer::new(2, 2, 1);
        renderer.render(&grid);
        assert_eq!(pixel(&renderer, 0, 0), [153, 68, 0, 0xff]);

        grid.clear();
        renderer.render(&grid);
        assert_eq!(pixel(&renderer, 0, 0), BACKGROUND);
    }

    #[test]
    fn test_oversized_output_rejected() {
        let err = PixelRenderer::try_new(300, 200, u32::MAX).err();
        assert!(matches!(err, Some(RenderError::TooLarge { scale: u32::MAX, .. })));
        assert!(PixelRenderer::try_new(usize::MAX, 2, 2).is_err());
        assert!(PixelRenderer::try_new(300, 200, 3).is_ok());
    }

    #[test]
    fn test_larger_grid_drawn_clipped() {
        let mut grid = Grid::new(6, 6);
        grid.put(5, 5, Some(Grain::with_color(MaterialKind::Sand, [153, 68, 0])));
        grid.put(1, 1, Some(Grain::with_color(MaterialKind::Sand, [153, 68, 0])));
        let mut renderer = PixelRenderer::new(2, 2, 2);
        renderer.render(&grid);

        assert_eq!(renderer.buffer().len(), 4 * 4 * 4);
        assert_eq!(pixel(&renderer, 3, 3), [153, 68, 0, 0xff]);
    }

    #[test]
    fn test_zero_scale_clamped() {
        let renderer = PixelRenderer::new(5, 5, 0);
        assert_eq!(renderer.scale(), 1);
        assert_eq!(renderer.width(), 5);
    }
}
