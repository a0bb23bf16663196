//! PNG capture of rendered frames

use anyhow::{Context, Result};
use grainbox_core::render::PixelRenderer;
use grainbox_core::world::Grid;
use image::{ImageBuffer, Rgba};
use std::path::Path;

/// Save RGBA buffer as PNG
pub fn save_buffer_as_png(buffer: &[u8], width: u32, height: u32, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let img: ImageBuffer<Rgba<u8>, _> = ImageBuffer::from_raw(width, height, buffer.to_vec())
        .context("Failed to create image from buffer")?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    img.save(path)
        .with_context(|| format!("Failed to save capture: {}", path.display()))?;

    Ok(())
}

/// Render `grid` at `scale` and write it to `path`
pub fn capture_grid(grid: &Grid, scale: u32, path: impl AsRef<Path>) -> Result<()> {
    let mut renderer = PixelRenderer::try_new(grid.width(), grid.height(), scale)
        .context("Capture size out of range")?;
    renderer.render(grid);
    save_buffer_as_png(renderer.buffer(), renderer.width(), renderer.height(), path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use grainbox_core::materials::{Grain, MaterialKind};

    #[test]
    fn test_capture_grid_writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/frame.png");
        let mut grid = Grid::new(8, 6);
        grid.put(2, 3, Some(Grain::with_color(MaterialKind::Water, [0, 0, 120])));

        capture_grid(&grid, 2, &path).unwrap();

        let img = image::open(&path).unwrap().to_rgba8();
        assert_eq!(img.dimensions(), (16, 12));
        assert_eq!(img.get_pixel(4, 6).0, [0, 0, 120, 255]);
        assert_eq!(img.get_pixel(0, 0).0, [0x22, 0x22, 0x22, 255]);
    }

    #[test]
    fn test_capture_scale_overflow_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("huge.png");
        let err = capture_grid(&Grid::new(300, 200), u32::MAX, &path).unwrap_err();

        assert!(format!("{err:#}").contains("pixel limit"));
        assert!(!path.exists());
    }

    #[test]
    fn test_buffer_size_mismatch_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = save_buffer_as_png(&[0; 8], 4, 4, dir.path().join("bad.png")).unwrap_err();
        assert!(err.to_string().contains("buffer"));
    }
}
