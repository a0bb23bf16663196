//! CPU rendering of the grid into an RGBA pixel buffer

mod pixel_renderer;

pub use pixel_renderer::{BACKGROUND, MAX_PIXELS, PixelRenderer, RenderError};
