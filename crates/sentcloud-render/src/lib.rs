//! sentcloud Render - Rasterization of finished layouts
//!
//! - Canvas backed by tiny-skia Pixmap
//! - Compositor filling glyph outlines at their placed positions
//! - Mask contour drawing
//! - PNG encoding (image crate)

pub mod canvas;
pub mod compositor;
pub mod config;
pub mod contour;

pub use canvas::Canvas;
pub use compositor::{Compositor, RenderReport};
pub use config::CanvasConfig;
pub use sentcloud_layout::{Color, ColorScheme};

/// Render error types
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Invalid output size {width}x{height}")]
    InvalidCanvas { width: u32, height: u32 },

    #[error("PNG encoding failed: {0}")]
    Encode(#[from] image::ImageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RenderError>;
