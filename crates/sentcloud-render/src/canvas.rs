//! Canvas - pixel buffer backed by a tiny-skia Pixmap

use std::io::Write;
use std::path::Path;

use image::{ExtendedColorType, ImageEncoder, RgbaImage};
use tiny_skia::{FillRule, Paint, Pixmap, Rect, Transform};

use crate::{Color, RenderError, Result};

/// RGBA raster the cloud is drawn into
#[derive(Debug, Clone)]
pub struct Canvas {
    pixmap: Pixmap,
}

impl Canvas {
    /// Create a transparent canvas, `None` for zero-sized dimensions
    pub fn new(width: u32, height: u32) -> Option<Self> {
        Pixmap::new(width, height).map(|pixmap| Self { pixmap })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Fill the whole canvas with one color
    pub fn clear(&mut self, color: Color) {
        self.pixmap.fill(skia_color(color));
    }

    /// Straight-alpha color of a pixel; `None` outside the canvas
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<Color> {
        // Pixmap::pixel only checks the flat index, so x past the edge wraps
        if x >= self.width() || y >= self.height() {
            return None;
        }
        let pixel = self.pixmap.pixel(x, y)?.demultiply();
        Some(Color::rgba(pixel.red(), pixel.green(), pixel.blue(), pixel.alpha()))
    }

    /// Fill a rectangle; empty or non-finite rectangles are ignored
    pub fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color) {
        let Some(rect) = Rect::from_xywh(x, y, width, height) else {
            return;
        };
        self.pixmap
            .fill_rect(rect, &paint(color), Transform::identity(), None);
    }

    /// Fill a path (non-zero winding) under a transform
    pub fn fill_path(&mut self, path: &tiny_skia::Path, transform: Transform, color: Color) {
        self.pixmap
            .fill_path(path, &paint(color), FillRule::Winding, transform, None);
    }

    /// Copy out as a straight-alpha RGBA image
    pub fn to_rgba_image(&self) -> RgbaImage {
        let bytes: Vec<u8> = self
            .pixmap
            .pixels()
            .iter()
            .flat_map(|p| {
                let c = p.demultiply();
                [c.red(), c.green(), c.blue(), c.alpha()]
            })
            .collect();
        RgbaImage::from_raw(self.width(), self.height(), bytes)
            .unwrap_or_else(|| RgbaImage::new(self.width(), self.height()))
    }

    /// Lossless PNG bytes
    pub fn encode_png(&self) -> Result<Vec<u8>> {
        let image = self.to_rgba_image();
        let mut buf = Vec::new();
        image::codecs::png::PngEncoder::new(&mut buf).write_image(
            image.as_raw(),
            image.width(),
            image.height(),
            ExtendedColorType::Rgba8,
        )?;
        Ok(buf)
    }

    /// Write a PNG file atomically.
    ///
    /// The bytes go to a temporary file next to `path`, which is then
    /// renamed over it. On any error the temporary file is removed.
    pub fn save_png(&self, path: &Path) -> Result<()> {
        let png = self.encode_png()?;
        let dir = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };

        let mut file = tempfile::NamedTempFile::new_in(dir)?;
        file.write_all(&png)?;
        file.flush()?;
        file.persist(path).map_err(|err| RenderError::Io(err.error))?;

        tracing::info!("Wrote {}x{} PNG to {}", self.width(), self.height(), path.display());
        Ok(())
    }
}

fn skia_color(color: Color) -> tiny_skia::Color {
    tiny_skia::Color::from_rgba8(color.r, color.g, color.b, color.a)
}

fn paint(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(color.r, color.g, color.b, color.a);
    paint.anti_alias = true;
    paint
}
