//! Compositor - draws a finished layout onto a canvas

use tiny_skia::Transform;

use sentcloud_layout::{Layout, LayoutRecord, Mask, Orientation};
use sentcloud_text::{FontSource, TextBackend, TextOutline};

use crate::config::{scale_px, CanvasConfig};
use crate::contour;
use crate::{Canvas, RenderError, Result};

/// Counts from one render pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderReport {
    pub drawn: usize,
    /// Records whose text could not be outlined with any font
    pub dropped: usize,
}

/// Rasterizes layout records through a text backend
pub struct Compositor<B> {
    backend: B,
    default_font: FontSource,
    mask: Option<Mask>,
}

impl<B: TextBackend> Compositor<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            default_font: FontSource::SystemDefault,
            mask: None,
        }
    }

    /// Font tried when a record's own font fails
    pub fn with_default_font(mut self, font: FontSource) -> Self {
        self.default_font = font;
        self
    }

    /// Shape mask whose outline is drawn when `contour_width > 0`
    pub fn with_mask(mut self, mask: Mask) -> Self {
        self.mask = Some(mask);
        self
    }

    pub fn into_backend(self) -> B {
        self.backend
    }

    pub fn render(&mut self, layout: &Layout, config: &CanvasConfig) -> Result<Canvas> {
        self.render_with_report(layout, config).map(|(canvas, _)| canvas)
    }

    /// Render and report how many records were drawn or dropped
    pub fn render_with_report(
        &mut self,
        layout: &Layout,
        config: &CanvasConfig,
    ) -> Result<(Canvas, RenderReport)> {
        let (width, height) = config.scaled_size(layout.width, layout.height);
        let mut canvas =
            Canvas::new(width, height).ok_or(RenderError::InvalidCanvas { width, height })?;
        canvas.clear(config.background);

        let mut report = RenderReport::default();
        for record in &layout.records {
            match self.outline(record, config.scale) {
                Some(outline) => {
                    draw_record(&mut canvas, record, &outline, config.scale);
                    report.drawn += 1;
                }
                None => report.dropped += 1,
            }
        }

        if let Some(mask) = &self.mask {
            contour::draw_contour(
                &mut canvas,
                mask,
                config.contour_width,
                config.scale,
                config.contour_color,
            );
        }

        tracing::info!(
            "Rendered {}x{} canvas: {} drawn, {} dropped",
            width,
            height,
            report.drawn,
            report.dropped
        );
        Ok((canvas, report))
    }

    /// Outline with the record's font, then once with the default font
    fn outline(&mut self, record: &LayoutRecord, scale: f32) -> Option<TextOutline> {
        let size = scale_px(record.font_size, scale).max(1) as f32;

        let err = match self.backend.outline(&record.font, &record.text, size) {
            Ok(outline) => return Some(outline),
            Err(err) => err,
        };
        if record.font == self.default_font {
            tracing::warn!("Dropping {:?}: {}", record.text, err);
            return None;
        }

        tracing::warn!("Outline failed for {:?} with {} ({}), retrying with default font", record.text, record.font, err);
        match self.backend.outline(&self.default_font, &record.text, size) {
            Ok(outline) => Some(outline),
            Err(err) => {
                tracing::warn!("Dropping {:?}: {}", record.text, err);
                None
            }
        }
    }
}

/// Placement transform for a record's outline.
///
/// Outlines have their origin at the top-left of the unrotated box. A
/// rotated record turns the text a quarter turn counter-clockwise, so the
/// first glyph ends up at the bottom of its box.
pub fn record_transform(record: &LayoutRecord, outline: &TextOutline, scale: f32) -> Transform {
    let x = scale_px(record.x, scale) as f32;
    let y = scale_px(record.y, scale) as f32;
    match record.orientation {
        Orientation::Horizontal => Transform::from_translate(x, y),
        Orientation::Rotated90 => {
            Transform::from_row(0.0, -1.0, 1.0, 0.0, x, y + outline.extent.width as f32)
        }
    }
}

fn draw_record(canvas: &mut Canvas, record: &LayoutRecord, outline: &TextOutline, scale: f32) {
    // Whitespace-only runs have nothing to fill
    if let Some(path) = &outline.path {
        canvas.fill_path(path, record_transform(record, outline, scale), record.color);
    }
}
