//! Glyph outlines as tiny-skia paths
//!
//! A shaped run is turned into one path whose origin is the top-left corner
//! of the run's line box: x grows right, y grows down, and the baseline sits
//! at the ascender height.

use ttf_parser::{GlyphId, OutlineBuilder};

use crate::font::FontFace;
use crate::shaping::ShapedRun;
use crate::Result;

/// Pixel size of a text box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextExtent {
    pub width: u32,
    pub height: u32,
}

impl TextExtent {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Box measured from a shaped run (rounded up to whole pixels)
    pub fn of_run(run: &ShapedRun) -> Self {
        Self {
            width: run.width().ceil() as u32,
            height: run.height().ceil() as u32,
        }
    }

    /// The same box turned a quarter turn
    pub fn rotated(self) -> Self {
        Self {
            width: self.height,
            height: self.width,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Outlined text ready to be filled
#[derive(Debug, Clone)]
pub struct TextOutline {
    /// Unrotated line box
    pub extent: TextExtent,
    /// Glyph outlines, `None` when the run has no ink (e.g. only spaces)
    pub path: Option<tiny_skia::Path>,
}

/// Build the outline of a shaped run
pub fn outline_run(face: &FontFace, run: &ShapedRun) -> Result<TextOutline> {
    let ttf = face.ttf_face()?;
    let scale = run.scale();
    let baseline = run.baseline();
    let mut builder = tiny_skia::PathBuilder::new();

    for glyph in run.positioned_glyphs() {
        let mut sink = PathSink {
            builder: &mut builder,
            scale,
            origin_x: glyph.x,
            baseline: baseline - glyph.y,
        };
        // Glyphs without outlines (spaces) are simply skipped
        let _ = ttf.outline_glyph(GlyphId(glyph.glyph_id), &mut sink);
    }

    Ok(TextOutline {
        extent: TextExtent::of_run(run),
        path: builder.finish(),
    })
}

/// Outline sink mapping font units onto the line box
struct PathSink<'a> {
    builder: &'a mut tiny_skia::PathBuilder,
    scale: f32,
    origin_x: f32,
    baseline: f32,
}

impl PathSink<'_> {
    fn tx(&self, x: f32) -> f32 {
        self.origin_x + x * self.scale
    }

    fn ty(&self, y: f32) -> f32 {
        self.baseline - y * self.scale // Flip Y axis
    }
}

impl OutlineBuilder for PathSink<'_> {
    fn move_to(&mut self, x: f32, y: f32) {
        self.builder.move_to(self.tx(x), self.ty(y));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.builder.line_to(self.tx(x), self.ty(y));
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.builder
            .quad_to(self.tx(x1), self.ty(y1), self.tx(x), self.ty(y));
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.builder.cubic_to(
            self.tx(x1),
            self.ty(y1),
            self.tx(x2),
            self.ty(y2),
            self.tx(x),
            self.ty(y),
        );
    }

    fn close(&mut self) {
        self.builder.close();
    }
}
