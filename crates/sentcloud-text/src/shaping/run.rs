//! Shaped text run

/// A shaped glyph with position
#[derive(Debug, Clone, Copy)]
pub struct ShapedGlyph {
    /// Glyph ID in the font
    pub glyph_id: u16,
    /// X offset from current position (in font units)
    pub x_offset: i32,
    /// Y offset from current position (in font units)
    pub y_offset: i32,
    /// Horizontal advance (in font units)
    pub x_advance: i32,
    /// Cluster index (original byte position)
    pub cluster: u32,
}

/// A run of shaped glyphs on a single line
#[derive(Debug, Clone)]
pub struct ShapedRun {
    /// The shaped glyphs, in visual order
    pub glyphs: Vec<ShapedGlyph>,
    /// Font size used for shaping
    pub font_size: f32,
    /// Units per em from the font
    pub units_per_em: u16,
    /// Ascender in font units
    pub ascender: i16,
    /// Descender in font units (usually negative)
    pub descender: i16,
}

impl ShapedRun {
    /// Scale factor to convert font units to pixels
    pub fn scale(&self) -> f32 {
        self.font_size / self.units_per_em.max(1) as f32
    }

    /// Total advance width in pixels
    pub fn width(&self) -> f32 {
        let units: i64 = self.glyphs.iter().map(|g| g.x_advance as i64).sum();
        units.max(0) as f32 * self.scale()
    }

    /// Ascender-to-descender height in pixels
    pub fn height(&self) -> f32 {
        (self.ascender as f32 - self.descender as f32) * self.scale()
    }

    /// Baseline distance from the top of the line box in pixels
    pub fn baseline(&self) -> f32 {
        self.ascender as f32 * self.scale()
    }

    /// Number of glyphs
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Iterate over glyphs with pixel pen positions (y grows upward from the
    /// baseline, as in font space)
    pub fn positioned_glyphs(&self) -> impl Iterator<Item = PositionedGlyph> + '_ {
        let scale = self.scale();
        let mut pen_x = 0.0;

        self.glyphs.iter().map(move |g| {
            let pos = PositionedGlyph {
                glyph_id: g.glyph_id,
                x: pen_x + g.x_offset as f32 * scale,
                y: g.y_offset as f32 * scale,
            };
            pen_x += g.x_advance as f32 * scale;
            pos
        })
    }
}

/// A glyph with pixel position
#[derive(Debug, Clone, Copy)]
pub struct PositionedGlyph {
    /// Glyph ID in the font
    pub glyph_id: u16,
    /// X position in pixels from the start of the run
    pub x: f32,
    /// Y offset in pixels above the baseline
    pub y: f32,
}
