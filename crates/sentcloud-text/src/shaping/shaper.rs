//! Text shaper using rustybuzz

use rustybuzz::{Face, UnicodeBuffer, shape};

use super::{ShapedGlyph, ShapedRun};
use crate::font::FontFace;
use crate::{Result, TextError};

/// Text shaper using HarfBuzz (via rustybuzz).
///
/// Script, direction and language are guessed from the text, so Hebrew and
/// Arabic fragments come out in visual order with their joining forms.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextShaper;

impl TextShaper {
    /// Create a new text shaper
    pub fn new() -> Self {
        Self
    }

    /// Shape a single-line text with a loaded face
    pub fn shape(&self, face: &FontFace, text: &str, font_size: f32) -> Result<ShapedRun> {
        let hb_face = Face::from_slice(face.data(), face.index())
            .ok_or_else(|| TextError::FontParsing("rustybuzz rejected font".into()))?;

        let mut buffer = UnicodeBuffer::new();
        buffer.push_str(text);
        buffer.guess_segment_properties();

        let output = shape(&hb_face, &[], buffer);

        let glyphs: Vec<ShapedGlyph> = output
            .glyph_infos()
            .iter()
            .zip(output.glyph_positions())
            .map(|(info, pos)| ShapedGlyph {
                glyph_id: u16::try_from(info.glyph_id).unwrap_or(0),
                x_offset: pos.x_offset,
                y_offset: pos.y_offset,
                x_advance: pos.x_advance,
                cluster: info.cluster,
            })
            .collect();

        if glyphs.is_empty() && !text.is_empty() {
            return Err(TextError::ShapingFailed(format!("no glyphs for {text:?}")));
        }

        Ok(ShapedRun {
            glyphs,
            font_size,
            units_per_em: face.units_per_em(),
            ascender: face.ascender(),
            descender: face.descender(),
        })
    }
}
