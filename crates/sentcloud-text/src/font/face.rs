//! Font face with parsed metrics

use std::path::Path;
use std::sync::Arc;

use ttf_parser::{Face, GlyphId};

use crate::{Result, TextError};

/// Loaded font face.
///
/// Owns the font bytes so it can be cached across layout attempts. Metrics
/// are read once at load time; the `ttf_parser::Face` view is re-parsed on
/// demand, which only reads the table directory.
#[derive(Clone)]
pub struct FontFace {
    data: Arc<Vec<u8>>,
    index: u32,
    units_per_em: u16,
    ascender: i16,
    descender: i16,
    line_gap: i16,
}

impl FontFace {
    /// Parse a face out of font data (index selects a face in a collection)
    pub fn from_data(data: Arc<Vec<u8>>, index: u32) -> Result<Self> {
        let face = Face::parse(&data, index)
            .map_err(|e| TextError::FontParsing(e.to_string()))?;
        let units_per_em = face.units_per_em();
        let ascender = face.ascender();
        let descender = face.descender();
        let line_gap = face.line_gap();
        drop(face);

        Ok(Self {
            data,
            index,
            units_per_em,
            ascender,
            descender,
            line_gap,
        })
    }

    /// Load the first face of a font file
    pub fn from_file(path: &Path) -> Result<Self> {
        let data = std::fs::read(path).map_err(|source| TextError::FontLoad {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_data(Arc::new(data), 0)
    }

    /// Raw font bytes
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Face index inside a collection
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Units per em
    pub fn units_per_em(&self) -> u16 {
        self.units_per_em
    }

    /// Ascender (above baseline)
    pub fn ascender(&self) -> i16 {
        self.ascender
    }

    /// Descender (below baseline, usually negative)
    pub fn descender(&self) -> i16 {
        self.descender
    }

    /// Line gap
    pub fn line_gap(&self) -> i16 {
        self.line_gap
    }

    /// Scale factor from font units to pixels
    pub fn scale(&self, font_size: f32) -> f32 {
        font_size / self.units_per_em.max(1) as f32
    }

    /// Height of the ascender-to-descender box in pixels
    pub fn box_height(&self, font_size: f32) -> f32 {
        (self.ascender as f32 - self.descender as f32) * self.scale(font_size)
    }

    /// Check if the font has a glyph for a character
    pub fn has_char(&self, c: char) -> bool {
        self.ttf_face()
            .map(|face| face.glyph_index(c).is_some_and(|id| id != GlyphId(0)))
            .unwrap_or(false)
    }

    /// Borrow a ttf-parser view of the face
    pub fn ttf_face(&self) -> Result<Face<'_>> {
        Face::parse(&self.data, self.index).map_err(|e| TextError::FontParsing(e.to_string()))
    }
}

impl std::fmt::Debug for FontFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontFace")
            .field("bytes", &self.data.len())
            .field("index", &self.index)
            .field("units_per_em", &self.units_per_em)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_garbage_data_is_parse_error() {
        let err = FontFace::from_data(Arc::new(vec![0u8; 64]), 0).unwrap_err();
        assert!(matches!(err, TextError::FontParsing(_)));
        assert!(err.is_font_failure());
    }

    #[test]
    fn test_missing_file_is_load_error() {
        let err = FontFace::from_file(Path::new("/nonexistent/sentcloud/font.ttf")).unwrap_err();
        assert!(matches!(err, TextError::FontLoad { .. }));
        assert!(err.is_font_failure());
    }
}
