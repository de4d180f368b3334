//! Text backend: measurement and outlining of whole fragments
//!
//! Layout only needs box sizes; compositing needs outlines. Both go through
//! [`TextBackend`] so the packing algorithm can run against any font
//! primitive. [`FontBackend`] is the real one: font files are read once per
//! render and cached, shaping goes through rustybuzz and outlines through
//! ttf-parser.

use std::collections::HashMap;

use crate::font::{FontDatabase, FontFace, FontSource};
use crate::outline::{self, TextExtent, TextOutline};
use crate::shaping::TextShaper;
use crate::Result;

/// Font primitive used by layout and compositing
pub trait TextBackend {
    /// Unrotated box of `text` set in `font` at `font_size` pixels
    fn measure(&mut self, font: &FontSource, text: &str, font_size: f32) -> Result<TextExtent>;

    /// Outline of `text`, origin at the top-left of its box
    fn outline(&mut self, font: &FontSource, text: &str, font_size: f32) -> Result<TextOutline>;
}

impl<B: TextBackend + ?Sized> TextBackend for &mut B {
    fn measure(&mut self, font: &FontSource, text: &str, font_size: f32) -> Result<TextExtent> {
        (**self).measure(font, text, font_size)
    }

    fn outline(&mut self, font: &FontSource, text: &str, font_size: f32) -> Result<TextOutline> {
        (**self).outline(font, text, font_size)
    }
}

/// Backend reading font files from disk
#[derive(Default)]
pub struct FontBackend {
    faces: HashMap<FontSource, FontFace>,
    system: Option<FontDatabase>,
    shaper: TextShaper,
}

impl FontBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use an already populated database for `FontSource::SystemDefault`
    pub fn with_database(database: FontDatabase) -> Self {
        Self {
            system: Some(database),
            ..Self::default()
        }
    }

    /// Load (or fetch from cache) the face for a source
    pub fn face(&mut self, font: &FontSource) -> Result<FontFace> {
        if let Some(face) = self.faces.get(font) {
            return Ok(face.clone());
        }

        let face = match font {
            FontSource::File(path) => FontFace::from_file(path)?,
            FontSource::SystemDefault => self
                .system
                .get_or_insert_with(FontDatabase::with_system_fonts)
                .default_face()?,
        };
        tracing::debug!("Loaded font {} ({:?})", font, face);

        self.faces.insert(font.clone(), face.clone());
        Ok(face)
    }

    /// Number of cached faces
    pub fn cached_faces(&self) -> usize {
        self.faces.len()
    }
}

impl TextBackend for FontBackend {
    fn measure(&mut self, font: &FontSource, text: &str, font_size: f32) -> Result<TextExtent> {
        let face = self.face(font)?;
        let run = self.shaper.shape(&face, text, font_size)?;
        Ok(TextExtent::of_run(&run))
    }

    fn outline(&mut self, font: &FontSource, text: &str, font_size: f32) -> Result<TextOutline> {
        let face = self.face(font)?;
        let run = self.shaper.shape(&face, text, font_size)?;
        outline::outline_run(&face, &run)
    }
}
