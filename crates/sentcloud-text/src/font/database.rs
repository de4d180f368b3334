//! Font database for the system default face

use std::path::Path;
use std::sync::Arc;

use fontdb::{Database, Family, Query};

use super::FontFace;
use crate::{Result, TextError};

/// Families tried, in order, when a fragment has no resolved font file
const DEFAULT_FAMILIES: &[&str] = &["DejaVu Sans", "Noto Sans", "Liberation Sans", "Arial"];

/// Font database wrapping fontdb
pub struct FontDatabase {
    db: Database,
}

impl FontDatabase {
    /// Create a new empty font database
    pub fn new() -> Self {
        Self {
            db: Database::new(),
        }
    }

    /// Create a font database with system fonts loaded
    pub fn with_system_fonts() -> Self {
        let mut db = Database::new();
        db.load_system_fonts();
        tracing::debug!("Loaded {} system font faces", db.len());
        Self { db }
    }

    /// Load a font from file
    pub fn load_font_file(&mut self, path: &Path) -> Result<()> {
        self.db.load_font_file(path).map_err(|source| TextError::FontLoad {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load a font from memory
    pub fn load_font_data(&mut self, data: Vec<u8>) {
        self.db.load_font_data(data);
    }

    /// Pick the default face: a well-known sans family, then generic
    /// sans-serif, then whatever face was loaded first.
    pub fn default_face(&self) -> Result<FontFace> {
        let mut families: Vec<Family> = DEFAULT_FAMILIES.iter().copied().map(Family::Name).collect();
        families.push(Family::SansSerif);

        let id = self
            .db
            .query(&Query {
                families: &families,
                ..Query::default()
            })
            .or_else(|| self.db.faces().next().map(|face| face.id))
            .ok_or_else(|| TextError::FontNotFound("no system fonts available".into()))?;

        let (data, index) = self
            .db
            .with_face_data(id, |data, index| (data.to_vec(), index))
            .ok_or_else(|| TextError::FontNotFound("default face data unavailable".into()))?;

        FontFace::from_data(Arc::new(data), index)
    }

    /// Number of loaded faces
    pub fn len(&self) -> usize {
        self.db.len()
    }

    /// Check if database is empty
    pub fn is_empty(&self) -> bool {
        self.db.is_empty()
    }
}

impl Default for FontDatabase {
    fn default() -> Self {
        Self::new()
    }
}
