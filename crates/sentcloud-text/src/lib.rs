//! sentcloud Text - Script-aware font handling
//!
//! This crate provides the text side of the sentence cloud:
//! - Script detection by Unicode code-point ranges
//! - Per-script font resolution with fallback chaining
//! - Font loading and system default lookup (fontdb)
//! - Text shaping (rustybuzz - HarfBuzz port)
//! - Glyph outlines as tiny-skia paths
//! - The `TextBackend` seam used by layout and compositing

pub mod script;
pub mod font;
pub mod shaping;
pub mod outline;
pub mod backend;

pub use script::{ScriptTag, ScriptSet};
pub use font::{FontDatabase, FontFace, FontResolver, FontSource, FontTable};
pub use shaping::{TextShaper, ShapedGlyph, ShapedRun};
pub use outline::{TextExtent, TextOutline};
pub use backend::{FontBackend, TextBackend};

use std::path::PathBuf;

/// Text error types
#[derive(Debug, thiserror::Error)]
pub enum TextError {
    #[error("Font not found: {0}")]
    FontNotFound(String),

    #[error("Failed to read font {path}: {source}")]
    FontLoad {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse font: {0}")]
    FontParsing(String),

    #[error("Shaping failed: {0}")]
    ShapingFailed(String),

    #[error("Invalid font table: {0}")]
    FontTable(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TextError {
    /// Whether the error came from loading or parsing a font face.
    ///
    /// These are the failures the layout engine and compositor recover from
    /// by switching to the default font.
    pub fn is_font_failure(&self) -> bool {
        matches!(
            self,
            TextError::FontNotFound(_) | TextError::FontLoad { .. } | TextError::FontParsing(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, TextError>;
