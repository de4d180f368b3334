//! Font loading and resolution module

mod database;
mod face;
mod resolver;

pub use database::FontDatabase;
pub use face::FontFace;
pub use resolver::{FontResolver, FontTable};

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Where a fragment's glyphs come from
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontSource {
    /// A font file on disk
    File(PathBuf),
    /// The default face the font database can find on this system
    SystemDefault,
}

impl FontSource {
    /// `File` for a resolved path, `SystemDefault` otherwise
    pub fn from_resolved(path: Option<PathBuf>) -> Self {
        path.map(FontSource::File).unwrap_or(FontSource::SystemDefault)
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            FontSource::File(path) => Some(path),
            FontSource::SystemDefault => None,
        }
    }
}

impl fmt::Display for FontSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FontSource::File(path) => write!(f, "{}", path.display()),
            FontSource::SystemDefault => f.write_str("<system default>"),
        }
    }
}
