//! Cloud configuration

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use sentcloud_layout::LayoutConfig;
use sentcloud_render::CanvasConfig;
use sentcloud_text::FontTable;

use crate::{CloudError, Result};

/// Accepted canvas widths
pub const WIDTH_RANGE: (u32, u32) = (200, 1600);
/// Accepted canvas heights
pub const HEIGHT_RANGE: (u32, u32) = (200, 1200);
/// Largest output multiplier
pub const MAX_SCALE: f32 = 8.0;

/// Everything a render needs besides the fragments
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CloudConfig {
    pub canvas: CanvasConfig,
    pub layout: LayoutConfig,
    pub fonts: FontTable,
    /// Shape image; the canvas takes its size
    pub mask: Option<PathBuf>,
}

impl CloudConfig {
    /// Load from a JSON file; missing keys keep their defaults
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&data)?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        let canvas = &self.canvas;
        let layout = &self.layout;

        if !(WIDTH_RANGE.0..=WIDTH_RANGE.1).contains(&canvas.width) {
            return Err(invalid(format!(
                "width {} outside {}..={}",
                canvas.width, WIDTH_RANGE.0, WIDTH_RANGE.1
            )));
        }
        if !(HEIGHT_RANGE.0..=HEIGHT_RANGE.1).contains(&canvas.height) {
            return Err(invalid(format!(
                "height {} outside {}..={}",
                canvas.height, HEIGHT_RANGE.0, HEIGHT_RANGE.1
            )));
        }
        if !(canvas.scale > 0.0 && canvas.scale <= MAX_SCALE) {
            return Err(invalid(format!("scale {} outside (0, {}]", canvas.scale, MAX_SCALE)));
        }
        if !(0.0..=1.0).contains(&layout.prefer_horizontal) {
            return Err(invalid(format!(
                "prefer_horizontal {} outside [0, 1]",
                layout.prefer_horizontal
            )));
        }
        if layout.min_font_size == 0 {
            return Err(invalid("min_font_size must be at least 1"));
        }
        if layout.max_fragments == 0 {
            return Err(invalid("max_fragments must be at least 1"));
        }
        if let Some(max) = layout.max_font_size
            && max < layout.min_font_size
        {
            return Err(invalid(format!(
                "max_font_size {} below min_font_size {}",
                max, layout.min_font_size
            )));
        }
        Ok(())
    }
}

fn invalid(message: impl Into<String>) -> CloudError {
    CloudError::InvalidConfig(message.into())
}
