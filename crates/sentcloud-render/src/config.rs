//! Canvas configuration

use serde::{Deserialize, Serialize};

use crate::Color;

/// Output raster parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Layout width in pixels
    pub width: u32,
    /// Layout height in pixels
    pub height: u32,
    pub background: Color,
    /// Output resolution multiplier
    pub scale: f32,
    /// Mask outline thickness in output pixels; 0 disables the outline
    pub contour_width: u32,
    pub contour_color: Color,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 400,
            background: Color::WHITE,
            scale: 1.0,
            contour_width: 0,
            contour_color: Color::BLACK,
        }
    }
}

impl CanvasConfig {
    /// Output size for a layout of the given size
    pub fn scaled_size(&self, width: u32, height: u32) -> (u32, u32) {
        (scale_px(width, self.scale), scale_px(height, self.scale))
    }
}

/// `floor(value * scale)`
pub(crate) fn scale_px(value: u32, scale: f32) -> u32 {
    (value as f64 * scale as f64).floor() as u32
}
