//! Layout configuration

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::color::ColorScheme;

/// Packing parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Padding around each fragment box, in pixels
    pub margin: u32,
    /// Fragments that do not fit at this size are skipped
    pub min_font_size: u32,
    /// Fixed base size; computed from the canvas when unset
    pub max_font_size: Option<u32>,
    /// Size decrement unit when a fragment does not fit
    pub font_step: u32,
    /// Keep at most this many fragments (heaviest first)
    pub max_fragments: usize,
    /// Rotation is attempted when this is below 1.0
    pub prefer_horizontal: f64,
    /// Starting size is `frequency * base * size_multiplier`
    pub size_multiplier: f64,
    /// Fragments longer than this many characters are shrunk by `long_factor`
    pub long_threshold: usize,
    pub long_factor: f64,
    /// Fragments longer than this many characters are shrunk by `medium_factor`
    pub medium_threshold: usize,
    pub medium_factor: f64,
    pub color_scheme: ColorScheme,
    /// Seed for positions and colors; random when unset
    pub seed: Option<u64>,
    /// Font used when a fragment's own font cannot be loaded
    pub default_font: Option<PathBuf>,
    /// Pick fonts from every script in a fragment instead of the dominant one
    pub multilingual_fonts: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            margin: 10,
            min_font_size: 12,
            max_font_size: None,
            font_step: 1,
            max_fragments: 200,
            prefer_horizontal: 0.8,
            size_multiplier: 1.5,
            long_threshold: 60,
            long_factor: 0.6,
            medium_threshold: 35,
            medium_factor: 0.8,
            color_scheme: ColorScheme::Viridis,
            seed: None,
            default_font: None,
            multilingual_fonts: false,
        }
    }
}

impl LayoutConfig {
    /// Whether a rotated attempt is made before shrinking
    pub fn allows_rotation(&self) -> bool {
        self.prefer_horizontal < 1.0
    }

    /// Smallest size tried; zero is treated as one
    pub fn min_size(&self) -> u32 {
        self.min_font_size.max(1)
    }

    /// Size decrement applied after a failed attempt
    pub fn shrink_step(&self) -> u32 {
        (self.font_step / 2).max(1)
    }
}
