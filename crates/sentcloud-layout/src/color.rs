//! Colors and color schemes

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Color (RGBA)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255, a: 255 };
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0, a: 255 };
    pub const TRANSPARENT: Color = Color { r: 0, g: 0, b: 0, a: 0 };
    pub const RED: Color = Color { r: 255, g: 0, b: 0, a: 255 };
    pub const GREEN: Color = Color { r: 0, g: 128, b: 0, a: 255 };
    pub const BLUE: Color = Color { r: 0, g: 0, b: 255, a: 255 };

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// From a packed `0xRRGGBB` value
    pub const fn from_u24(rgb: u32) -> Self {
        Self::rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
    }

    /// Create from hex string (e.g., "#ff0000")
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.is_ascii() {
            return None;
        }

        match hex.len() {
            3 => {
                let r = u8::from_str_radix(&hex[0..1], 16).ok()?;
                let g = u8::from_str_radix(&hex[1..2], 16).ok()?;
                let b = u8::from_str_radix(&hex[2..3], 16).ok()?;
                Some(Color::rgb(r * 17, g * 17, b * 17))
            }
            6 => {
                let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                Some(Color::rgb(r, g, b))
            }
            8 => {
                let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                let a = u8::from_str_radix(&hex[6..8], 16).ok()?;
                Some(Color::rgba(r, g, b, a))
            }
            _ => None,
        }
    }

    /// Parse `rgb(r, g, b)`
    fn from_rgb_function(s: &str) -> Option<Self> {
        let inner = s.strip_prefix("rgb(")?.strip_suffix(')')?;
        let mut parts = inner.split(',').map(|p| p.trim().parse::<u8>());
        let r = parts.next()?.ok()?;
        let g = parts.next()?.ok()?;
        let b = parts.next()?.ok()?;
        if parts.next().is_some() {
            return None;
        }
        Some(Color::rgb(r, g, b))
    }

    fn from_name(name: &str) -> Option<Self> {
        let color = match name {
            "white" => Color::WHITE,
            "black" => Color::BLACK,
            "transparent" => Color::TRANSPARENT,
            "red" => Color::RED,
            "green" => Color::GREEN,
            "blue" => Color::BLUE,
            "gray" | "grey" => Color::rgb(128, 128, 128),
            "lightgray" | "lightgrey" => Color::rgb(211, 211, 211),
            "darkgray" | "darkgrey" => Color::rgb(169, 169, 169),
            "yellow" => Color::rgb(255, 255, 0),
            "orange" => Color::rgb(255, 165, 0),
            "purple" => Color::rgb(128, 0, 128),
            "navy" => Color::rgb(0, 0, 128),
            "teal" => Color::rgb(0, 128, 128),
            "ivory" => Color::rgb(255, 255, 240),
            "beige" => Color::rgb(245, 245, 220),
            _ => return None,
        };
        Some(color)
    }

    /// Linear interpolation between two colors
    pub fn lerp(self, other: Color, t: f64) -> Color {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Color::rgba(
            mix(self.r, other.r),
            mix(self.g, other.g),
            mix(self.b, other.b),
            mix(self.a, other.a),
        )
    }
}

/// Unparseable color string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid color: {0:?}")]
pub struct InvalidColor(pub String);

impl FromStr for Color {
    type Err = InvalidColor;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Color::from_name(&normalized)
            .or_else(|| Color::from_rgb_function(&normalized))
            .or_else(|| Color::from_hex(&normalized))
            .ok_or_else(|| InvalidColor(s.to_string()))
    }
}

impl TryFrom<String> for Color {
    type Error = InvalidColor;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

/// Named colormap used to color placed fragments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ColorScheme {
    #[default]
    Viridis,
    Plasma,
    Inferno,
    Magma,
    Cividis,
    Ocean,
    Sunset,
    Forest,
    Berry,
    Monochrome,
    Rainbow,
}

const VIRIDIS: &[u32] = &[
    0x440154, 0x482878, 0x3e4989, 0x31688e, 0x26828e, 0x1f9e89, 0x35b779, 0x6ece58, 0xb5de2b,
    0xfde725,
];
const PLASMA: &[u32] = &[
    0x0d0887, 0x46039f, 0x7201a8, 0x9c179e, 0xbd3786, 0xd8576b, 0xed7953, 0xfb9f3a, 0xfdca26,
    0xf0f921,
];
const INFERNO: &[u32] = &[
    0x000004, 0x1b0c41, 0x4a0c6b, 0x781c6d, 0xa52c60, 0xcf4446, 0xed6925, 0xfb9b06, 0xf7d13d,
    0xfcffa4,
];
const MAGMA: &[u32] = &[
    0x000004, 0x180f3d, 0x440f76, 0x721f81, 0x9e2f7f, 0xcd4071, 0xf1605d, 0xfd9668, 0xfeca8d,
    0xfcfdbf,
];
const CIVIDIS: &[u32] = &[
    0x00224e, 0x123570, 0x3b496c, 0x575d6d, 0x707173, 0x8a8678, 0xa59c74, 0xc3b369, 0xe1cc55,
    0xfee838,
];
const OCEAN: &[u32] = &[0x264653, 0x287271, 0x2a9d8f, 0x8ab17d, 0xe9c46a];
const SUNSET: &[u32] = &[0xf94144, 0xf3722c, 0xf8961e, 0xf9844a, 0xf9c74f];
const FOREST: &[u32] = &[0x2d6a4f, 0x40916c, 0x52b788, 0x74c69d, 0x95d5b2];
const BERRY: &[u32] = &[0x7b2cbf, 0x9d4edd, 0xc77dff, 0xe0aaff, 0xff6d00];
const MONOCHROME: &[u32] = &[0x212529, 0x495057, 0x6c757d, 0xadb5bd, 0xced4da];
const RAINBOW: &[u32] = &[0xe63946, 0xf4a261, 0xe9c46a, 0x2a9d8f, 0x457b9d, 0x7b2cbf];

impl ColorScheme {
    pub const ALL: [ColorScheme; 11] = [
        ColorScheme::Viridis,
        ColorScheme::Plasma,
        ColorScheme::Inferno,
        ColorScheme::Magma,
        ColorScheme::Cividis,
        ColorScheme::Ocean,
        ColorScheme::Sunset,
        ColorScheme::Forest,
        ColorScheme::Berry,
        ColorScheme::Monochrome,
        ColorScheme::Rainbow,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ColorScheme::Viridis => "viridis",
            ColorScheme::Plasma => "plasma",
            ColorScheme::Inferno => "inferno",
            ColorScheme::Magma => "magma",
            ColorScheme::Cividis => "cividis",
            ColorScheme::Ocean => "ocean",
            ColorScheme::Sunset => "sunset",
            ColorScheme::Forest => "forest",
            ColorScheme::Berry => "berry",
            ColorScheme::Monochrome => "monochrome",
            ColorScheme::Rainbow => "rainbow",
        }
    }

    fn stops(self) -> &'static [u32] {
        match self {
            ColorScheme::Viridis => VIRIDIS,
            ColorScheme::Plasma => PLASMA,
            ColorScheme::Inferno => INFERNO,
            ColorScheme::Magma => MAGMA,
            ColorScheme::Cividis => CIVIDIS,
            ColorScheme::Ocean => OCEAN,
            ColorScheme::Sunset => SUNSET,
            ColorScheme::Forest => FOREST,
            ColorScheme::Berry => BERRY,
            ColorScheme::Monochrome => MONOCHROME,
            ColorScheme::Rainbow => RAINBOW,
        }
    }

    /// Continuous colormaps interpolate; palettes pick a swatch
    pub fn is_gradient(self) -> bool {
        matches!(
            self,
            ColorScheme::Viridis
                | ColorScheme::Plasma
                | ColorScheme::Inferno
                | ColorScheme::Magma
                | ColorScheme::Cividis
        )
    }

    /// Color at position `u` in [0, 1]
    pub fn sample(self, u: f64) -> Color {
        let stops = self.stops();
        let u = if u.is_finite() { u.clamp(0.0, 1.0) } else { 0.0 };

        if self.is_gradient() {
            let scaled = u * (stops.len() - 1) as f64;
            let lo = (scaled.floor() as usize).min(stops.len() - 1);
            let hi = (lo + 1).min(stops.len() - 1);
            Color::from_u24(stops[lo]).lerp(Color::from_u24(stops[hi]), scaled - lo as f64)
        } else {
            let idx = ((u * stops.len() as f64) as usize).min(stops.len() - 1);
            Color::from_u24(stops[idx])
        }
    }
}

impl fmt::Display for ColorScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unknown colormap name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown color scheme: {0:?}")]
pub struct UnknownColorScheme(pub String);

impl FromStr for ColorScheme {
    type Err = UnknownColorScheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|scheme| scheme.name() == lower)
            .ok_or_else(|| UnknownColorScheme(s.to_string()))
    }
}

impl TryFrom<String> for ColorScheme {
    type Error = UnknownColorScheme;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ColorScheme> for String {
    fn from(scheme: ColorScheme) -> Self {
        scheme.name().to_string()
    }
}
