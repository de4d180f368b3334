//! Layout output types

use serde::{Deserialize, Serialize};

use sentcloud_text::{FontSource, ScriptTag, TextExtent};

use crate::color::Color;
use crate::occupancy::Position;

/// Text direction of a placed fragment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    #[default]
    Horizontal,
    /// Turned 90 degrees counter-clockwise
    Rotated90,
}

impl Orientation {
    /// Box occupied by text of the given unrotated extent
    pub fn apply(self, extent: TextExtent) -> TextExtent {
        match self {
            Orientation::Horizontal => extent,
            Orientation::Rotated90 => extent.rotated(),
        }
    }
}

/// Axis-aligned pixel rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

/// A fragment fixed on the canvas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutRecord {
    pub text: String,
    pub frequency: f64,
    pub font_size: u32,
    /// Top-left pixel of the text box
    pub x: u32,
    pub y: u32,
    pub orientation: Orientation,
    pub color: Color,
    pub font: FontSource,
    pub script: ScriptTag,
    /// Oriented text box, without margin
    pub width: u32,
    pub height: u32,
}

impl LayoutRecord {
    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }

    /// Text box on the canvas
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Rectangle committed to the occupancy map for this record
    pub fn footprint(&self, margin: u32) -> Rect {
        let half = margin / 2;
        Rect::new(
            self.x - half,
            self.y - half,
            self.width + margin,
            self.height + margin,
        )
    }
}

/// Why a fragment was left out
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// No free window even at the minimum size
    NoSpace,
    /// Neither the fragment's font nor the default font could be loaded
    FontUnavailable(String),
}

/// A fragment that did not make it onto the canvas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedFragment {
    pub text: String,
    pub frequency: f64,
    pub reason: SkipReason,
}

/// Result of placing one fragment
#[derive(Debug, Clone, PartialEq)]
pub enum PlacementOutcome {
    Placed(LayoutRecord),
    Skipped(SkippedFragment),
}

/// Complete layout of a cloud
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Layout {
    pub width: u32,
    pub height: u32,
    /// Margin the footprints were committed with
    pub margin: u32,
    /// Size the starting sizes were derived from
    pub base_font_size: u32,
    /// Placed fragments, in placement order
    pub records: Vec<LayoutRecord>,
    pub skipped: Vec<SkippedFragment>,
}

impl Layout {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Committed footprints of all records
    pub fn footprints(&self) -> impl Iterator<Item = Rect> + '_ {
        self.records.iter().map(|r| r.footprint(self.margin))
    }
}
