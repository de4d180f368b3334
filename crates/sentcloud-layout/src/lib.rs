//! sentcloud Layout - Sentence placement
//!
//! Packs weighted text fragments onto a canvas:
//! - Fragment cleaning, deduplication and normalization
//! - Occupancy tracking with a summed-area table
//! - Greedy placement with size backoff and optional rotation
//! - Colormaps for placed fragments
//! - Shape masks

pub mod color;
pub mod config;
pub mod engine;
pub mod fragment;
pub mod mask;
pub mod occupancy;
pub mod record;

pub use color::{Color, ColorScheme, InvalidColor, UnknownColorScheme};
pub use config::LayoutConfig;
pub use engine::LayoutEngine;
pub use fragment::{Fragment, NormalizedFragment};
pub use mask::Mask;
pub use occupancy::{OccupancyMap, Position};
pub use record::{
    Layout, LayoutRecord, Orientation, PlacementOutcome, Rect, SkipReason, SkippedFragment,
};

use std::path::PathBuf;

use sentcloud_text::TextError;

/// Layout error types
#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    #[error("No fragments to lay out")]
    EmptyInput,

    #[error("Invalid canvas size {width}x{height}")]
    InvalidCanvas { width: u32, height: u32 },

    #[error("Failed to load mask {path}: {source}")]
    Mask {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Text error: {0}")]
    Text(#[from] TextError),
}

pub type Result<T> = std::result::Result<T, LayoutError>;
