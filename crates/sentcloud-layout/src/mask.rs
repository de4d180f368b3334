//! Binary pixel masks
//!
//! A [`Mask`] marks cells that are unavailable. It is used both for the
//! shape of the canvas (loaded from an image) and for the footprint a
//! placed fragment commits to the occupancy map.

use std::path::Path;

use image::{DynamicImage, GenericImageView};

use crate::{LayoutError, Result};

/// Grid of blocked/free cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    width: u32,
    height: u32,
    cells: Vec<bool>,
}

impl Mask {
    /// All cells free
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cells: vec![false; width as usize * height as usize],
        }
    }

    /// All cells blocked
    pub fn filled(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cells: vec![true; width as usize * height as usize],
        }
    }

    /// Shape mask from an image.
    ///
    /// Pure white pixels are drawable unless mostly transparent (alpha < 128);
    /// every other pixel is blocked. The mask takes the image's dimensions.
    pub fn from_image(image: &DynamicImage) -> Self {
        let (width, height) = image.dimensions();
        let rgba = image.to_rgba8();
        let cells = rgba
            .pixels()
            .map(|p| {
                let [r, g, b, a] = p.0;
                a < 128 || !(r == 255 && g == 255 && b == 255)
            })
            .collect();
        Self {
            width,
            height,
            cells,
        }
    }

    /// Load a shape mask from an image file
    pub fn from_image_path(path: &Path) -> Result<Self> {
        let image = image::open(path).map_err(|source| LayoutError::Mask {
            path: path.to_path_buf(),
            source,
        })?;
        let mask = Self::from_image(&image);
        tracing::debug!(
            "Loaded mask {} ({}x{}, {} blocked)",
            path.display(),
            mask.width,
            mask.height,
            mask.blocked_count()
        );
        Ok(mask)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Whether the cell is blocked; out-of-bounds cells read as free
    pub fn get(&self, x: u32, y: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        self.cells[self.index(x, y)]
    }

    /// Mark a cell; out-of-bounds writes are ignored
    pub fn set(&mut self, x: u32, y: u32, blocked: bool) {
        if x < self.width && y < self.height {
            let idx = self.index(x, y);
            self.cells[idx] = blocked;
        }
    }

    /// Number of blocked cells
    pub fn blocked_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}
