//! Layout engine - greedy, size-descending placement
//!
//! Fragments are placed heaviest first. Each one starts at a size derived
//! from its frequency and is shrunk until a free window is found or it
//! falls below the minimum size.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use sentcloud_text::{FontResolver, FontSource, ScriptTag, TextBackend, TextExtent};

use crate::config::LayoutConfig;
use crate::fragment::{self, Fragment, NormalizedFragment};
use crate::mask::Mask;
use crate::occupancy::OccupancyMap;
use crate::record::{
    Layout, LayoutRecord, Orientation, PlacementOutcome, SkipReason, SkippedFragment,
};
use crate::{LayoutError, Result};

/// Places weighted fragments on a canvas
pub struct LayoutEngine<B> {
    config: LayoutConfig,
    resolver: FontResolver,
    backend: B,
}

impl<B: TextBackend> LayoutEngine<B> {
    pub fn new(config: LayoutConfig, resolver: FontResolver, backend: B) -> Self {
        Self {
            config,
            resolver,
            backend,
        }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Give the backend back, with whatever fonts it cached
    pub fn into_backend(self) -> B {
        self.backend
    }

    /// Lay out fragments on an empty `width x height` canvas
    pub fn layout(&mut self, fragments: &[Fragment], width: u32, height: u32) -> Result<Layout> {
        if width == 0 || height == 0 {
            return Err(LayoutError::InvalidCanvas { width, height });
        }
        self.run(fragments, OccupancyMap::new(width, height))
    }

    /// Lay out fragments inside the free cells of a shape mask
    pub fn layout_with_mask(&mut self, fragments: &[Fragment], mask: &Mask) -> Result<Layout> {
        if mask.width() == 0 || mask.height() == 0 {
            return Err(LayoutError::InvalidCanvas {
                width: mask.width(),
                height: mask.height(),
            });
        }
        self.run(fragments, OccupancyMap::with_mask(mask))
    }

    fn run(&mut self, fragments: &[Fragment], mut occupancy: OccupancyMap) -> Result<Layout> {
        let normalized = fragment::normalize(fragments, self.config.max_fragments);
        if normalized.is_empty() {
            return Err(LayoutError::EmptyInput);
        }

        let (width, height) = (occupancy.width(), occupancy.height());
        let base = self.base_font_size(&normalized, width, height);
        let mut rng = match self.config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_rng(&mut rand::rng()),
        };

        tracing::info!(
            "Laying out {} fragments on {}x{} (base size {})",
            normalized.len(),
            width,
            height,
            base
        );

        let mut layout = Layout {
            width,
            height,
            margin: self.config.margin,
            base_font_size: base,
            records: Vec::with_capacity(normalized.len()),
            skipped: Vec::new(),
        };

        for fragment in &normalized {
            match self.place(fragment, base, &mut occupancy, &mut rng)? {
                PlacementOutcome::Placed(record) => layout.records.push(record),
                PlacementOutcome::Skipped(skipped) => {
                    tracing::debug!("Skipped {:?}: {:?}", skipped.text, skipped.reason);
                    layout.skipped.push(skipped);
                }
            }
        }

        tracing::info!(
            "Placed {} of {} fragments ({} skipped)",
            layout.records.len(),
            normalized.len(),
            layout.skipped.len()
        );
        Ok(layout)
    }

    /// Reference size the per-fragment starting sizes scale from
    pub fn base_font_size(&self, fragments: &[NormalizedFragment], width: u32, height: u32) -> u32 {
        if let Some(size) = self.config.max_font_size {
            return size;
        }
        let first_len = fragments
            .first()
            .map(|f| f.text.chars().count() as u32)
            .unwrap_or(0);

        if fragments.len() == 1 {
            (height / 6).min(width / (first_len / 6).max(8)).max(30)
        } else {
            (height / 8).min(width / (first_len / 5).max(6)).max(25)
        }
    }

    /// First size tried for a fragment
    pub fn starting_font_size(&self, frequency: f64, len: usize, base: u32) -> u32 {
        let min = self.config.min_size();
        let scale = |size: u32, factor: f64| ((size as f64 * factor).floor() as u32).max(min);

        let start =
            ((frequency * base as f64 * self.config.size_multiplier).floor() as u32).max(min);
        if len > self.config.long_threshold {
            scale(start, self.config.long_factor)
        } else if len > self.config.medium_threshold {
            scale(start, self.config.medium_factor)
        } else {
            start
        }
    }

    fn font_for(&self, text: &str) -> FontSource {
        let resolved = if self.config.multilingual_fonts {
            self.resolver.resolve_for_text(text)
        } else {
            self.resolver.resolve(ScriptTag::detect(text))
        };
        FontSource::from_resolved(resolved)
    }

    fn default_font(&self) -> FontSource {
        FontSource::from_resolved(self.config.default_font.clone())
    }

    /// Find a spot for one fragment, shrinking it until it fits.
    ///
    /// Font failures switch the fragment to the default font once; any other
    /// backend error is returned.
    fn place<R: Rng + ?Sized>(
        &mut self,
        fragment: &NormalizedFragment,
        base: u32,
        occupancy: &mut OccupancyMap,
        rng: &mut R,
    ) -> Result<PlacementOutcome> {
        let script = ScriptTag::detect(&fragment.text);
        let len = fragment.text.chars().count();
        let margin = self.config.margin;
        let min = self.config.min_size();
        let step = self.config.shrink_step();

        let mut font = self.font_for(&fragment.text);
        let mut size = self.starting_font_size(fragment.frequency, len, base);
        let mut orientation = Orientation::Horizontal;
        let mut rotation_tried = false;
        let mut fell_back = false;

        while size >= min {
            let extent = match self.backend.measure(&font, &fragment.text, size as f32) {
                Ok(extent) => extent,
                Err(err) if err.is_font_failure() => {
                    if fell_back {
                        return Ok(skipped(fragment, SkipReason::FontUnavailable(err.to_string())));
                    }
                    tracing::warn!("Font {} failed for {:?} ({}), using default", font, fragment.text, err);
                    font = self.default_font();
                    fell_back = true;
                    continue;
                }
                Err(err) => return Err(err.into()),
            };

            let TextExtent { width, height } = orientation.apply(extent);
            let (box_w, box_h) = (width + margin, height + margin);

            if let Some(pos) = occupancy.sample(box_h, box_w, rng) {
                occupancy.commit_rect(pos.x, pos.y, box_w, box_h);
                let color = self.config.color_scheme.sample(rng.random::<f64>());
                tracing::debug!(
                    "Placed {:?} at ({}, {}) size {} {:?}",
                    fragment.text,
                    pos.x + margin / 2,
                    pos.y + margin / 2,
                    size,
                    orientation
                );
                return Ok(PlacementOutcome::Placed(LayoutRecord {
                    text: fragment.text.clone(),
                    frequency: fragment.frequency,
                    font_size: size,
                    x: pos.x + margin / 2,
                    y: pos.y + margin / 2,
                    orientation,
                    color,
                    font,
                    script,
                    width,
                    height,
                }));
            }

            if !rotation_tried && self.config.allows_rotation() {
                orientation = Orientation::Rotated90;
                rotation_tried = true;
            } else {
                size = size.saturating_sub(step);
                orientation = Orientation::Horizontal;
            }
        }

        Ok(skipped(fragment, SkipReason::NoSpace))
    }
}

fn skipped(fragment: &NormalizedFragment, reason: SkipReason) -> PlacementOutcome {
    PlacementOutcome::Skipped(SkippedFragment {
        text: fragment.text.clone(),
        frequency: fragment.frequency,
        reason,
    })
}
