//! Pipeline: fragments to layout to canvas

use std::marker::PhantomData;
use std::path::Path;

use sentcloud_layout::{Fragment, Layout, LayoutEngine, Mask};
use sentcloud_render::{Canvas, Compositor, RenderReport};
use sentcloud_text::{FontBackend, FontResolver, FontSource, TextBackend};

use crate::config::CloudConfig;
use crate::sentences;
use crate::Result;

/// A finished render
#[derive(Debug, Clone)]
pub struct CloudOutput {
    pub layout: Layout,
    pub canvas: Canvas,
    pub report: RenderReport,
}

impl CloudOutput {
    pub fn encode_png(&self) -> Result<Vec<u8>> {
        Ok(self.canvas.encode_png()?)
    }

    pub fn save_png(&self, path: &Path) -> Result<()> {
        Ok(self.canvas.save_png(path)?)
    }
}

/// Sentence cloud renderer.
///
/// Every render builds its own backend, so font caches, the occupancy map
/// and the random generator never outlive a call.
pub struct SentenceCloud<B = FontBackend> {
    config: CloudConfig,
    backend: PhantomData<fn() -> B>,
}

impl SentenceCloud {
    /// Renderer reading real font files
    pub fn new(config: CloudConfig) -> Result<Self> {
        Self::for_backend(config)
    }
}

impl<B: TextBackend + Default> SentenceCloud<B> {
    /// Renderer measuring and outlining text with `B`
    pub fn for_backend(config: CloudConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            backend: PhantomData,
        })
    }

    pub fn config(&self) -> &CloudConfig {
        &self.config
    }

    /// Lay out and draw weighted fragments
    pub fn render(&self, fragments: &[Fragment]) -> Result<CloudOutput> {
        let mut backend = B::default();
        let resolver = FontResolver::new(self.config.fonts.clone());
        let mask = match &self.config.mask {
            Some(path) => Some(Mask::from_image_path(path)?),
            None => None,
        };

        let layout = {
            let mut engine = LayoutEngine::new(self.config.layout.clone(), resolver, &mut backend);
            match &mask {
                Some(mask) => engine.layout_with_mask(fragments, mask)?,
                None => engine.layout(fragments, self.config.canvas.width, self.config.canvas.height)?,
            }
        };

        let default_font = FontSource::from_resolved(self.config.layout.default_font.clone());
        let mut compositor = Compositor::new(&mut backend).with_default_font(default_font);
        if let Some(mask) = mask {
            compositor = compositor.with_mask(mask);
        }
        let (canvas, report) = compositor.render_with_report(&layout, &self.config.canvas)?;

        tracing::info!(
            "Sentence cloud: {} placed, {} skipped, {} dropped",
            layout.records.len(),
            layout.skipped.len(),
            report.dropped
        );
        Ok(CloudOutput {
            layout,
            canvas,
            report,
        })
    }

    /// Render straight to PNG bytes
    pub fn render_png(&self, fragments: &[Fragment]) -> Result<Vec<u8>> {
        self.render(fragments)?.encode_png()
    }

    /// Split free text into sentences, then render them
    pub fn render_text(&self, text: &str) -> Result<CloudOutput> {
        self.render(&sentences::fragments_from_text(text))
    }
}
