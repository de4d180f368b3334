//! Integration tests for the sentcloud pipeline
//!
//! Most tests render through a stand-in backend drawing solid text boxes;
//! the real-font test skips on machines without fonts.

use std::path::PathBuf;

use image::{Rgba, RgbaImage};
use sentcloud::*;
use sentcloud_text::{FontDatabase, TextBackend, TextExtent, TextOutline};

/// Monospace solid boxes: 0.6em per character, 1.2em line
#[derive(Default)]
struct BoxBackend;

impl TextBackend for BoxBackend {
    fn measure(&mut self, _font: &FontSource, text: &str, size: f32) -> sentcloud_text::Result<TextExtent> {
        let chars = text.chars().count() as f32;
        Ok(TextExtent::new(
            (chars * size * 0.6).ceil() as u32,
            (size * 1.2).ceil() as u32,
        ))
    }

    fn outline(&mut self, font: &FontSource, text: &str, size: f32) -> sentcloud_text::Result<TextOutline> {
        let extent = self.measure(font, text, size)?;
        let path = tiny_skia_rect(extent);
        Ok(TextOutline { extent, path })
    }
}

fn tiny_skia_rect(extent: TextExtent) -> Option<tiny_skia::Path> {
    let rect = tiny_skia::Rect::from_xywh(0.0, 0.0, extent.width as f32, extent.height as f32)?;
    Some(tiny_skia::PathBuilder::from_rect(rect))
}

fn seeded() -> CloudConfig {
    let mut config = CloudConfig::default();
    config.layout.seed = Some(42);
    config.fonts = FontTable::empty();
    config
}

fn cloud(config: CloudConfig) -> SentenceCloud<BoxBackend> {
    SentenceCloud::<BoxBackend>::for_backend(config).unwrap()
}

fn two_sentences() -> Vec<Fragment> {
    vec![
        Fragment::new("You are amazing!", 3),
        Fragment::new("Eres increíble!", 1),
    ]
}

fn assert_disjoint(layout: &Layout) {
    let boxes: Vec<_> = layout.footprints().collect();
    for (i, a) in boxes.iter().enumerate() {
        for b in &boxes[i + 1..] {
            assert!(!a.intersects(b), "{a:?} overlaps {b:?}");
        }
    }
}

// ============================================================================
// END TO END
// ============================================================================

#[test]
fn test_two_sentences_default_canvas() {
    let output = cloud(seeded()).render(&two_sentences()).unwrap();

    assert_eq!((output.canvas.width(), output.canvas.height()), (800, 400));
    assert_eq!(output.layout.len(), 2);
    assert_eq!(output.report, RenderReport { drawn: 2, dropped: 0 });
    assert!(output.layout.records[0].font_size > output.layout.records[1].font_size);
    assert_disjoint(&output.layout);
}

#[test]
fn test_scaled_output() {
    let mut config = seeded();
    config.canvas.scale = 2.0;
    let output = cloud(config).render(&two_sentences()).unwrap();

    assert_eq!((output.canvas.width(), output.canvas.height()), (1600, 800));
    // Layout coordinates stay unscaled
    assert_eq!((output.layout.width, output.layout.height), (800, 400));
}

#[test]
fn test_same_seed_same_image() {
    let a = cloud(seeded()).render_png(&two_sentences()).unwrap();
    let b = cloud(seeded()).render_png(&two_sentences()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_render_png_decodes() {
    let mut config = seeded();
    config.canvas.width = 640;
    config.canvas.height = 480;
    let png = cloud(config).render_png(&two_sentences()).unwrap();

    let decoded = image::load_from_memory(&png).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (640, 480));
}

#[test]
fn test_render_text_splits_sentences() {
    let text = "Thank you so much!\nMuchas gracias!\nThank you so much!\nСпасибо большое";
    let output = cloud(seeded()).render_text(text).unwrap();

    assert_eq!(output.layout.len(), 3);
    assert_eq!(output.layout.records[0].text, "Thank you so much!");
    assert_eq!(output.layout.records[0].frequency, 1.0);
    let cyrillic = output
        .layout
        .records
        .iter()
        .find(|r| r.text == "Спасибо большое")
        .unwrap();
    assert_eq!(cyrillic.script, ScriptTag::Cyrillic);
}

#[test]
fn test_save_png() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cloud.png");
    cloud(seeded())
        .render(&two_sentences())
        .unwrap()
        .save_png(&path)
        .unwrap();

    let decoded = image::open(&path).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (800, 400));
}

// ============================================================================
// ERRORS
// ============================================================================

#[test]
fn test_empty_input_is_client_error() {
    let err = cloud(seeded()).render(&[]).unwrap_err();
    assert!(matches!(err, CloudError::EmptyInput));
    assert!(err.is_client_error());

    let err = cloud(seeded()).render_text("  \n ").unwrap_err();
    assert!(matches!(err, CloudError::EmptyInput));
}

#[test]
fn test_invalid_config_is_client_error() {
    let mut config = seeded();
    config.canvas.width = 5000;
    let err = SentenceCloud::<BoxBackend>::for_backend(config).err().unwrap();
    assert!(matches!(err, CloudError::InvalidConfig(_)));
    assert!(err.is_client_error());
}

#[test]
fn test_missing_mask_is_server_error() {
    let mut config = seeded();
    config.mask = Some(PathBuf::from("/nonexistent/mask.png"));
    let err = cloud(config).render(&two_sentences()).unwrap_err();
    assert!(matches!(err, CloudError::Layout(LayoutError::Mask { .. })));
    assert!(!err.is_client_error());
}

// ============================================================================
// MASKS
// ============================================================================

#[test]
fn test_mask_sets_canvas_and_region() {
    let dir = tempfile::tempdir().unwrap();
    let mask_path = dir.path().join("mask.png");

    // Left half black (blocked), right half white (drawable)
    let mut img = RgbaImage::from_pixel(600, 300, Rgba([255, 255, 255, 255]));
    for y in 0..300 {
        for x in 0..300 {
            img.put_pixel(x, y, Rgba([0, 0, 0, 255]));
        }
    }
    img.save(&mask_path).unwrap();

    let mut config = seeded();
    config.mask = Some(mask_path);
    config.canvas.contour_width = 2;
    let output = cloud(config).render(&two_sentences()).unwrap();

    assert_eq!((output.canvas.width(), output.canvas.height()), (600, 300));
    assert!(!output.layout.is_empty());
    assert!(output.layout.footprints().all(|rect| rect.x >= 300));
    // Contour along the mask edge
    assert_eq!(output.canvas.get_pixel(300, 150), Some(Color::BLACK));
}

// ============================================================================
// REAL FONTS
// ============================================================================

#[test]
fn test_system_fonts_render() {
    if FontDatabase::with_system_fonts().is_empty() {
        // Skip on systems without fonts
        return;
    }
    let mut config = CloudConfig::default();
    config.layout.seed = Some(1);
    let output = SentenceCloud::new(config)
        .unwrap()
        .render(&two_sentences())
        .unwrap();
    assert_eq!((output.canvas.width(), output.canvas.height()), (800, 400));
}
