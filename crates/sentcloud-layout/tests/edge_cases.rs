//! Edge case tests for sentcloud-layout
//!
//! Placement properties checked against deterministic stand-in backends so
//! no installed fonts are needed.

use sentcloud_layout::*;
use sentcloud_text::{FontResolver, FontSource, FontTable, TextBackend, TextError, TextExtent, TextOutline};

/// Monospace stand-in: 0.6em per character, 1.2em line
#[derive(Default)]
struct FixedBackend {
    measures: usize,
}

impl TextBackend for FixedBackend {
    fn measure(&mut self, _font: &FontSource, text: &str, size: f32) -> sentcloud_text::Result<TextExtent> {
        self.measures += 1;
        let chars = text.chars().count() as f32;
        Ok(TextExtent::new(
            (chars * size * 0.6).ceil() as u32,
            (size * 1.2).ceil() as u32,
        ))
    }

    fn outline(&mut self, font: &FontSource, text: &str, size: f32) -> sentcloud_text::Result<TextOutline> {
        let extent = self.measure(font, text, size)?;
        Ok(TextOutline { extent, path: None })
    }
}

/// Fails for font files, works for the system default
struct NoFileFonts;

impl TextBackend for NoFileFonts {
    fn measure(&mut self, font: &FontSource, text: &str, size: f32) -> sentcloud_text::Result<TextExtent> {
        match font {
            FontSource::File(path) => Err(TextError::FontParsing(format!("{} is broken", path.display()))),
            FontSource::SystemDefault => FixedBackend::default().measure(font, text, size),
        }
    }

    fn outline(&mut self, font: &FontSource, text: &str, size: f32) -> sentcloud_text::Result<TextOutline> {
        let extent = self.measure(font, text, size)?;
        Ok(TextOutline { extent, path: None })
    }
}

/// Every call fails with the given error
struct Broken(fn() -> TextError);

impl TextBackend for Broken {
    fn measure(&mut self, _font: &FontSource, _text: &str, _size: f32) -> sentcloud_text::Result<TextExtent> {
        Err((self.0)())
    }

    fn outline(&mut self, _font: &FontSource, _text: &str, _size: f32) -> sentcloud_text::Result<TextOutline> {
        Err((self.0)())
    }
}

fn seeded(seed: u64) -> LayoutConfig {
    LayoutConfig {
        seed: Some(seed),
        ..LayoutConfig::default()
    }
}

fn resolver() -> FontResolver {
    FontResolver::new(FontTable::empty())
}

fn fragments(items: &[(&str, u64)]) -> Vec<Fragment> {
    items.iter().map(|&(text, weight)| Fragment::new(text, weight)).collect()
}

fn assert_no_overlap(layout: &Layout) {
    let boxes: Vec<Rect> = layout.footprints().collect();
    for (i, a) in boxes.iter().enumerate() {
        assert!(a.right() <= layout.width && a.bottom() <= layout.height, "{a:?} leaves the canvas");
        for b in &boxes[i + 1..] {
            assert!(!a.intersects(b), "{a:?} overlaps {b:?}");
        }
    }
}

// ============================================================================
// PLACEMENT PROPERTIES
// ============================================================================

#[test]
fn test_two_sentences_on_default_canvas() {
    let mut engine = LayoutEngine::new(seeded(42), resolver(), FixedBackend::default());
    let input = fragments(&[("You are amazing!", 3), ("Eres increíble!", 1)]);
    let layout = engine.layout(&input, 800, 400).unwrap();

    assert_eq!((layout.width, layout.height), (800, 400));
    assert_eq!(layout.base_font_size, 50);
    assert_eq!(layout.len(), 2);
    assert!(layout.skipped.is_empty());

    assert_eq!(layout.records[0].text, "You are amazing!");
    assert_eq!(layout.records[0].frequency, 1.0);
    assert_eq!(layout.records[0].font_size, 75);
    assert_eq!(layout.records[1].font_size, 24);
    assert!(layout.records[0].font_size > layout.records[1].font_size);
    assert_no_overlap(&layout);
}

#[test]
fn test_many_fragments_never_overlap() {
    let input: Vec<Fragment> = (0..60)
        .map(|i| Fragment::new(format!("sentence number {i}"), (i % 7 + 1) as u64))
        .collect();
    let mut engine = LayoutEngine::new(seeded(3), resolver(), FixedBackend::default());
    let layout = engine.layout(&input, 400, 300).unwrap();

    assert!(!layout.is_empty());
    assert_eq!(layout.len() + layout.skipped.len(), 60);
    assert_no_overlap(&layout);
}

#[test]
fn test_record_count_bounded_by_max_fragments() {
    let input: Vec<Fragment> = (0..10).map(|i| Fragment::new(format!("item {i}"), 1)).collect();
    let config = LayoutConfig {
        max_fragments: 4,
        ..seeded(5)
    };
    let mut engine = LayoutEngine::new(config, resolver(), FixedBackend::default());
    let layout = engine.layout(&input, 800, 400).unwrap();

    assert!(layout.len() <= 4);
    assert_eq!(layout.len() + layout.skipped.len(), 4);
}

#[test]
fn test_duplicates_lay_out_like_aggregate() {
    let split = fragments(&[("hi", 1), ("hi", 2)]);
    let merged = fragments(&[("hi", 3)]);

    let a = LayoutEngine::new(seeded(9), resolver(), FixedBackend::default())
        .layout(&split, 800, 400)
        .unwrap();
    let b = LayoutEngine::new(seeded(9), resolver(), FixedBackend::default())
        .layout(&merged, 800, 400)
        .unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_same_seed_same_layout() {
    let input = fragments(&[("alpha", 5), ("beta", 3), ("gamma", 2), ("delta", 1)]);
    let run = |seed| {
        LayoutEngine::new(seeded(seed), resolver(), FixedBackend::default())
            .layout(&input, 600, 300)
            .unwrap()
    };
    assert_eq!(run(11), run(11));
}

#[test]
fn test_empty_input_is_error() {
    let mut engine = LayoutEngine::new(seeded(1), resolver(), FixedBackend::default());
    assert!(matches!(engine.layout(&[], 800, 400), Err(LayoutError::EmptyInput)));
}

#[test]
fn test_script_and_default_font_recorded() {
    let mut engine = LayoutEngine::new(seeded(1), resolver(), FixedBackend::default());
    let layout = engine.layout(&fragments(&[("שלום עולם", 2), ("你好", 1)]), 800, 400).unwrap();

    assert_eq!(layout.records[0].script, sentcloud_text::ScriptTag::Hebrew);
    assert_eq!(layout.records[1].script, sentcloud_text::ScriptTag::Cjk);
    assert!(layout.records.iter().all(|r| r.font == FontSource::SystemDefault));
}

// ============================================================================
// BACKOFF AND ROTATION
// ============================================================================

#[test]
fn test_backoff_terminates_with_no_space() {
    let mut backend = FixedBackend::default();
    let mut engine = LayoutEngine::new(seeded(2), resolver(), &mut backend);
    let layout = engine
        .layout(&fragments(&[("this sentence will never fit here", 1)]), 60, 60)
        .unwrap();

    assert!(layout.is_empty());
    assert_eq!(layout.skipped[0].reason, SkipReason::NoSpace);

    // Sizes 45 down to 12, plus one rotated attempt at the first size
    assert_eq!(backend.measures, (45 - 12 + 1) + 1);
}

#[test]
fn test_backoff_uses_half_font_step() {
    let config = LayoutConfig {
        font_step: 4,
        ..seeded(2)
    };
    let mut backend = FixedBackend::default();
    let mut engine = LayoutEngine::new(config, resolver(), &mut backend);
    engine
        .layout(&fragments(&[("this sentence will never fit here", 1)]), 60, 60)
        .unwrap();

    // 45, 43, ..., 13
    assert_eq!(backend.measures, 17 + 1);
}

#[test]
fn test_backoff_terminates_with_zero_min_size() {
    let config = LayoutConfig {
        min_font_size: 0,
        ..seeded(1)
    };
    let mut backend = FixedBackend::default();
    let mut engine = LayoutEngine::new(config, resolver(), &mut backend);
    let layout = engine.layout(&fragments(&[("hello", 1)]), 5, 5).unwrap();

    assert!(layout.is_empty());
    assert_eq!(layout.skipped[0].reason, SkipReason::NoSpace);
    // Sizes 45 down to 1, plus one rotated attempt
    assert_eq!(backend.measures, 45 + 1);
}

#[test]
fn test_rotation_used_when_only_vertical_fits() {
    let config = LayoutConfig {
        margin: 0,
        max_font_size: Some(20),
        ..seeded(4)
    };
    let mut engine = LayoutEngine::new(config, resolver(), FixedBackend::default());
    let layout = engine.layout(&fragments(&[("abcdefgh", 1)]), 40, 400).unwrap();

    let record = &layout.records[0];
    assert_eq!(record.orientation, Orientation::Rotated90);
    assert_eq!(record.font_size, 30);
    assert!(record.width <= 40);
    assert!(record.height > record.width);
}

#[test]
fn test_horizontal_only_skips_instead_of_rotating() {
    let config = LayoutConfig {
        margin: 0,
        max_font_size: Some(20),
        prefer_horizontal: 1.0,
        ..seeded(4)
    };
    let mut engine = LayoutEngine::new(config, resolver(), FixedBackend::default());
    let layout = engine.layout(&fragments(&[("abcdefgh", 1)]), 40, 400).unwrap();

    assert!(layout.is_empty());
    assert_eq!(layout.skipped[0].reason, SkipReason::NoSpace);
}

// ============================================================================
// FONT FAILURES
// ============================================================================

#[test]
fn test_font_failure_falls_back_to_default() {
    let file = tempfile::NamedTempFile::new().unwrap();
    let table = FontTable::empty().with_fallback(file.path().to_string_lossy().into_owned());
    let mut engine = LayoutEngine::new(seeded(6), FontResolver::new(table), NoFileFonts);

    let layout = engine.layout(&fragments(&[("hello world", 1)]), 800, 400).unwrap();
    assert_eq!(layout.len(), 1);
    assert_eq!(layout.records[0].font, FontSource::SystemDefault);
}

#[test]
fn test_font_failure_everywhere_skips() {
    let mut engine = LayoutEngine::new(
        seeded(6),
        resolver(),
        Broken(|| TextError::FontNotFound("nothing installed".into())),
    );
    let layout = engine.layout(&fragments(&[("hello", 2), ("world", 1)]), 800, 400).unwrap();

    assert!(layout.is_empty());
    assert_eq!(layout.skipped.len(), 2);
    assert!(matches!(layout.skipped[0].reason, SkipReason::FontUnavailable(_)));
}

#[test]
fn test_other_backend_errors_are_fatal() {
    let mut engine = LayoutEngine::new(
        seeded(6),
        resolver(),
        Broken(|| TextError::ShapingFailed("no glyphs".into())),
    );
    let result = engine.layout(&fragments(&[("hello", 1)]), 800, 400);
    assert!(matches!(result, Err(LayoutError::Text(TextError::ShapingFailed(_)))));
}

// ============================================================================
// MASKS
// ============================================================================

#[test]
fn test_mask_restricts_placement() {
    let mut mask = Mask::new(300, 200);
    for y in 0..200 {
        for x in 0..150 {
            mask.set(x, y, true);
        }
    }
    let input = fragments(&[("left", 3), ("right", 2), ("center", 1)]);
    let mut engine = LayoutEngine::new(seeded(8), resolver(), FixedBackend::default());
    let layout = engine.layout_with_mask(&input, &mask).unwrap();

    assert_eq!((layout.width, layout.height), (300, 200));
    assert!(!layout.is_empty());
    assert!(layout.footprints().all(|rect| rect.x >= 150));
    assert_no_overlap(&layout);
}

#[test]
fn test_mask_image_places_on_white() {
    // Black frame, white 100x60 window at (50, 20)
    let mut img = image::RgbImage::from_pixel(200, 100, image::Rgb([0, 0, 0]));
    for y in 20..80 {
        for x in 50..150 {
            img.put_pixel(x, y, image::Rgb([255, 255, 255]));
        }
    }
    let mask = Mask::from_image(&image::DynamicImage::ImageRgb8(img));
    let input = fragments(&[("inside", 2), ("also", 1)]);
    let mut engine = LayoutEngine::new(seeded(3), resolver(), FixedBackend::default());
    let layout = engine.layout_with_mask(&input, &mask).unwrap();

    assert!(!layout.is_empty());
    for rect in layout.footprints() {
        assert!(rect.x >= 50 && rect.right() <= 150, "{rect:?}");
        assert!(rect.y >= 20 && rect.bottom() <= 80, "{rect:?}");
    }
}

#[test]
fn test_fully_blocked_mask_places_nothing() {
    let mask = Mask::filled(100, 100);
    let mut engine = LayoutEngine::new(seeded(8), resolver(), FixedBackend::default());
    let layout = engine.layout_with_mask(&fragments(&[("hello", 1)]), &mask).unwrap();
    assert!(layout.is_empty());
    assert_eq!(layout.skipped[0].reason, SkipReason::NoSpace);
}
