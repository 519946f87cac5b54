//! Shrinking real glyphs through a real backend
//!
//! Covers the scenarios the shrinker has to get right: output size, hot
//! point alignment, alpha synthesis, caching, invalidation and release.

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use glyphshrink_core::{
    traits::{RasterBackend, RasterSurface},
    AlphaMode, Glyph, GlyphBitmap, GlyphError, HotPoint, ShrinkConfig, ShrinkContext,
};
use glyphshrink_raster_soft::SoftBackend;

/// Soft backend that counts how many canvases it hands out
struct CountingBackend {
    creates: Arc<AtomicUsize>,
}

impl RasterBackend for CountingBackend {
    fn name(&self) -> &'static str {
        "counting"
    }

    fn create(&self, width: u32, height: u32) -> glyphshrink_core::Result<Box<dyn RasterSurface>> {
        self.creates.fetch_add(1, Ordering::SeqCst);
        SoftBackend.create(width, height)
    }
}

fn soft_context(shrink_factor: f64) -> ShrinkContext {
    ShrinkContext::new(shrink_factor, Arc::new(SoftBackend)).unwrap()
}

fn counting_context(shrink_factor: f64) -> (ShrinkContext, Arc<AtomicUsize>) {
    let creates = Arc::new(AtomicUsize::new(0));
    let backend = CountingBackend {
        creates: Arc::clone(&creates),
    };
    (ShrinkContext::new(shrink_factor, Arc::new(backend)).unwrap(), creates)
}

/// A blank `width` x `height` glyph with ink only at `ink`
fn dot_glyph(width: u32, height: u32, ink: (u32, u32)) -> GlyphBitmap {
    let rows: Vec<Vec<bool>> = (0..height)
        .map(|y| (0..width).map(|x| (x, y) == ink).collect())
        .collect();
    GlyphBitmap::from_rows(&rows).unwrap()
}

#[test]
fn black_square_at_factor_two() {
    let mut glyph = Glyph::new(GlyphBitmap::solid(8, 8).unwrap(), HotPoint::new(4, 4));
    let context = soft_context(2.0);
    assert!((context.effective_factor() - 1.8).abs() < 1e-12);

    let image = glyph.shrunk_character(&context).unwrap();
    assert_eq!((image.width, image.height), (5, 5));
    assert_eq!(image.hot_point, HotPoint::new(2, 2));
    assert_eq!(image.data.len(), 5 * 5 * 4);

    // The interior is solid ink; the edge row and column mix in the white
    // padding but stay opaque in binary mode
    for y in 0..4 {
        for x in 0..4 {
            assert_eq!(image.pixel(x, y), Some([0, 0, 0, 255]), "({x}, {y})");
        }
    }
    assert_eq!(image.opaque_count(), 25);
    let edge = image.pixel(4, 4).unwrap();
    assert!(edge[0] > 0 && edge[0] < 255, "edge should be gray: {edge:?}");
}

#[test]
fn unit_factor_still_grows_the_glyph() {
    let mut glyph = Glyph::new(GlyphBitmap::solid(8, 8).unwrap(), HotPoint::new(4, 4));
    let image = glyph.shrunk_character(&soft_context(1.0)).unwrap();

    assert_eq!((image.width, image.height), (9, 9));
    assert_eq!(image.hot_point, HotPoint::new(4, 4));
    assert_eq!(image.opaque_count(), 81);
}

#[test]
fn ink_on_hot_point_lands_on_shrunk_hot_point() {
    let mut glyph = Glyph::new(dot_glyph(20, 20, (6, 6)), HotPoint::new(6, 6));
    let image = glyph.shrunk_character(&soft_context(3.0)).unwrap();

    assert_eq!(image.hot_point, HotPoint::new(2, 2));
    assert_eq!(image.alpha(2, 2), Some(255));
    assert_eq!(image.opaque_count(), 1);
}

#[test]
fn white_is_transparent_everything_else_opaque() {
    let mut glyph = Glyph::new(dot_glyph(16, 16, (9, 3)), HotPoint::new(0, 15));
    let image = glyph.shrunk_character(&soft_context(4.0)).unwrap();

    for px in image.data.chunks_exact(4) {
        let white = px[0] == 255 && px[1] == 255 && px[2] == 255;
        assert_eq!(px[3], if white { 0 } else { 255 }, "{px:?}");
    }
    assert!(image.opaque_count() >= 1);
}

#[test]
fn coverage_mode_keeps_gray_levels_as_alpha() {
    let config = ShrinkConfig::default().with_alpha_mode(AlphaMode::Coverage);
    let context = ShrinkContext::with_config(2.0, config, Arc::new(SoftBackend)).unwrap();
    let mut glyph = Glyph::new(GlyphBitmap::solid(8, 8).unwrap(), HotPoint::new(4, 4));

    let image = glyph.shrunk_character(&context).unwrap();
    assert_eq!(image.pixel(0, 0), Some([0, 0, 0, 255]));
    let edge = image.alpha(4, 4).unwrap();
    assert!(edge > 0 && edge < 255, "edge alpha {edge}");
}

#[test]
fn second_call_returns_cached_image() {
    let (context, creates) = counting_context(2.5);
    let mut glyph = Glyph::new(GlyphBitmap::solid(11, 7).unwrap(), HotPoint::new(3, 6));

    let first = glyph.shrunk_character(&context).unwrap();
    let second = glyph.shrunk_character(&context).unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(*first, *second);
    assert_eq!(creates.load(Ordering::SeqCst), 1);
}

#[test]
fn cache_ignores_context_until_cleared() {
    let (context, creates) = counting_context(2.0);
    let mut glyph = Glyph::new(GlyphBitmap::solid(8, 8).unwrap(), HotPoint::new(4, 4));
    let at_two = glyph.shrunk_character(&context).unwrap();

    let (other, _) = counting_context(4.0);
    let stale = glyph.shrunk_character(&other).unwrap();
    assert!(Arc::ptr_eq(&at_two, &stale));

    glyph.clear_shrunk_character();
    assert!(!glyph.is_shrunk());
    let again = glyph.shrunk_character(&context).unwrap();
    assert_eq!(*again, *at_two);
    assert_eq!(creates.load(Ordering::SeqCst), 2);

    glyph.clear_shrunk_character();
    let fresh = glyph.shrunk_character(&other).unwrap();
    assert!(fresh.width < at_two.width);
}

#[test]
fn dropping_the_glyph_releases_the_image() {
    let mut glyph = Glyph::new(GlyphBitmap::solid(8, 8).unwrap(), HotPoint::new(4, 4));
    let image = glyph.shrunk_character(&soft_context(2.0)).unwrap();
    let weak = Arc::downgrade(&image);
    drop(image);

    assert!(weak.upgrade().is_some(), "glyph still owns its image");
    drop(glyph);
    assert!(weak.upgrade().is_none(), "image freed with the glyph");
}

#[test]
fn repeated_invalidation_is_harmless() {
    let mut glyph = Glyph::new(GlyphBitmap::solid(5, 5).unwrap(), HotPoint::new(2, 2));
    glyph.clear_shrunk_character();

    let weak = Arc::downgrade(&glyph.shrunk_character(&soft_context(2.0)).unwrap());
    glyph.clear_shrunk_character();
    glyph.clear_shrunk_character();

    assert!(weak.upgrade().is_none());
    assert!(glyph.cached().is_none());
}

#[test]
fn invalid_inputs_fail_fast() {
    assert!(matches!(
        ShrinkContext::new(0.0, Arc::new(SoftBackend)),
        Err(GlyphError::InvalidShrinkFactor(_))
    ));
    assert!(matches!(
        ShrinkContext::new(-2.0, Arc::new(SoftBackend)),
        Err(GlyphError::InvalidShrinkFactor(_))
    ));
    assert!(GlyphBitmap::solid(0, 3).is_err());

    let config = ShrinkConfig::default().with_legibility(0.0);
    assert!(matches!(
        ShrinkContext::with_config(2.0, config, Arc::new(SoftBackend)),
        Err(GlyphError::Config(_))
    ));
}
