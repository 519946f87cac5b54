//! Where the hot point lands, and how much white it takes to get it there
//!
//! Shrinking the bitmap as-is would put the hot point at `x / sf`, which is
//! almost never an integer. Instead the hot point is mapped to
//! `x2 = floor(x / sf)` first, and then the unscaled bitmap is padded with
//! white rows and columns until the padded image, resampled to the target
//! size, carries the hot point onto exactly `(x2, y2)`. The padding makes the
//! pre-scale position times `sf` reproduce the already rounded integer
//! post-scale position, so glyphs aligned by their hot points never drift.

use crate::error::{BitmapError, GlyphError, RasterError, Result};
use crate::types::HotPoint;

/// Largest canvas or target edge the shrinker will allocate
pub const MAX_DIMENSION: i64 = 65_535;

/// Sizes and padding for shrinking one glyph
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShrinkGeometry {
    /// Shrink factor actually used for rasterizing
    pub effective_factor: f64,
    /// The hot point in target pixels, `(x2, y2)`
    pub shrunk_hot_point: HotPoint,
    pub shrunk_width: u32,
    pub shrunk_height: u32,
    pub pre_rows: u32,
    pub post_rows: u32,
    pub pre_cols: u32,
    pub post_cols: u32,
}

/// `(int)(v + 0.5)` for the non-negative values that occur in practice,
/// extended with floor semantics below zero
fn round_half_up(v: f64) -> i64 {
    (v + 0.5).floor() as i64
}

impl ShrinkGeometry {
    /// Compute the geometry for a `width` x `height` bitmap
    ///
    /// `effective_factor` is the shrink factor after the legibility
    /// adjustment. Fails on a non-positive factor, an empty bitmap, or a
    /// target that would be empty or larger than [`MAX_DIMENSION`].
    pub fn compute(
        width: u32,
        height: u32,
        hot_point: HotPoint,
        effective_factor: f64,
    ) -> Result<Self> {
        if !effective_factor.is_finite() || effective_factor <= 0.0 {
            return Err(GlyphError::InvalidShrinkFactor(effective_factor));
        }
        if width == 0 || height == 0 {
            return Err(BitmapError::EmptyBitmap { width, height }.into());
        }

        let sf = effective_factor;
        let (w, h) = (i64::from(width), i64::from(height));
        let (x, y) = (i64::from(hot_point.x), i64::from(hot_point.y));

        let x2 = (x as f64 / sf).floor() as i64;
        let y2 = (y as f64 / sf).floor() as i64;

        let shrunk_w = x2 + round_half_up((w - x) as f64 / sf) + 1;
        let shrunk_h = y2 + round_half_up((h - y) as f64 / sf) + 1;
        check_dimensions(shrunk_w, shrunk_h)?;

        let pre_rows = (round_half_up((1 + y2) as f64 * sf) - y - 1).max(0);
        let post_rows = (round_half_up(shrunk_h as f64 * sf) - h).max(0);
        let pre_cols = (round_half_up((1 + x2) as f64 * sf) - x - 1).max(0);
        let post_cols = (round_half_up(shrunk_w as f64 * sf) - w).max(0);
        check_dimensions(w + pre_cols + post_cols, h + pre_rows + post_rows)?;

        let geometry = Self {
            effective_factor: sf,
            shrunk_hot_point: HotPoint::new(x2 as i32, y2 as i32),
            shrunk_width: shrunk_w as u32,
            shrunk_height: shrunk_h as u32,
            pre_rows: pre_rows as u32,
            post_rows: post_rows as u32,
            pre_cols: pre_cols as u32,
            post_cols: post_cols as u32,
        };
        log::debug!(
            "Shrink {}x{} hot ({}, {}) by {:.4}: target {}x{} hot ({}, {}), padding rows {}+{} cols {}+{}",
            width,
            height,
            hot_point.x,
            hot_point.y,
            sf,
            geometry.shrunk_width,
            geometry.shrunk_height,
            x2,
            y2,
            geometry.pre_rows,
            geometry.post_rows,
            geometry.pre_cols,
            geometry.post_cols
        );
        Ok(geometry)
    }

    /// Width of the padded canvas for a bitmap of `bitmap_width`
    pub fn canvas_width(&self, bitmap_width: u32) -> u32 {
        bitmap_width + self.pre_cols + self.post_cols
    }

    /// Height of the padded canvas for a bitmap of `bitmap_height`
    pub fn canvas_height(&self, bitmap_height: u32) -> u32 {
        bitmap_height + self.pre_rows + self.post_rows
    }
}

fn check_dimensions(width: i64, height: i64) -> Result<()> {
    if width < 1 || height < 1 || width > MAX_DIMENSION || height > MAX_DIMENSION {
        return Err(RasterError::InvalidDimensions { width, height }.into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn eight_by_eight_at_factor_two() {
        let g = ShrinkGeometry::compute(8, 8, HotPoint::new(4, 4), 2.0 * 0.9).unwrap();

        assert_eq!(g.shrunk_hot_point, HotPoint::new(2, 2));
        assert_eq!((g.shrunk_width, g.shrunk_height), (5, 5));
        assert_eq!((g.pre_rows, g.post_rows), (0, 1));
        assert_eq!((g.pre_cols, g.post_cols), (0, 1));
        assert_eq!((g.canvas_width(8), g.canvas_height(8)), (9, 9));
    }

    #[test]
    fn unit_factor_still_under_shrinks() {
        let g = ShrinkGeometry::compute(8, 8, HotPoint::new(4, 4), 1.0 * 0.9).unwrap();

        assert_eq!(g.shrunk_hot_point, HotPoint::new(4, 4));
        assert_eq!((g.shrunk_width, g.shrunk_height), (9, 9));
        assert_eq!((g.canvas_width(8), g.canvas_height(8)), (8, 8));
    }

    #[test]
    fn leading_padding_moves_hot_point_onto_grid() {
        // 6 / 2.7 = 2.22, so x2 = 2, and (1 + 2) * 2.7 = 8.1 rounds to 8:
        // one extra column makes source pixel 6 the last one of target pixel 2.
        let g = ShrinkGeometry::compute(20, 20, HotPoint::new(6, 6), 2.7).unwrap();
        assert_eq!(g.shrunk_hot_point, HotPoint::new(2, 2));
        assert_eq!(g.pre_cols, 1);
        assert_eq!(g.pre_rows, 1);
    }

    #[test]
    fn hot_point_outside_bitmap() {
        let g = ShrinkGeometry::compute(6, 10, HotPoint::new(-3, 12), 1.8).unwrap();
        assert_eq!(g.shrunk_hot_point, HotPoint::new(-2, 6));
        assert!(g.shrunk_width >= 1 && g.shrunk_height >= 1);
    }

    #[test]
    fn rejects_bad_factor_and_empty_bitmap() {
        for sf in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                ShrinkGeometry::compute(8, 8, HotPoint::new(4, 4), sf),
                Err(GlyphError::InvalidShrinkFactor(_))
            ));
        }
        assert!(matches!(
            ShrinkGeometry::compute(0, 8, HotPoint::new(0, 4), 2.0),
            Err(GlyphError::InvalidBitmap(BitmapError::EmptyBitmap { .. }))
        ));
    }

    #[test]
    fn rejects_absurd_targets() {
        assert!(matches!(
            ShrinkGeometry::compute(8, 8, HotPoint::new(4, 4), 1e-6),
            Err(GlyphError::Raster(RasterError::InvalidDimensions { .. }))
        ));
    }

    proptest! {
        #[test]
        fn prop_padding_aligns_hot_point(
            w in 1u32..200,
            h in 1u32..200,
            fx in 0.0f64..1.0,
            fy in 0.0f64..1.0,
            shrink in 1.0f64..12.0,
        ) {
            let x = (fx * f64::from(w)) as i32;
            let y = (fy * f64::from(h)) as i32;
            let sf = shrink * 0.9;
            let g = ShrinkGeometry::compute(w, h, HotPoint::new(x, y), sf).unwrap();

            let x2 = i64::from(g.shrunk_hot_point.x);
            let y2 = i64::from(g.shrunk_hot_point.y);
            let row_end = round_half_up((1 + y2) as f64 * sf) - i64::from(g.pre_rows);
            let col_end = round_half_up((1 + x2) as f64 * sf) - i64::from(g.pre_cols);

            // Exact unless the leading padding had to be clamped at zero
            if g.pre_rows > 0 {
                prop_assert_eq!(row_end, i64::from(y) + 1);
            } else {
                prop_assert!((row_end - (i64::from(y) + 1)).abs() <= 1);
            }
            if g.pre_cols > 0 {
                prop_assert_eq!(col_end, i64::from(x) + 1);
            } else {
                prop_assert!((col_end - (i64::from(x) + 1)).abs() <= 1);
            }
        }

        #[test]
        fn prop_canvas_covers_bitmap(
            w in 1u32..300,
            h in 1u32..300,
            x in 0u32..=300,
            y in 0u32..=300,
            shrink in 1.0f64..16.0,
        ) {
            let hot = HotPoint::new(x.min(w) as i32, y.min(h) as i32);
            let g = ShrinkGeometry::compute(w, h, hot, shrink * 0.9).unwrap();
            prop_assert!(g.shrunk_width >= 1 && g.shrunk_height >= 1);
            prop_assert!(g.canvas_width(w) >= w);
            prop_assert!(g.canvas_height(h) >= h);
        }
    }
}
