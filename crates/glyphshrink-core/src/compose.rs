//! Setting shrunk glyphs on a line
//!
//! Every shrunk image knows where its hot point landed. Drawing it with that
//! pixel on the pen position is all it takes to line glyphs up, because the
//! shrinker already absorbed the rounding into the padding. The pen itself
//! moves in exact display units (`advance / shrink_factor`, no legibility
//! adjustment) and is only rounded when a glyph is placed, so the error per
//! glyph stays below half a pixel and never accumulates.

use std::sync::Arc;

use crate::error::{RasterError, Result};
use crate::geometry::MAX_DIMENSION;
use crate::table::GlyphTable;
use crate::types::{HotPoint, ShrunkImage};

/// An RGBA8 canvas glyphs get composited onto
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineCanvas {
    pub width: u32,
    pub height: u32,
    /// Where the pen started, in canvas pixels
    pub origin: HotPoint,
    /// Non-premultiplied RGBA8, row-major
    pub data: Vec<u8>,
}

impl LineCanvas {
    /// A fully transparent canvas
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0
            || height == 0
            || i64::from(width) > MAX_DIMENSION
            || i64::from(height) > MAX_DIMENSION
        {
            return Err(RasterError::InvalidDimensions {
                width: width.into(),
                height: height.into(),
            }
            .into());
        }
        Ok(Self {
            width,
            height,
            origin: HotPoint::default(),
            data: vec![0; width as usize * height as usize * 4],
        })
    }

    /// Composite `image` so its hot point sits on (pen_x, pen_y)
    ///
    /// Parts falling outside the canvas are clipped.
    pub fn draw_glyph(&mut self, image: &ShrunkImage, pen_x: i32, pen_y: i32) {
        let left = i64::from(pen_x) - i64::from(image.hot_point.x);
        let top = i64::from(pen_y) - i64::from(image.hot_point.y);

        for sy in 0..image.height {
            let dy = top + i64::from(sy);
            if dy < 0 || dy >= i64::from(self.height) {
                continue;
            }
            for sx in 0..image.width {
                let dx = left + i64::from(sx);
                if dx < 0 || dx >= i64::from(self.width) {
                    continue;
                }
                let Some(src) = image.pixel(sx, sy) else {
                    continue;
                };
                let idx = (dy as usize * self.width as usize + dx as usize) * 4;
                blend_over(&mut self.data[idx..idx + 4], src);
            }
        }
    }

    /// RGBA of the pixel at (x, y), or `None` outside the canvas
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        Some([
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        ])
    }

    /// View the canvas as a shrunk image anchored at the pen origin, for export
    pub fn into_image(self) -> ShrunkImage {
        ShrunkImage {
            width: self.width,
            height: self.height,
            hot_point: self.origin,
            data: self.data,
        }
    }
}

/// Source-over for non-premultiplied RGBA8
fn blend_over(dst: &mut [u8], src: [u8; 4]) {
    match src[3] {
        0 => {},
        255 => dst.copy_from_slice(&src),
        sa => {
            let sa = f32::from(sa) / 255.0;
            let da = f32::from(dst[3]) / 255.0;
            let out_a = sa + da * (1.0 - sa);
            for c in 0..3 {
                let sc = f32::from(src[c]);
                let dc = f32::from(dst[c]);
                let value = (sc * sa + dc * da * (1.0 - sa)) / out_a;
                dst[c] = value.round().clamp(0.0, 255.0) as u8;
            }
            dst[3] = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
        },
    }
}

/// Where each glyph of a line goes, before any pixels move
struct Placement {
    image: Arc<ShrunkImage>,
    pen_x: i32,
}

/// Shrink and set `codes` left to right on one baseline
///
/// The canvas is sized to the union of all glyph images, and its `origin`
/// records where the pen started. Codes without a glyph are skipped.
pub fn compose_line(table: &mut GlyphTable, codes: &[u32]) -> Result<LineCanvas> {
    let shrink_factor = table.context().shrink_factor();
    let mut pen = 0.0f64;
    let mut placements = Vec::with_capacity(codes.len());

    for &code in codes {
        let Some(image) = table.shrunk_character(code)? else {
            log::warn!("No glyph for character code {}, skipping", code);
            continue;
        };
        let advance = table.get(code).map(|g| g.advance()).unwrap_or(0);
        placements.push(Placement {
            image,
            pen_x: pen.round() as i32,
        });
        pen += f64::from(advance) / shrink_factor;
    }

    // Bounding box relative to the pen origin on the baseline
    let (mut min_x, mut min_y, mut max_x, mut max_y) = (0i64, 0i64, 1i64, 1i64);
    for p in &placements {
        let left = i64::from(p.pen_x) - i64::from(p.image.hot_point.x);
        let top = -i64::from(p.image.hot_point.y);
        min_x = min_x.min(left);
        min_y = min_y.min(top);
        max_x = max_x.max(left + i64::from(p.image.width));
        max_y = max_y.max(top + i64::from(p.image.height));
    }

    let width = u32::try_from(max_x - min_x).map_err(|_| RasterError::InvalidDimensions {
        width: max_x - min_x,
        height: max_y - min_y,
    })?;
    let height = u32::try_from(max_y - min_y).map_err(|_| RasterError::InvalidDimensions {
        width: max_x - min_x,
        height: max_y - min_y,
    })?;

    let mut canvas = LineCanvas::new(width, height)?;
    canvas.origin = HotPoint::new(-min_x as i32, -min_y as i32);
    for p in &placements {
        canvas.draw_glyph(&p.image, canvas.origin.x + p.pen_x, canvas.origin.y);
    }

    log::debug!(
        "Composed {} of {} glyphs into {}x{}",
        placements.len(),
        codes.len(),
        width,
        height
    );
    Ok(canvas)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dot(hot: HotPoint, width: u32, height: u32) -> ShrunkImage {
        // Transparent image with a single opaque black pixel on the hot point
        let mut data = vec![255u8; width as usize * height as usize * 4];
        for px in data.chunks_exact_mut(4) {
            px[3] = 0;
        }
        let idx = (hot.y as usize * width as usize + hot.x as usize) * 4;
        data[idx..idx + 4].copy_from_slice(&[0, 0, 0, 255]);
        ShrunkImage {
            width,
            height,
            hot_point: hot,
            data,
        }
    }

    #[test]
    fn hot_point_lands_on_pen() {
        let mut canvas = LineCanvas::new(10, 10).unwrap();
        canvas.draw_glyph(&dot(HotPoint::new(2, 3), 5, 5), 6, 4);

        assert_eq!(canvas.pixel(6, 4), Some([0, 0, 0, 255]));
        assert_eq!(canvas.data.chunks_exact(4).filter(|px| px[3] != 0).count(), 1);
    }

    #[test]
    fn clipping_at_edges() {
        let mut canvas = LineCanvas::new(3, 3).unwrap();
        canvas.draw_glyph(&dot(HotPoint::new(0, 0), 4, 4), -1, -1);
        canvas.draw_glyph(&dot(HotPoint::new(0, 0), 4, 4), 2, 2);
        assert_eq!(canvas.pixel(2, 2), Some([0, 0, 0, 255]));
        assert_eq!(canvas.data.chunks_exact(4).filter(|px| px[3] != 0).count(), 1);
    }

    #[test]
    fn transparent_pixels_leave_canvas_alone() {
        let mut canvas = LineCanvas::new(2, 1).unwrap();
        canvas.data.copy_from_slice(&[10, 20, 30, 255, 10, 20, 30, 255]);
        canvas.draw_glyph(&dot(HotPoint::new(0, 0), 2, 1), 0, 0);
        assert_eq!(canvas.pixel(0, 0), Some([0, 0, 0, 255]));
        assert_eq!(canvas.pixel(1, 0), Some([10, 20, 30, 255]));
    }

    #[test]
    fn partial_alpha_blends() {
        let mut dst = [255, 255, 255, 255];
        blend_over(&mut dst, [0, 0, 0, 128]);
        assert_eq!(dst, [127, 127, 127, 255]);

        let mut empty = [0, 0, 0, 0];
        blend_over(&mut empty, [0, 0, 0, 128]);
        assert_eq!(empty, [0, 0, 0, 128]);
    }

    #[test]
    fn rejects_empty_canvas() {
        assert!(LineCanvas::new(0, 5).is_err());
    }
}
