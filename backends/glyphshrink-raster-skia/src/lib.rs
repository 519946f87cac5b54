//! Skia raster backend - glyph canvases on tiny-skia pixmaps
//!
//! For applications that already draw their pages with tiny-skia, this
//! backend keeps the shrinker's canvases in the same `Pixmap` type, so a
//! shrunk glyph can go straight onto a page without conversion. Painting the
//! glyph uses tiny-skia's own compositing; the downscale goes through the
//! shared area resampler, because tiny-skia's pattern filters sample points
//! and would lose thin stems at large shrink factors.

use glyphshrink_core::{
    error::{GlyphError, RasterError, Result},
    geometry::MAX_DIMENSION,
    resample::area_resample,
    traits::{RasterBackend, RasterSurface},
    GlyphBitmap, Luma,
};
use thiserror::Error;
use tiny_skia::{Color, IntSize, Pixmap, PixmapPaint, Transform};

/// Things tiny-skia can refuse
#[derive(Debug, Error)]
pub enum SkiaSurfaceError {
    #[error("tiny-skia could not allocate a {width}x{height} pixmap")]
    PixmapCreation { width: u32, height: u32 },

    #[error("pixel buffer does not match {width}x{height}")]
    PixmapFromData { width: u32, height: u32 },
}

impl From<SkiaSurfaceError> for GlyphError {
    fn from(err: SkiaSurfaceError) -> Self {
        RasterError::SurfaceCreationFailed(err.to_string()).into()
    }
}

/// Hands out [`SkiaSurface`]s
#[derive(Debug, Default, Clone, Copy)]
pub struct SkiaBackend;

impl SkiaBackend {
    pub fn new() -> Self {
        Self
    }
}

impl RasterBackend for SkiaBackend {
    fn name(&self) -> &'static str {
        "skia"
    }

    fn create(&self, width: u32, height: u32) -> Result<Box<dyn RasterSurface>> {
        Ok(Box::new(SkiaSurface::new(width, height)?))
    }
}

/// A tiny-skia pixmap holding opaque gray pixels
#[derive(Debug, Clone)]
pub struct SkiaSurface {
    pixmap: Pixmap,
}

impl SkiaSurface {
    /// A transparent pixmap of the given size
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if i64::from(width) > MAX_DIMENSION || i64::from(height) > MAX_DIMENSION {
            return Err(RasterError::InvalidDimensions {
                width: width.into(),
                height: height.into(),
            }
            .into());
        }
        let pixmap = Pixmap::new(width, height)
            .ok_or(SkiaSurfaceError::PixmapCreation { width, height })?;
        Ok(Self { pixmap })
    }

    /// An opaque pixmap built from gray levels
    fn from_gray(width: u32, height: u32, gray: &[u8]) -> Result<Self> {
        let mut rgba = Vec::with_capacity(gray.len() * 4);
        for &g in gray {
            rgba.extend_from_slice(&[g, g, g, 255]);
        }
        let size = IntSize::from_wh(width, height)
            .ok_or(SkiaSurfaceError::PixmapCreation { width, height })?;
        let pixmap = Pixmap::from_vec(rgba, size)
            .ok_or(SkiaSurfaceError::PixmapFromData { width, height })?;
        Ok(Self { pixmap })
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    pub fn into_pixmap(self) -> Pixmap {
        self.pixmap
    }
}

/// The glyph's ink as an opaque-on-transparent pixmap
fn ink_pixmap(src: &GlyphBitmap, ink: Luma) -> Result<Pixmap> {
    let (width, height) = (src.width(), src.height());
    let mut pixmap = Pixmap::new(width, height)
        .ok_or(SkiaSurfaceError::PixmapCreation { width, height })?;

    let stride = width as usize * 4;
    for (dst_row, src_row) in pixmap.data_mut().chunks_exact_mut(stride).zip(src.rows()) {
        for (dst, ink_here) in dst_row.chunks_exact_mut(4).zip(src_row.pixels()) {
            if ink_here {
                // Opaque, so premultiplied and straight agree
                dst.copy_from_slice(&[ink.0, ink.0, ink.0, 255]);
            }
        }
    }
    Ok(pixmap)
}

impl RasterSurface for SkiaSurface {
    fn width(&self) -> u32 {
        self.pixmap.width()
    }

    fn height(&self) -> u32 {
        self.pixmap.height()
    }

    fn fill(&mut self, color: Luma) {
        self.pixmap.fill(Color::from_rgba8(color.0, color.0, color.0, 255));
    }

    fn blit(&mut self, src: &GlyphBitmap, x: u32, y: u32, ink: Luma) -> Result<()> {
        let fits_x = x.checked_add(src.width()).is_some_and(|r| r <= self.width());
        let fits_y = y.checked_add(src.height()).is_some_and(|b| b <= self.height());
        if !fits_x || !fits_y {
            return Err(RasterError::BlitOutOfBounds {
                x,
                y,
                width: src.width(),
                height: src.height(),
            }
            .into());
        }

        let glyph = ink_pixmap(src, ink)?;
        self.pixmap.draw_pixmap(
            x as i32,
            y as i32,
            glyph.as_ref(),
            &PixmapPaint::default(),
            Transform::identity(),
            None,
        );
        Ok(())
    }

    fn resample(&self, width: u32, height: u32) -> Result<Box<dyn RasterSurface>> {
        let gray = area_resample(&self.gray_pixels(), self.width(), self.height(), width, height)?;
        log::trace!(
            "Skia surface {}x{} resampled to {}x{}",
            self.width(),
            self.height(),
            width,
            height
        );
        Ok(Box::new(SkiaSurface::from_gray(width, height, &gray)?))
    }

    fn gray_pixels(&self) -> Vec<u8> {
        // Pixels are opaque gray after fill, so red is the gray level
        self.pixmap.data().chunks_exact(4).map(|px| px[0]).collect()
    }
}
