//! Soft raster backend: a plain byte per pixel, nothing else
//!
//! The shrinker only ever paints black on white and then averages, so a
//! single gray channel is all the canvas needs. No dependencies, no
//! allocation beyond the pixel buffer, and bit-for-bit the same output as
//! every other backend because resampling goes through the shared
//! [`area_resample`].

use glyphshrink_core::{
    error::{RasterError, Result},
    geometry::MAX_DIMENSION,
    resample::area_resample,
    traits::{RasterBackend, RasterSurface},
    GlyphBitmap, Luma,
};

/// Hands out [`SoftSurface`]s
#[derive(Debug, Default, Clone, Copy)]
pub struct SoftBackend;

impl SoftBackend {
    pub fn new() -> Self {
        Self
    }
}

impl RasterBackend for SoftBackend {
    fn name(&self) -> &'static str {
        "soft"
    }

    fn create(&self, width: u32, height: u32) -> Result<Box<dyn RasterSurface>> {
        Ok(Box::new(SoftSurface::new(width, height)?))
    }
}

/// An 8-bit grayscale canvas
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoftSurface {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl SoftSurface {
    /// A black canvas of the given size
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
        log::trace!("Soft surface {}x{}", width, height);
        Ok(Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize],
        })
    }

    /// Wrap existing gray pixels; `pixels.len()` must be `width * height`
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        let mut surface = Self::new(width, height)?;
        if pixels.len() != surface.pixels.len() {
            return Err(RasterError::Backend(format!(
                "expected {} gray bytes for {}x{}, got {}",
                surface.pixels.len(),
                width,
                height,
                pixels.len()
            ))
            .into());
        }
        surface.pixels = pixels;
        Ok(surface)
    }

    /// One row of pixels, or `None` past the bottom edge
    pub fn row(&self, y: u32) -> Option<&[u8]> {
        self.pixels.chunks_exact(self.width as usize).nth(y as usize)
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<u8> {
        self.row(y)?.get(x as usize).copied()
    }
}

impl RasterSurface for SoftSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn fill(&mut self, color: Luma) {
        self.pixels.fill(color.0);
    }

    fn blit(&mut self, src: &GlyphBitmap, x: u32, y: u32, ink: Luma) -> Result<()> {
        let fits_x = x.checked_add(src.width()).is_some_and(|r| r <= self.width);
        let fits_y = y.checked_add(src.height()).is_some_and(|b| b <= self.height);
        if !fits_x || !fits_y {
            return Err(RasterError::BlitOutOfBounds {
                x,
                y,
                width: src.width(),
                height: src.height(),
            }
            .into());
        }

        let stride = self.width as usize;
        let dst_rows = self
            .pixels
            .chunks_exact_mut(stride)
            .skip(y as usize)
            .take(src.height() as usize);
        for (dst_row, src_row) in dst_rows.zip(src.rows()) {
            let dst_span = &mut dst_row[x as usize..x as usize + src.width() as usize];
            for (dst, ink_here) in dst_span.iter_mut().zip(src_row.pixels()) {
                if ink_here {
                    *dst = ink.0;
                }
            }
        }
        Ok(())
    }

    fn resample(&self, width: u32, height: u32) -> Result<Box<dyn RasterSurface>> {
        let pixels = area_resample(&self.pixels, self.width, self.height, width, height)?;
        Ok(Box::new(SoftSurface::from_pixels(width, height, pixels)?))
    }

    fn gray_pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }
}
