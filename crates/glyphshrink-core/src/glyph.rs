//! A glyph and its lazily shrunk image
//!
//! The unscaled bitmap is the master copy; the shrunk image is derived from
//! it on first use and kept until someone clears it. Both are owned by the
//! glyph and go away with it.

use std::sync::Arc;

use crate::bitmap::GlyphBitmap;
use crate::context::ShrinkContext;
use crate::error::Result;
use crate::geometry::ShrinkGeometry;
use crate::types::{HotPoint, Luma, ShrunkImage};

/// One character of a font, as rasterized at full resolution
#[derive(Debug, Clone)]
pub struct Glyph {
    bitmap: GlyphBitmap,
    hot_point: HotPoint,
    /// Horizontal pen advance in unscaled pixels
    advance: i32,
    shrunk: Option<Arc<ShrunkImage>>,
}

impl Glyph {
    pub fn new(bitmap: GlyphBitmap, hot_point: HotPoint) -> Self {
        Self {
            bitmap,
            hot_point,
            advance: 0,
            shrunk: None,
        }
    }

    pub fn with_advance(mut self, advance: i32) -> Self {
        self.advance = advance;
        self
    }

    pub fn bitmap(&self) -> &GlyphBitmap {
        &self.bitmap
    }

    pub fn hot_point(&self) -> HotPoint {
        self.hot_point
    }

    pub fn advance(&self) -> i32 {
        self.advance
    }

    /// The shrunk image for the context's shrink factor
    ///
    /// Computed on the first call after construction or
    /// [`clear_shrunk_character`](Self::clear_shrunk_character); later calls
    /// hand back the same cached image without touching the backend, even if
    /// `context` has changed in the meantime.
    pub fn shrunk_character(&mut self, context: &ShrinkContext) -> Result<Arc<ShrunkImage>> {
        let image = match self.shrunk.take() {
            Some(image) => image,
            None => Arc::new(shrink_bitmap(&self.bitmap, self.hot_point, context)?),
        };
        Ok(Arc::clone(self.shrunk.insert(image)))
    }

    /// The cached shrunk image, if there is one
    pub fn cached(&self) -> Option<&Arc<ShrunkImage>> {
        self.shrunk.as_ref()
    }

    pub fn is_shrunk(&self) -> bool {
        self.shrunk.is_some()
    }

    /// Drop the cached image; the next request recomputes it
    pub fn clear_shrunk_character(&mut self) {
        if self.shrunk.take().is_some() {
            log::trace!(
                "Cleared shrunk image of {}x{} glyph",
                self.bitmap.width(),
                self.bitmap.height()
            );
        }
    }
}

/// Shrink `bitmap` so that `hot_point` lands on an integer target pixel
///
/// This is the whole algorithm behind [`Glyph::shrunk_character`], minus the
/// caching: pad the bitmap with white per [`ShrinkGeometry`], paint it black on
/// white, area-resample to the target size, and synthesize alpha.
pub fn shrink_bitmap(
    bitmap: &GlyphBitmap,
    hot_point: HotPoint,
    context: &ShrinkContext,
) -> Result<ShrunkImage> {
    let geometry = ShrinkGeometry::compute(
        bitmap.width(),
        bitmap.height(),
        hot_point,
        context.effective_factor(),
    )?;

    let backend = context.backend();
    let mut canvas = backend.create(
        geometry.canvas_width(bitmap.width()),
        geometry.canvas_height(bitmap.height()),
    )?;
    canvas.fill(Luma::WHITE);
    canvas.blit(bitmap, geometry.pre_cols, geometry.pre_rows, Luma::BLACK)?;

    let shrunk = canvas.resample(geometry.shrunk_width, geometry.shrunk_height)?;
    let image = ShrunkImage {
        width: shrunk.width(),
        height: shrunk.height(),
        hot_point: geometry.shrunk_hot_point,
        data: shrunk.to_rgba(context.config().alpha_mode),
    };

    log::debug!(
        "Shrunk {}x{} glyph to {}x{} on {} ({} alpha)",
        bitmap.width(),
        bitmap.height(),
        image.width,
        image.height,
        backend.name(),
        context.config().alpha_mode
    );
    Ok(image)
}
