//! Glyphshrink Core: monochrome glyphs in, aligned antialiased pixels out
//!
//! A previewer rasterizes its fonts once, at full resolution, and then has to
//! show them at whatever zoom the user picks. Dividing every coordinate by the
//! shrink factor and rounding leaves each glyph up to a pixel off, and on a
//! low-resolution screen a line of such glyphs visibly dances. This crate
//! shrinks each glyph so that its hot point lands on an exact integer pixel,
//! which keeps independently shrunk glyphs aligned once they are composited.
//!
//! ## Shrinking One Glyph
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use glyphshrink_core::{Glyph, GlyphBitmap, HotPoint, ShrinkContext};
//! # use glyphshrink_core::traits::RasterBackend;
//! # fn backend() -> Arc<dyn RasterBackend> { unimplemented!() }
//!
//! let bitmap = GlyphBitmap::solid(8, 8)?;
//! let mut glyph = Glyph::new(bitmap, HotPoint::new(4, 4));
//! let context = ShrinkContext::new(2.0, backend())?;
//!
//! let image = glyph.shrunk_character(&context)?;
//! assert_eq!((image.width, image.height), (5, 5));
//! # Ok::<(), glyphshrink_core::GlyphError>(())
//! ```
//!
//! ## The Moving Parts
//!
//! - [`GlyphBitmap`] - the packed 1-bit raster, owned by its glyph
//! - [`ShrinkGeometry`] - target size and white padding for a hot point
//! - [`traits::RasterBackend`] / [`traits::RasterSurface`] - the canvas the
//!   shrinker paints on; see the `glyphshrink-raster-*` backends
//! - [`Glyph`] - bitmap plus hot point plus a lazily filled shrunk image
//! - [`GlyphTable`] - a font's glyphs sharing one [`ShrinkContext`]
//! - [`compose`] - hot-point aligned compositing of a text line

pub mod alpha;
pub mod bitmap;
pub mod compose;
pub mod config;
pub mod context;
pub mod error;
pub mod geometry;
pub mod glyph;
pub mod resample;
pub mod table;
pub mod traits;

pub use alpha::AlphaMode;
pub use bitmap::{BitOrder, BitRow, GlyphBitmap};
pub use config::ShrinkConfig;
pub use context::ShrinkContext;
pub use error::{GlyphError, Result};
pub use geometry::ShrinkGeometry;
pub use glyph::{shrink_bitmap, Glyph};
pub use table::GlyphTable;
pub use types::{HotPoint, Luma, ShrunkImage};

/// The data structures that flow between stages
pub mod types {
    /// A single 8-bit gray level
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Luma(pub u8);

    impl Luma {
        pub const BLACK: Luma = Luma(0);
        pub const WHITE: Luma = Luma(255);
    }

    /// Anchor pixel of a glyph
    ///
    /// In unscaled bitmaps this is where the pen sits when the glyph is set;
    /// in shrunk images it is the integer pixel that pen position maps to.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct HotPoint {
        pub x: i32,
        pub y: i32,
    }

    impl HotPoint {
        pub const fn new(x: i32, y: i32) -> Self {
            Self { x, y }
        }
    }

    /// A shrunk glyph ready for compositing
    ///
    /// Pixels are RGBA8, not premultiplied, row-major with no padding.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct ShrunkImage {
        pub width: u32,
        pub height: u32,
        /// Where the glyph's hot point landed, in image pixels
        pub hot_point: HotPoint,
        pub data: Vec<u8>,
    }

    impl ShrunkImage {
        /// RGBA of the pixel at (x, y), or `None` outside the image
        pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
            if x >= self.width || y >= self.height {
                return None;
            }
            let idx = (y as usize * self.width as usize + x as usize) * 4;
            let px = self.data.get(idx..idx + 4)?;
            Some([px[0], px[1], px[2], px[3]])
        }

        /// Alpha of the pixel at (x, y), or `None` outside the image
        pub fn alpha(&self, x: u32, y: u32) -> Option<u8> {
            self.pixel(x, y).map(|px| px[3])
        }

        /// Number of pixels with any opacity
        pub fn opaque_count(&self) -> usize {
            self.data.chunks_exact(4).filter(|px| px[3] != 0).count()
        }
    }
}
