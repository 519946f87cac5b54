//! The contracts between the shrinker and the outside world
//!
//! The shrink algorithm never touches pixels itself. It asks a
//! [`RasterBackend`] for a blank canvas, fills it, blits the glyph, and asks
//! the canvas to resample itself. Any raster library that can do those four
//! things can sit behind these traits.
//!
//! - [`RasterBackend`] - Hands out blank canvases
//! - [`RasterSurface`] - One canvas and the operations the shrinker needs
//! - [`Exporter`] - Where shrunk images become files

use crate::alpha::{self, AlphaMode};
use crate::bitmap::GlyphBitmap;
use crate::error::Result;
use crate::types::{Luma, ShrunkImage};

/// Factory for raster surfaces
///
/// ```ignore
/// struct MyBackend;
///
/// impl RasterBackend for MyBackend {
///     fn name(&self) -> &'static str {
///         "mine"
///     }
///
///     fn create(&self, width: u32, height: u32) -> Result<Box<dyn RasterSurface>> {
///         Ok(Box::new(MySurface::new(width, height)?))
///     }
/// }
/// ```
pub trait RasterBackend: Send + Sync {
    /// Who are you? Used for logging and the CLI
    fn name(&self) -> &'static str;

    /// A new surface of the given size; contents are unspecified until filled
    fn create(&self, width: u32, height: u32) -> Result<Box<dyn RasterSurface>>;
}

/// A grayscale canvas
///
/// Surfaces may store pixels any way they like, but every pixel they expose
/// is an opaque gray level.
pub trait RasterSurface: Send {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Paint every pixel with `color`
    fn fill(&mut self, color: Luma);

    /// Paint the set bits of `src` with `ink`, top-left corner at (x, y)
    ///
    /// Unset bits leave the canvas untouched. The whole bitmap must fit.
    fn blit(&mut self, src: &GlyphBitmap, x: u32, y: u32, ink: Luma) -> Result<()>;

    /// A smoothly (area-) resampled copy of this surface
    fn resample(&self, width: u32, height: u32) -> Result<Box<dyn RasterSurface>>;

    /// Gray levels, row-major, `width * height` bytes
    fn gray_pixels(&self) -> Vec<u8>;

    /// Pixels as RGBA8 with alpha synthesized by `mode`
    fn to_rgba(&self, mode: AlphaMode) -> Vec<u8> {
        alpha::synthesize(&self.gray_pixels(), mode)
    }
}

/// The final step: shrunk glyphs become files
pub trait Exporter: Send + Sync {
    /// Who are you?
    fn name(&self) -> &'static str;

    /// Encode the image as bytes
    fn export(&self, image: &ShrunkImage) -> Result<Vec<u8>>;

    /// What file extension should be used?
    fn extension(&self) -> &'static str;

    /// What MIME type identifies your format?
    fn mime_type(&self) -> &'static str;
}
