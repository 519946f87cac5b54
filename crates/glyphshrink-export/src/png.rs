//! PNG export format
//!
//! Shrunk glyphs are straight-alpha RGBA8, which is what PNG stores, so the
//! pixels go to the `image` encoder untouched.

use glyphshrink_core::{
    error::{ExportError, Result},
    traits::Exporter,
    ShrunkImage,
};
use image::{ImageBuffer, ImageEncoder, RgbaImage};

/// Encode a shrunk image as an RGBA PNG
pub fn encode_png(shrunk: &ShrunkImage) -> Result<Vec<u8>> {
    let expected = shrunk.width as usize * shrunk.height as usize * 4;
    if shrunk.data.len() != expected {
        return Err(ExportError::EncodingFailed(format!(
            "Buffer size mismatch: expected {} bytes for {}x{} RGBA, got {}",
            expected,
            shrunk.width,
            shrunk.height,
            shrunk.data.len()
        ))
        .into());
    }

    let buffer: RgbaImage = ImageBuffer::from_raw(shrunk.width, shrunk.height, shrunk.data.clone())
        .ok_or_else(|| {
            ExportError::EncodingFailed("Failed to create image buffer from RGBA data".into())
        })?;

    let mut png_data = Vec::new();
    let encoder = image::codecs::png::PngEncoder::new_with_quality(
        &mut png_data,
        image::codecs::png::CompressionType::Default,
        image::codecs::png::FilterType::Sub,
    );
    encoder
        .write_image(
            buffer.as_raw(),
            shrunk.width,
            shrunk.height,
            image::ExtendedColorType::Rgba8,
        )
        .map_err(|e| ExportError::EncodingFailed(format!("PNG encoding failed: {}", e)))?;

    log::trace!(
        "Encoded {}x{} PNG, {} bytes",
        shrunk.width,
        shrunk.height,
        png_data.len()
    );
    Ok(png_data)
}

/// PNG exporter for shrunk glyphs
///
/// # Examples
///
/// ```
/// use glyphshrink_export::PngExporter;
/// let exporter = PngExporter::new();
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct PngExporter;

impl PngExporter {
    pub fn new() -> Self {
        Self
    }
}

impl Exporter for PngExporter {
    fn name(&self) -> &'static str {
        "png"
    }

    fn export(&self, image: &ShrunkImage) -> Result<Vec<u8>> {
        encode_png(image)
    }

    fn extension(&self) -> &'static str {
        "png"
    }

    fn mime_type(&self) -> &'static str {
        "image/png"
    }
}
