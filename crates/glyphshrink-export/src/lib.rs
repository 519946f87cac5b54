//! Writing shrunk glyphs out
//!
//! Two formats: PNG for anything that displays images, and PAM (`P7` with
//! `TUPLTYPE RGB_ALPHA`), the netpbm format that keeps the alpha channel and
//! can be inspected with a hex dump.

use std::fmt;
use std::io::Write;
use std::str::FromStr;

use glyphshrink_core::{
    error::{ExportError, GlyphError, Result},
    traits::Exporter,
    ShrunkImage,
};

pub mod png;

pub use png::PngExporter;

/// PAM (Portable Arbitrary Map) exporter, RGBA8 tuples
#[derive(Debug, Default, Clone, Copy)]
pub struct PamExporter;

impl PamExporter {
    pub fn new() -> Self {
        Self
    }
}

impl Exporter for PamExporter {
    fn name(&self) -> &'static str {
        "pam"
    }

    fn export(&self, image: &ShrunkImage) -> Result<Vec<u8>> {
        let expected = image.width as usize * image.height as usize * 4;
        if image.data.len() != expected {
            return Err(ExportError::EncodingFailed(format!(
                "Buffer size mismatch: expected {} bytes for {}x{} RGBA, got {}",
                expected,
                image.width,
                image.height,
                image.data.len()
            ))
            .into());
        }

        let mut output = Vec::with_capacity(expected + 64);
        writeln!(&mut output, "P7")?;
        writeln!(&mut output, "WIDTH {}", image.width)?;
        writeln!(&mut output, "HEIGHT {}", image.height)?;
        writeln!(&mut output, "DEPTH 4")?;
        writeln!(&mut output, "MAXVAL 255")?;
        writeln!(&mut output, "TUPLTYPE RGB_ALPHA")?;
        writeln!(&mut output, "ENDHDR")?;
        output.extend_from_slice(&image.data);
        Ok(output)
    }

    fn extension(&self) -> &'static str {
        "pam"
    }

    fn mime_type(&self) -> &'static str {
        "image/x-portable-arbitrarymap"
    }
}

/// Output formats by name, for picking an exporter at runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Png,
    Pam,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Pam => "pam",
        }
    }

    /// An exporter writing this format
    pub fn exporter(&self) -> Box<dyn Exporter> {
        match self {
            Self::Png => Box::new(PngExporter::new()),
            Self::Pam => Box::new(PamExporter::new()),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = GlyphError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "pam" => Ok(Self::Pam),
            other => Err(ExportError::FormatNotSupported(format!(
                "{other:?} (expected png or pam)"
            ))
            .into()),
        }
    }
}

/// Encode `image` and write it to `path`
pub fn write_image(
    exporter: &dyn Exporter,
    image: &ShrunkImage,
    path: &std::path::Path,
) -> Result<()> {
    let bytes = exporter.export(image)?;
    std::fs::write(path, &bytes)
        .map_err(|e| ExportError::WriteFailed(format!("{}: {}", path.display(), e)))?;
    log::info!(
        "Wrote {}x{} {} to {} ({} bytes)",
        image.width,
        image.height,
        exporter.name(),
        path.display(),
        bytes.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use glyphshrink_core::HotPoint;

    fn pixel_pair() -> ShrunkImage {
        ShrunkImage {
            width: 2,
            height: 1,
            hot_point: HotPoint::new(1, 0),
            data: vec![0, 0, 0, 255, 255, 255, 255, 0],
        }
    }

    #[test]
    fn pam_header_then_raw_tuples() {
        let pam = PamExporter.export(&pixel_pair()).unwrap();
        let header = b"P7\nWIDTH 2\nHEIGHT 1\nDEPTH 4\nMAXVAL 255\nTUPLTYPE RGB_ALPHA\nENDHDR\n";
        assert!(pam.starts_with(header));
        assert_eq!(&pam[header.len()..], &pixel_pair().data[..]);
    }

    #[test]
    fn pam_metadata() {
        assert_eq!(PamExporter.name(), "pam");
        assert_eq!(PamExporter.extension(), "pam");
        assert_eq!(PamExporter.mime_type(), "image/x-portable-arbitrarymap");
    }

    #[test]
    fn pam_rejects_short_buffer() {
        let mut image = pixel_pair();
        image.data.truncate(5);
        assert!(matches!(
            PamExporter.export(&image),
            Err(GlyphError::Export(ExportError::EncodingFailed(_)))
        ));
    }

    #[test]
    fn formats_by_name() {
        assert_eq!("png".parse::<ExportFormat>().unwrap(), ExportFormat::Png);
        assert_eq!("PAM".parse::<ExportFormat>().unwrap(), ExportFormat::Pam);
        assert!("gif".parse::<ExportFormat>().is_err());
        assert_eq!(ExportFormat::Pam.exporter().extension(), "pam");
        assert_eq!(ExportFormat::default().to_string(), "png");
    }
}
