//! Error types for glyphshrink

use thiserror::Error;

pub type Result<T> = std::result::Result<T, GlyphError>;

/// Main error type for glyphshrink
#[derive(Debug, Error)]
pub enum GlyphError {
    #[error("Invalid shrink factor: {0} (must be finite and positive)")]
    InvalidShrinkFactor(f64),

    #[error("Invalid glyph bitmap: {0}")]
    InvalidBitmap(#[from] BitmapError),

    #[error("Raster operation failed: {0}")]
    Raster(#[from] RasterError),

    #[error("Input failed: {0}")]
    Input(#[from] InputError),

    #[error("Export failed: {0}")]
    Export(#[from] ExportError),

    #[error("Character code {code} is outside a table of {size} glyphs")]
    CodeOutOfRange { code: u32, size: usize },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Glyph bitmap validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BitmapError {
    #[error("Empty bitmap: {width}x{height}")]
    EmptyBitmap { width: u32, height: u32 },

    #[error("Row stride of {bytes_wide} bytes cannot hold {width} pixels")]
    StrideTooSmall { bytes_wide: usize, width: u32 },

    #[error("Buffer too small: expected {expected} bytes, got {actual}")]
    BufferTooSmall { expected: usize, actual: usize },

    #[error("Bitmap too large: {height} rows of {bytes_wide} bytes")]
    TooLarge { bytes_wide: usize, height: u32 },

    #[error("Row {row} has {actual} pixels, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        actual: usize,
    },
}

/// Raster surface errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RasterError {
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: i64, height: i64 },

    #[error("Surface creation failed: {0}")]
    SurfaceCreationFailed(String),

    #[error("Blit of {width}x{height} at ({x}, {y}) exceeds the surface")]
    BlitOutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    #[error("Backend error: {0}")]
    Backend(String),
}

/// Bitmap source errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("Not a PBM file (magic {0:?})")]
    BadMagic(String),

    #[error("Malformed header: {0}")]
    MalformedHeader(String),

    #[error("Truncated pixel data: expected {expected} bytes, got {actual}")]
    Truncated { expected: usize, actual: usize },

    #[error("Invalid pixel value {0:?}")]
    InvalidPixel(char),
}

/// Export errors
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),

    #[error("Format not supported: {0}")]
    FormatNotSupported(String),

    #[error("Write failed: {0}")]
    WriteFailed(String),
}
