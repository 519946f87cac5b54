//! Packed 1-bit glyph bitmaps
//!
//! A glyph arrives from the font as a monochrome raster: `height` rows of
//! `bytes_wide` bytes each, eight pixels per byte. Set bits are ink.
//! Rows are read through [`BitRow`], a bounds-checked view, so callers
//! never do their own stride arithmetic.

use crate::error::BitmapError;

/// Which bit of a byte holds the leftmost pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BitOrder {
    /// Bit 7 is the leftmost pixel (PBM, PK fonts)
    #[default]
    MsbFirst,
    /// Bit 0 is the leftmost pixel (X11 bitmaps)
    LsbFirst,
}

/// An unscaled monochrome glyph raster
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphBitmap {
    width: u32,
    height: u32,
    bytes_wide: usize,
    bit_order: BitOrder,
    bits: Vec<u8>,
}

impl GlyphBitmap {
    /// Wrap a packed buffer, validating its shape
    ///
    /// Extra trailing bytes beyond `bytes_wide * height` are dropped.
    pub fn new(
        width: u32,
        height: u32,
        bytes_wide: usize,
        bit_order: BitOrder,
        mut bits: Vec<u8>,
    ) -> Result<Self, BitmapError> {
        if width == 0 || height == 0 {
            return Err(BitmapError::EmptyBitmap { width, height });
        }
        if bytes_wide.saturating_mul(8) < width as usize {
            return Err(BitmapError::StrideTooSmall { bytes_wide, width });
        }
        let expected = bytes_wide
            .checked_mul(height as usize)
            .ok_or(BitmapError::TooLarge { bytes_wide, height })?;
        if bits.len() < expected {
            return Err(BitmapError::BufferTooSmall {
                expected,
                actual: bits.len(),
            });
        }
        bits.truncate(expected);

        Ok(Self {
            width,
            height,
            bytes_wide,
            bit_order,
            bits,
        })
    }

    /// Build an MSB-first bitmap from rows of booleans (`true` = ink)
    ///
    /// All rows must have the same length.
    pub fn from_rows<R: AsRef<[bool]>>(rows: &[R]) -> Result<Self, BitmapError> {
        let height = rows.len() as u32;
        let width = rows.first().map(|r| r.as_ref().len()).unwrap_or(0) as u32;
        let bytes_wide = (width as usize).div_ceil(8);
        let mut bits = vec![0u8; bytes_wide * rows.len()];

        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != width as usize {
                return Err(BitmapError::RaggedRows {
                    row: y,
                    expected: width as usize,
                    actual: row.len(),
                });
            }
            for (x, &ink) in row.iter().enumerate() {
                if ink {
                    bits[y * bytes_wide + x / 8] |= 0x80 >> (x % 8);
                }
            }
        }

        Self::new(width, height, bytes_wide, BitOrder::MsbFirst, bits)
    }

    /// A fully inked `width` x `height` bitmap
    pub fn solid(width: u32, height: u32) -> Result<Self, BitmapError> {
        let bytes_wide = (width as usize).div_ceil(8);
        let len = bytes_wide
            .checked_mul(height as usize)
            .ok_or(BitmapError::TooLarge { bytes_wide, height })?;
        Self::new(width, height, bytes_wide, BitOrder::MsbFirst, vec![0xFF; len])
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row stride in bytes
    pub fn bytes_wide(&self) -> usize {
        self.bytes_wide
    }

    pub fn bit_order(&self) -> BitOrder {
        self.bit_order
    }

    /// The packed buffer, `bytes_wide * height` bytes long
    pub fn bits(&self) -> &[u8] {
        &self.bits
    }

    /// View one row, or `None` past the bottom edge
    pub fn row(&self, y: u32) -> Option<BitRow<'_>> {
        if y >= self.height {
            return None;
        }
        let start = y as usize * self.bytes_wide;
        Some(BitRow {
            bytes: &self.bits[start..start + self.bytes_wide],
            width: self.width,
            bit_order: self.bit_order,
        })
    }

    /// Iterate over all rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = BitRow<'_>> + '_ {
        (0..self.height).filter_map(move |y| self.row(y))
    }

    /// Is the pixel at (x, y) inked? Out-of-range pixels are blank.
    pub fn is_set(&self, x: u32, y: u32) -> bool {
        self.row(y).is_some_and(|row| row.is_set(x))
    }

    /// Number of inked pixels
    pub fn ink_count(&self) -> usize {
        self.rows()
            .map(|row| (0..row.width()).filter(|&x| row.is_set(x)).count())
            .sum()
    }
}

/// A borrowed view of one bitmap row
#[derive(Debug, Clone, Copy)]
pub struct BitRow<'a> {
    bytes: &'a [u8],
    width: u32,
    bit_order: BitOrder,
}

impl<'a> BitRow<'a> {
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Is pixel `x` of this row inked? Pixels past the width are blank.
    pub fn is_set(&self, x: u32) -> bool {
        if x >= self.width {
            return false;
        }
        let byte = self.bytes[(x / 8) as usize];
        let mask = match self.bit_order {
            BitOrder::MsbFirst => 0x80 >> (x % 8),
            BitOrder::LsbFirst => 0x01 << (x % 8),
        };
        byte & mask != 0
    }

    /// Iterate over the pixels of this row, left to right
    pub fn pixels(self) -> impl Iterator<Item = bool> + 'a {
        (0..self.width).map(move |x| self.is_set(x))
    }
}
