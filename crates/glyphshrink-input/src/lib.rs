//! Bitmap sources for the shrinker
//!
//! Glyph bitmaps usually come out of a font file, but for tooling and tests
//! the simplest source is a netpbm bitmap: `P1` (ASCII) or `P4` (packed).
//! Both store one bit per pixel with 1 meaning black, rows top to bottom,
//! which is exactly what [`GlyphBitmap`] holds.

use std::path::Path;

use glyphshrink_core::{
    error::{InputError, Result},
    geometry::MAX_DIMENSION,
    BitOrder, GlyphBitmap,
};

/// Parse a PBM image (`P1` or `P4`) into an MSB-first glyph bitmap
pub fn read_pbm(data: &[u8]) -> Result<GlyphBitmap> {
    let mut header = Header::new(data);
    let magic = header.magic()?;
    let width = header.number("width")?;
    let height = header.number("height")?;

    let bitmap = match magic {
        Magic::Plain => read_plain(header.rest_after_token(), width, height)?,
        Magic::Raw => read_raw(header.rest_after_single_space(), width, height)?,
    };
    log::debug!(
        "Read {}x{} PBM ({}), {} ink pixels",
        width,
        height,
        magic.as_str(),
        bitmap.ink_count()
    );
    Ok(bitmap)
}

/// Read and parse a PBM file
pub fn load_pbm(path: impl AsRef<Path>) -> Result<GlyphBitmap> {
    let path = path.as_ref();
    let data = std::fs::read(path)?;
    log::trace!("Loaded {} bytes from {}", data.len(), path.display());
    read_pbm(&data)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Magic {
    Plain,
    Raw,
}

impl Magic {
    fn as_str(self) -> &'static str {
        match self {
            Self::Plain => "P1",
            Self::Raw => "P4",
        }
    }
}

/// Cursor over the whitespace- and comment-separated header tokens
struct Header<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Header<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn magic(&mut self) -> Result<Magic> {
        let magic = self.data.get(..2).unwrap_or(self.data);
        let found = match magic {
            b"P1" => Magic::Plain,
            b"P4" => Magic::Raw,
            other => {
                let magic = String::from_utf8_lossy(other).into_owned();
                return Err(InputError::BadMagic(magic).into());
            },
        };
        self.pos = 2;
        Ok(found)
    }

    /// Skip whitespace and `#` comments running to end of line
    fn skip_separators(&mut self) {
        while let Some(&b) = self.data.get(self.pos) {
            if b == b'#' {
                while self.data.get(self.pos).is_some_and(|&c| c != b'\n') {
                    self.pos += 1;
                }
            } else if b.is_ascii_whitespace() {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    fn number(&mut self, what: &str) -> Result<u32> {
        let before = self.pos;
        self.skip_separators();
        if self.pos == before {
            let msg = format!("expected whitespace before {what}");
            return Err(InputError::MalformedHeader(msg).into());
        }

        let start = self.pos;
        while self.data.get(self.pos).is_some_and(u8::is_ascii_digit) {
            self.pos += 1;
        }
        let digits = std::str::from_utf8(&self.data[start..self.pos]).unwrap_or_default();
        let value: u32 = digits
            .parse()
            .map_err(|_| InputError::MalformedHeader(format!("bad {what} {digits:?}")))?;
        if value == 0 {
            return Err(InputError::MalformedHeader(format!("{what} must be positive")).into());
        }
        if i64::from(value) > MAX_DIMENSION {
            let msg = format!("{what} {value} exceeds {MAX_DIMENSION}");
            return Err(InputError::MalformedHeader(msg).into());
        }
        Ok(value)
    }

    /// Remaining bytes for the ASCII format, which tolerates any separators
    fn rest_after_token(&self) -> &'a [u8] {
        &self.data[self.pos..]
    }

    /// Remaining bytes for the packed format: exactly one whitespace byte
    /// separates the header from the pixel data
    fn rest_after_single_space(&self) -> &'a [u8] {
        let rest = &self.data[self.pos..];
        match rest.first() {
            Some(b) if b.is_ascii_whitespace() => &rest[1..],
            _ => rest,
        }
    }
}

/// `height` rows of `row` units each
fn rows_len(row: usize, height: u32) -> Result<usize> {
    row.checked_mul(height as usize).ok_or_else(|| {
        InputError::MalformedHeader(format!("{height} rows of {row} is too large")).into()
    })
}

fn read_raw(pixels: &[u8], width: u32, height: u32) -> Result<GlyphBitmap> {
    let bytes_wide = (width as usize).div_ceil(8);
    let expected = rows_len(bytes_wide, height)?;
    if pixels.len() < expected {
        return Err(InputError::Truncated {
            expected,
            actual: pixels.len(),
        }
        .into());
    }
    let bitmap = GlyphBitmap::new(
        width,
        height,
        bytes_wide,
        BitOrder::MsbFirst,
        pixels[..expected].to_vec(),
    )?;
    Ok(bitmap)
}

fn read_plain(pixels: &[u8], width: u32, height: u32) -> Result<GlyphBitmap> {
    let bytes_wide = (width as usize).div_ceil(8);
    let expected = rows_len(width as usize, height)?;
    // every pixel takes at least one byte of input
    if pixels.len() < expected {
        return Err(InputError::Truncated {
            expected,
            actual: pixels.len(),
        }
        .into());
    }
    let mut bits = vec![0u8; rows_len(bytes_wide, height)?];

    let mut count = 0usize;
    let mut in_comment = false;
    for &b in pixels {
        if count == expected {
            break;
        }
        if in_comment {
            in_comment = b != b'\n';
            continue;
        }
        let ink = match b {
            b'0' => false,
            b'1' => true,
            b'#' => {
                in_comment = true;
                continue;
            },
            b if b.is_ascii_whitespace() => continue,
            other => return Err(InputError::InvalidPixel(char::from(other)).into()),
        };
        if ink {
            let (x, y) = (count % width as usize, count / width as usize);
            bits[y * bytes_wide + x / 8] |= 0x80 >> (x % 8);
        }
        count += 1;
    }

    if count < expected {
        return Err(InputError::Truncated {
            expected,
            actual: count,
        }
        .into());
    }
    Ok(GlyphBitmap::new(width, height, bytes_wide, BitOrder::MsbFirst, bits)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glyphshrink_core::GlyphError;

    fn input_error(result: Result<GlyphBitmap>) -> InputError {
        match result {
            Err(GlyphError::Input(err)) => err,
            other => panic!("expected an input error, got {other:?}"),
        }
    }

    #[test]
    fn plain_with_comments() {
        let pbm = b"P1\n# a little L\n3 4\n1 0 0\n1 0 0\n1 0 0 # trailing\n1 1 1\n";
        let bitmap = read_pbm(pbm).unwrap();

        assert_eq!((bitmap.width(), bitmap.height()), (3, 4));
        assert!(bitmap.is_set(0, 0));
        assert!(!bitmap.is_set(1, 0));
        assert!(bitmap.is_set(2, 3));
        assert_eq!(bitmap.ink_count(), 6);
    }

    #[test]
    fn plain_without_separators() {
        let bitmap = read_pbm(b"P1 4 2 10010110").unwrap();
        assert_eq!(bitmap.bits(), &[0b1001_0000, 0b0110_0000]);
    }

    #[test]
    fn raw_rows_are_byte_aligned() {
        let mut pbm = b"P4\n10 2\n".to_vec();
        pbm.extend_from_slice(&[0xFF, 0xC0, 0x80, 0x40]);
        let bitmap = read_pbm(&pbm).unwrap();

        assert_eq!(bitmap.bytes_wide(), 2);
        assert_eq!(bitmap.ink_count(), 12);
        assert!(bitmap.is_set(9, 1));
        assert!(!bitmap.is_set(8, 1));
    }

    #[test]
    fn raw_data_may_start_with_whitespace_bytes() {
        // 0x20 and 0x0A are legal pixel bytes right after the separator
        let pbm = [b"P4 8 2\n".as_slice(), &[0x20, 0x0A]].concat();
        let bitmap = read_pbm(&pbm).unwrap();
        assert_eq!(bitmap.bits(), &[0x20, 0x0A]);
    }

    #[test]
    fn rejects_other_formats() {
        assert_eq!(
            input_error(read_pbm(b"P5\n1 1\n255\n\0")),
            InputError::BadMagic("P5".into())
        );
        assert!(matches!(input_error(read_pbm(b"")), InputError::BadMagic(_)));
    }

    #[test]
    fn rejects_bad_headers() {
        assert!(matches!(
            input_error(read_pbm(b"P1\n0 3\n")),
            InputError::MalformedHeader(_)
        ));
        assert!(matches!(
            input_error(read_pbm(b"P1\nx 3\n")),
            InputError::MalformedHeader(_)
        ));
        assert!(matches!(
            input_error(read_pbm(b"P13 3\n")),
            InputError::MalformedHeader(_)
        ));
    }

    #[test]
    fn rejects_short_data() {
        assert_eq!(
            input_error(read_pbm(b"P1 2 2 1 0 1")),
            InputError::Truncated {
                expected: 4,
                actual: 3
            }
        );
        assert_eq!(
            input_error(read_pbm(b"P4 9 2\n\xff\xff\xff")),
            InputError::Truncated {
                expected: 4,
                actual: 3
            }
        );
    }

    #[test]
    fn rejects_stray_characters() {
        assert_eq!(
            input_error(read_pbm(b"P1 2 1 1 2")),
            InputError::InvalidPixel('2')
        );
    }
}
