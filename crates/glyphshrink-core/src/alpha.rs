//! Alpha synthesis for shrunk glyphs
//!
//! The resampler hands back plain gray levels. Turning them into something
//! that can be laid over a page needs an alpha channel, and there are two
//! ways to get one.

use std::fmt;
use std::str::FromStr;

use crate::error::GlyphError;

/// How gray levels become opacity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AlphaMode {
    /// Pure white is fully transparent, anything else fully opaque.
    ///
    /// Gray edge pixels keep their gray color but lose their partial
    /// coverage, giving slightly bolder glyphs.
    #[default]
    Binary,
    /// Black ink with `alpha = 255 - gray`, keeping the antialiasing
    Coverage,
}

impl AlphaMode {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Binary => "binary",
            Self::Coverage => "coverage",
        }
    }
}

impl fmt::Display for AlphaMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AlphaMode {
    type Err = GlyphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "binary" => Ok(Self::Binary),
            "coverage" => Ok(Self::Coverage),
            other => Err(GlyphError::Config(format!(
                "unknown alpha mode '{other}' (expected binary or coverage)"
            ))),
        }
    }
}

/// Expand gray levels to RGBA8 with the chosen alpha rule
pub fn synthesize(gray: &[u8], mode: AlphaMode) -> Vec<u8> {
    let mut rgba = Vec::with_capacity(gray.len() * 4);
    for &g in gray {
        match mode {
            AlphaMode::Binary if g == 255 => rgba.extend_from_slice(&[255, 255, 255, 0]),
            AlphaMode::Binary => rgba.extend_from_slice(&[g, g, g, 255]),
            AlphaMode::Coverage => rgba.extend_from_slice(&[0, 0, 0, 255 - g]),
        }
    }
    rgba
}
