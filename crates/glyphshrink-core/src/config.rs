//! Shrinker configuration
//!
//! Two knobs, both with sensible defaults and both overridable from the
//! environment:
//!
//! - `GLYPHSHRINK_LEGIBILITY` - multiplier applied to the shrink factor while
//!   shrinking (default `0.9`). Values below one make glyphs slightly larger
//!   than their nominal size, which keeps thin fonts readable on screen. Glyph
//!   positions are not affected.
//! - `GLYPHSHRINK_ALPHA` - `binary` (default) or `coverage`, see [`AlphaMode`].
//!
//! ```bash
//! GLYPHSHRINK_ALPHA=coverage ./glyphshrink shrink a.pbm --shrink-factor 3 -o a.png
//! ```

use crate::alpha::AlphaMode;
use crate::error::{GlyphError, Result};

/// Under-shrink applied to every glyph unless configured otherwise
pub const DEFAULT_LEGIBILITY: f64 = 0.9;

pub const LEGIBILITY_ENV: &str = "GLYPHSHRINK_LEGIBILITY";
pub const ALPHA_ENV: &str = "GLYPHSHRINK_ALPHA";

/// How glyphs get shrunk
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShrinkConfig {
    /// Multiplier on the shrink factor used only for rasterizing
    pub legibility: f64,
    /// Alpha synthesis rule for the final image
    pub alpha_mode: AlphaMode,
}

impl Default for ShrinkConfig {
    fn default() -> Self {
        Self {
            legibility: DEFAULT_LEGIBILITY,
            alpha_mode: AlphaMode::Binary,
        }
    }
}

impl ShrinkConfig {
    /// Defaults, overridden by `GLYPHSHRINK_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults, overridden by whatever `lookup` returns for each variable
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(raw) = lookup(LEGIBILITY_ENV) {
            config.legibility = raw.trim().parse().map_err(|_| {
                GlyphError::Config(format!("{LEGIBILITY_ENV}={raw:?} is not a number"))
            })?;
            log::info!("Legibility factor {} via {}", config.legibility, LEGIBILITY_ENV);
        }

        if let Some(raw) = lookup(ALPHA_ENV) {
            config.alpha_mode = raw.parse()?;
            log::info!("Alpha mode {} via {}", config.alpha_mode, ALPHA_ENV);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn with_legibility(mut self, legibility: f64) -> Self {
        self.legibility = legibility;
        self
    }

    pub fn with_alpha_mode(mut self, alpha_mode: AlphaMode) -> Self {
        self.alpha_mode = alpha_mode;
        self
    }

    /// Reject a legibility factor that is not finite and positive
    pub fn validate(&self) -> Result<()> {
        if !self.legibility.is_finite() || self.legibility <= 0.0 {
            return Err(GlyphError::Config(format!(
                "legibility factor must be finite and positive, got {}",
                self.legibility
            )));
        }
        Ok(())
    }
}
