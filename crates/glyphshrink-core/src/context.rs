//! Shared state every shrink reads at call time
//!
//! A context bundles the current shrink factor, the [`ShrinkConfig`], and the
//! raster backend. Glyphs don't remember which context produced their cached
//! image; whoever changes the factor is responsible for invalidating them
//! (the [`GlyphTable`](crate::GlyphTable) does this for its glyphs).

use std::fmt;
use std::sync::Arc;

use crate::config::ShrinkConfig;
use crate::error::{GlyphError, Result};
use crate::traits::RasterBackend;

/// Shrink factor, configuration and backend for one zoom level
#[derive(Clone)]
pub struct ShrinkContext {
    shrink_factor: f64,
    config: ShrinkConfig,
    backend: Arc<dyn RasterBackend>,
}

impl ShrinkContext {
    /// A context with the default configuration
    pub fn new(shrink_factor: f64, backend: Arc<dyn RasterBackend>) -> Result<Self> {
        Self::with_config(shrink_factor, ShrinkConfig::default(), backend)
    }

    pub fn with_config(
        shrink_factor: f64,
        config: ShrinkConfig,
        backend: Arc<dyn RasterBackend>,
    ) -> Result<Self> {
        validate_shrink_factor(shrink_factor)?;
        config.validate()?;
        Ok(Self {
            shrink_factor,
            config,
            backend,
        })
    }

    /// Unscaled-to-displayed size ratio
    pub fn shrink_factor(&self) -> f64 {
        self.shrink_factor
    }

    /// The factor glyphs are actually rasterized at
    pub fn effective_factor(&self) -> f64 {
        self.shrink_factor * self.config.legibility
    }

    pub fn config(&self) -> &ShrinkConfig {
        &self.config
    }

    pub fn backend(&self) -> &dyn RasterBackend {
        self.backend.as_ref()
    }

    /// Change the shrink factor; cached glyph images become stale
    pub fn set_shrink_factor(&mut self, shrink_factor: f64) -> Result<()> {
        validate_shrink_factor(shrink_factor)?;
        self.shrink_factor = shrink_factor;
        Ok(())
    }
}

impl fmt::Debug for ShrinkContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShrinkContext")
            .field("shrink_factor", &self.shrink_factor)
            .field("config", &self.config)
            .field("backend", &self.backend.name())
            .finish()
    }
}

pub(crate) fn validate_shrink_factor(shrink_factor: f64) -> Result<()> {
    if !shrink_factor.is_finite() || shrink_factor <= 0.0 {
        return Err(GlyphError::InvalidShrinkFactor(shrink_factor));
    }
    Ok(())
}
