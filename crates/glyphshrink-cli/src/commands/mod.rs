//! Command implementations

pub mod info;
pub mod line;
pub mod shrink;

use std::sync::Arc;

use anyhow::{Context, Result};
use glyphshrink_core::{traits::RasterBackend, ShrinkConfig, ShrinkContext};
use glyphshrink_raster_skia::SkiaBackend;
use glyphshrink_raster_soft::SoftBackend;

use crate::cli::{BackendArg, ShrinkOptions};

pub fn backend(arg: BackendArg) -> Arc<dyn RasterBackend> {
    match arg {
        BackendArg::Soft => Arc::new(SoftBackend::new()),
        BackendArg::Skia => Arc::new(SkiaBackend::new()),
    }
}

/// Environment configuration with command-line overrides on top
pub fn shrink_config(options: &ShrinkOptions) -> Result<ShrinkConfig> {
    let mut config =
        ShrinkConfig::from_env().context("Invalid shrink configuration in environment")?;
    if let Some(legibility) = options.legibility {
        config = config.with_legibility(legibility);
    }
    if let Some(alpha) = options.alpha {
        config = config.with_alpha_mode(alpha.into());
    }
    Ok(config)
}

pub fn shrink_context(options: &ShrinkOptions) -> Result<ShrinkContext> {
    let config = shrink_config(options)?;
    let raster = backend(options.backend);
    let context = ShrinkContext::with_config(options.shrink_factor, config, raster)
        .context("Invalid shrink settings")?;
    log::debug!(
        "Shrinking at {} (effective {}) on {}",
        context.shrink_factor(),
        context.effective_factor(),
        context.backend().name()
    );
    Ok(context)
}
