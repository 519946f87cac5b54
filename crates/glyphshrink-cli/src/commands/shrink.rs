//! Shrink command implementation

use anyhow::{Context, Result};
use glyphshrink_core::{Glyph, HotPoint};
use glyphshrink_export::write_image;
use glyphshrink_input::load_pbm;

use crate::cli::ShrinkArgs;

pub fn run(args: &ShrinkArgs, quiet: bool) -> Result<()> {
    let context = super::shrink_context(&args.options)?;
    let bitmap = load_pbm(&args.input)
        .with_context(|| format!("Failed to read glyph {}", args.input.display()))?;

    let hot_point = HotPoint::new(args.hot.hot_x, args.hot.hot_y);
    let mut glyph = Glyph::new(bitmap, hot_point);
    let image = glyph
        .shrunk_character(&context)
        .with_context(|| format!("Failed to shrink {}", args.input.display()))?;

    let format = args.output.export_format();
    let exporter = format.exporter();
    write_image(exporter.as_ref(), &image, &args.output.output)
        .with_context(|| format!("Failed to write {}", args.output.output.display()))?;

    if !quiet {
        eprintln!(
            "{}x{} -> {}x{}, hot point ({}, {}) -> ({}, {})",
            glyph.bitmap().width(),
            glyph.bitmap().height(),
            image.width,
            image.height,
            hot_point.x,
            hot_point.y,
            image.hot_point.x,
            image.hot_point.y
        );
        eprintln!("Wrote {} to {}", format, args.output.output.display());
    }
    Ok(())
}
