//! Line command implementation
//!
//! Each input glyph gets the next character code in a fresh table, so the
//! line is just those codes in order.

use anyhow::{Context, Result};
use glyphshrink_core::{compose::compose_line, Glyph, GlyphTable, HotPoint};
use glyphshrink_export::write_image;
use glyphshrink_input::load_pbm;

use crate::cli::LineArgs;

pub fn run(args: &LineArgs, quiet: bool) -> Result<()> {
    let context = super::shrink_context(&args.options)?;
    let mut table = GlyphTable::with_size(context, args.inputs.len());

    let mut codes = Vec::with_capacity(args.inputs.len());
    for (code, path) in (0u32..).zip(&args.inputs) {
        let bitmap =
            load_pbm(path).with_context(|| format!("Failed to read glyph {}", path.display()))?;
        let baseline = args
            .baseline
            .unwrap_or_else(|| bitmap.height() as i32 - 1);
        let advance = args.advance.unwrap_or(bitmap.width() as i32);
        let glyph = Glyph::new(bitmap, HotPoint::new(0, baseline)).with_advance(advance);
        table.insert(code, glyph)?;
        codes.push(code);
    }

    let canvas = compose_line(&mut table, &codes).context("Failed to compose line")?;
    let image = canvas.into_image();

    let format = args.output.export_format();
    let exporter = format.exporter();
    write_image(exporter.as_ref(), &image, &args.output.output)
        .with_context(|| format!("Failed to write {}", args.output.output.display()))?;

    if !quiet {
        eprintln!(
            "Set {} glyphs on a {}x{} line, baseline at row {}",
            codes.len(),
            image.width,
            image.height,
            image.hot_point.y
        );
        eprintln!("Wrote {} to {}", format, args.output.output.display());
    }
    Ok(())
}
