//! Info command implementation
//!
//! With a glyph: the geometry the shrinker will use, without rasterising.
//! Without one: the backends, alpha modes and formats this build offers.

use anyhow::{Context, Result};
use glyphshrink_core::{geometry::ShrinkGeometry, HotPoint};
use glyphshrink_input::load_pbm;

use crate::cli::InfoArgs;

pub fn run(args: &InfoArgs) -> Result<()> {
    println!("glyphshrink v{}", env!("CARGO_PKG_VERSION"));
    println!();

    match &args.input {
        Some(path) => {
            let context = super::shrink_context(&args.options)?;
            let bitmap = load_pbm(path)
                .with_context(|| format!("Failed to read glyph {}", path.display()))?;
            let hot = HotPoint::new(args.hot.hot_x, args.hot.hot_y);
            let geometry = ShrinkGeometry::compute(
                bitmap.width(),
                bitmap.height(),
                hot,
                context.effective_factor(),
            )?;

            println!("Glyph:            {}", path.display());
            println!(
                "  Size:           {}x{} ({} ink pixels)",
                bitmap.width(),
                bitmap.height(),
                bitmap.ink_count()
            );
            println!("  Hot point:      ({}, {})", hot.x, hot.y);
            println!(
                "Shrink factor:    {} (effective {}, legibility {})",
                context.shrink_factor(),
                geometry.effective_factor,
                context.config().legibility
            );
            println!(
                "  Padding:        rows {}+{}, cols {}+{}",
                geometry.pre_rows, geometry.post_rows, geometry.pre_cols, geometry.post_cols
            );
            println!(
                "  Canvas:         {}x{}",
                geometry.canvas_width(bitmap.width()),
                geometry.canvas_height(bitmap.height())
            );
            println!(
                "  Shrunk size:    {}x{}",
                geometry.shrunk_width, geometry.shrunk_height
            );
            println!(
                "  Shrunk hot:     ({}, {})",
                geometry.shrunk_hot_point.x, geometry.shrunk_hot_point.y
            );
            println!("  Alpha:          {}", context.config().alpha_mode);
        },
        None => print_capabilities(),
    }
    Ok(())
}

fn print_capabilities() {
    println!("Backends:");
    println!("  soft              - Pure Rust 8-bit gray canvas");
    println!("  skia              - tiny-skia pixmaps");
    println!();
    println!("Alpha modes:");
    println!("  binary            - White transparent, everything else opaque (default)");
    println!("  coverage          - Black ink, alpha = 255 - gray");
    println!();
    println!("Formats:");
    println!("  png               - RGBA PNG");
    println!("  pam               - Netpbm P7, RGB_ALPHA");
}
