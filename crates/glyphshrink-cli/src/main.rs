//! glyphshrink CLI: shrink monochrome glyphs into alpha-blended images

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    match &cli.command {
        Commands::Shrink(args) => commands::shrink::run(args, cli.quiet),
        Commands::Info(args) => commands::info::run(args),
        Commands::Line(args) => commands::line::run(args, cli.quiet),
    }
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    let mut builder = env_logger::Builder::new();
    builder.filter_level(level);
    // RUST_LOG, when set, wins over the -v count
    builder.parse_default_env();
    builder.init();
}
