//! CLI argument definitions using Clap v4

use std::path::{Path, PathBuf};

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use glyphshrink_core::AlphaMode;
use glyphshrink_export::ExportFormat;

/// glyphshrink - shrink monochrome glyphs without losing their anchor
#[derive(Parser, Debug)]
#[command(name = "glyphshrink")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// More logging (-v debug, -vv trace); RUST_LOG also works
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// No progress output on stderr
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Shrink one PBM glyph into an RGBA image
    #[command(alias = "s")]
    Shrink(ShrinkArgs),

    /// Show the shrink geometry for a glyph, or list backends and formats
    #[command(alias = "i")]
    Info(InfoArgs),

    /// Shrink several PBM glyphs and set them on one line
    #[command(alias = "l")]
    Line(LineArgs),
}

/// Options shared by every command that shrinks
#[derive(Args, Debug, Clone)]
pub struct ShrinkOptions {
    /// Ratio between glyph pixels and display pixels
    #[arg(short = 's', long = "shrink-factor", default_value_t = 2.0)]
    pub shrink_factor: f64,

    /// Raster backend
    #[arg(short = 'b', long, value_enum, default_value_t = BackendArg::Soft)]
    pub backend: BackendArg,

    /// How gray levels become alpha (default: GLYPHSHRINK_ALPHA or binary)
    #[arg(short = 'a', long, value_enum)]
    pub alpha: Option<AlphaArg>,

    /// Legibility multiplier on the shrink factor (default: GLYPHSHRINK_LEGIBILITY or 0.9)
    #[arg(long)]
    pub legibility: Option<f64>,
}

/// Where the glyph is anchored
#[derive(Args, Debug, Clone, Copy)]
pub struct HotPointArgs {
    /// Hot point column, in glyph pixels (may be negative)
    #[arg(short = 'x', long = "hot-x", default_value_t = 0, allow_negative_numbers = true)]
    pub hot_x: i32,

    /// Hot point row, in glyph pixels (may be negative)
    #[arg(short = 'y', long = "hot-y", default_value_t = 0, allow_negative_numbers = true)]
    pub hot_y: i32,
}

/// Output file and format
#[derive(Args, Debug, Clone)]
pub struct OutputArgs {
    /// Output file
    #[arg(short = 'o', long = "output-file")]
    pub output: PathBuf,

    /// Output format (default: from the output file extension, else png)
    #[arg(short = 'O', long = "format", value_enum)]
    pub format: Option<FormatArg>,
}

impl OutputArgs {
    /// Explicit format, or whatever the output extension suggests
    pub fn export_format(&self) -> ExportFormat {
        match self.format {
            Some(format) => format.into(),
            None => format_from_extension(&self.output),
        }
    }
}

fn format_from_extension(path: &Path) -> ExportFormat {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(|ext| ext.parse().ok())
        .unwrap_or_default()
}

#[derive(Args, Debug)]
pub struct ShrinkArgs {
    /// PBM glyph (P1 or P4)
    pub input: PathBuf,

    #[command(flatten)]
    pub hot: HotPointArgs,

    #[command(flatten)]
    pub options: ShrinkOptions,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args, Debug)]
pub struct InfoArgs {
    /// PBM glyph to analyse; without one, list backends and formats
    pub input: Option<PathBuf>,

    #[command(flatten)]
    pub hot: HotPointArgs,

    #[command(flatten)]
    pub options: ShrinkOptions,
}

#[derive(Args, Debug)]
pub struct LineArgs {
    /// PBM glyphs, left to right
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Advance in glyph pixels (default: each glyph's width)
    #[arg(long)]
    pub advance: Option<i32>,

    /// Baseline row in every glyph (default: each glyph's bottom row)
    #[arg(long, allow_negative_numbers = true)]
    pub baseline: Option<i32>,

    #[command(flatten)]
    pub options: ShrinkOptions,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendArg {
    /// Pure Rust gray canvas
    Soft,
    /// tiny-skia pixmaps
    Skia,
}

impl BackendArg {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Soft => "soft",
            Self::Skia => "skia",
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlphaArg {
    /// White is transparent, everything else opaque
    Binary,
    /// Black ink, alpha from gray level
    Coverage,
}

impl From<AlphaArg> for AlphaMode {
    fn from(arg: AlphaArg) -> Self {
        match arg {
            AlphaArg::Binary => AlphaMode::Binary,
            AlphaArg::Coverage => AlphaMode::Coverage,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatArg {
    /// RGBA PNG
    Png,
    /// Netpbm PAM, RGB_ALPHA tuples
    Pam,
}

impl From<FormatArg> for ExportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Png => ExportFormat::Png,
            FormatArg::Pam => ExportFormat::Pam,
        }
    }
}
