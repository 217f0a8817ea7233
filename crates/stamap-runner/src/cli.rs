//! Command-line arguments.

use clap::Parser;
use stamap_cpt::preview::{DEFAULT_SWATCH_HEIGHT, DEFAULT_SWATCH_WIDTH};
use stamap_dem::{Region, Resolution};
use stamap_gmt::InsetPosition;
use std::path::PathBuf;

/// Draw a topographic station distribution map from Dataless SEED or
/// StationXML metadata.
#[derive(Parser, Debug, Clone)]
#[command(name = "stamap", version)]
#[command(after_help = "\
Examples:
  stamap --dataless BJ.dataless --output station_map.png --resolution 03s --labels --title \"Beijing Network\"
  stamap --dataless BJ.dataless --cpt cpt/gray_relief.cpt --output custom_map.png
  stamap --dataless BJ.xml --output station_map.pdf --colorbar --inset --inset-position jTL+o0.2c")]
pub struct Args {
    /// Station metadata file (Dataless SEED or StationXML).
    #[arg(long)]
    pub dataless: PathBuf,

    /// Output figure; the extension (png, pdf, jpg, jpeg) selects the format.
    #[arg(long, default_value = "temp_style_map.png")]
    pub output: PathBuf,

    /// Map region lon_min/lon_max/lat_min/lat_max (default: stations plus padding).
    #[arg(long, allow_hyphen_values = true)]
    pub region: Option<Region>,

    /// Topography grid resolution: 01m, 30s, 15s, 03s or 01s.
    #[arg(long, default_value = "03s")]
    pub resolution: Resolution,

    /// Label stations with NET.STA.
    #[arg(long)]
    pub labels: bool,

    /// Map title.
    #[arg(long)]
    pub title: Option<String>,

    /// Palette file (default from config, cpt/colombia.cpt).
    #[arg(long)]
    pub cpt: Option<PathBuf>,

    /// Draw an elevation colourbar.
    #[arg(long)]
    pub colorbar: bool,

    /// Draw a locator inset.
    #[arg(long)]
    pub inset: bool,

    /// Inset region lon_min/lon_max/lat_min/lat_max (implies --inset).
    #[arg(long, allow_hyphen_values = true)]
    pub inset_region: Option<Region>,

    /// Inset anchor, j{TL|TR|BL|BR}[+o<offset>].
    #[arg(long, default_value = "jBR+o0.1c")]
    pub inset_position: InsetPosition,

    /// YAML config file.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Grid cache directory (default from config, cache).
    #[arg(long)]
    pub cache_dir: Option<PathBuf>,
}

impl Args {
    /// Whether an inset was requested.
    pub fn wants_inset(&self) -> bool {
        self.inset || self.inset_region.is_some()
    }
}

/// Render preview images for every palette in a directory.
#[derive(Parser, Debug, Clone)]
#[command(name = "stamap-cpt-preview", version)]
pub struct PreviewArgs {
    /// Directory of .cpt files.
    #[arg(long, default_value = "cpt")]
    pub cpt_dir: PathBuf,

    /// Where previews are written (default: the palette directory).
    #[arg(long)]
    pub out_dir: Option<PathBuf>,

    /// Swatch width in pixels.
    #[arg(long, default_value_t = DEFAULT_SWATCH_WIDTH)]
    pub width: u32,

    /// Swatch height in pixels.
    #[arg(long, default_value_t = DEFAULT_SWATCH_HEIGHT)]
    pub height: u32,

    /// Also draw a full station map per palette from this metadata file.
    #[arg(long)]
    pub dataless: Option<PathBuf>,

    /// Grid resolution for map previews.
    #[arg(long, default_value = "03s")]
    pub resolution: Resolution,

    /// YAML config file.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Grid cache directory (default from config, cache).
    #[arg(long)]
    pub cache_dir: Option<PathBuf>,
}
