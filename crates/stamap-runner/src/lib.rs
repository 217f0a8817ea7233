//! # stamap-runner
//!
//! Command-line front end: station metadata in, topographic station map out.
//!
//! A run goes through these steps:
//! 1. load the station inventory (Dataless SEED or StationXML)
//! 2. resolve the map region (manual, or stations plus padding)
//! 3. load the palette
//! 4. make sure the elevation grid (and inset grid) are in the cache
//! 5. plan and render the map through GMT
//!
//! [`run`] wires in the real `gmt` executable and grid source;
//! [`run_with`] takes them as parameters so the whole pipeline can be
//! exercised without GMT installed.

pub mod bounds;
pub mod cli;
pub mod config;
mod error;
pub mod preview;

pub use bounds::resolve_region;
pub use cli::{Args, PreviewArgs};
pub use config::{Config, DownloadConfig};
pub use error::{Error, ErrorKind};

use stamap_cpt::Palette;
use stamap_dem::{GridCache, GridFetcher, HttpGridFetcher};
use stamap_gmt::{
    GmtGridFetcher, GmtProcess, GmtRunner, InsetRequest, MapComposer, MapRequest, OutputFormat,
};
use stamap_inventory::{Inventory, Station};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

/// Result type for runs.
pub type Result<T> = std::result::Result<T, Error>;

/// Install the stderr log subscriber. `RUST_LOG` overrides the default
/// `info` level.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Load the config file if one was given, otherwise the defaults.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let config = match path {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    config.validate()?;
    Ok(config)
}

/// Grid source for cache misses: HTTP when configured, GMT otherwise.
pub fn grid_fetcher(config: &Config, gmt: GmtProcess) -> Result<Box<dyn GridFetcher>> {
    match &config.download {
        Some(download) => {
            let fetcher = HttpGridFetcher::with_timeout(
                download.url_template.as_str(),
                Duration::from_secs(download.timeout_secs),
            )?;
            Ok(Box::new(fetcher))
        }
        None => Ok(Box::new(GmtGridFetcher::new(gmt))),
    }
}

/// Read stations from a metadata file, rejecting a missing file or an empty
/// inventory.
pub fn load_stations(path: &Path) -> Result<Vec<Station>> {
    if !path.is_file() {
        return Err(Error::Validation(format!(
            "station metadata file not found: {}",
            path.display()
        )));
    }
    let inventory = Inventory::from_file(path)?;
    if inventory.is_empty() {
        return Err(Error::Validation(format!(
            "no stations found in {}",
            path.display()
        )));
    }
    for station in inventory.stations() {
        debug!("{}", station);
    }
    Ok(inventory.stations().to_vec())
}

/// Draw a map with the real `gmt` executable.
pub fn run(args: &Args) -> Result<PathBuf> {
    let config = load_config(args.config.as_deref())?;
    let gmt = GmtProcess::new(&config.gmt);
    match gmt.version() {
        Ok(version) => debug!("GMT {}", version),
        Err(e) => warn!("could not query GMT version: {}", e),
    }
    let fetcher = grid_fetcher(&config, gmt.clone())?;
    run_with(args, &config, &gmt, fetcher)
}

/// Draw a map with the given GMT runner and grid source.
pub fn run_with<R, F>(args: &Args, config: &Config, runner: &R, fetcher: F) -> Result<PathBuf>
where
    R: GmtRunner + ?Sized,
    F: GridFetcher,
{
    let format = OutputFormat::from_path(&args.output)?;

    let stations = load_stations(&args.dataless)?;
    info!("{} stations loaded from {}", stations.len(), args.dataless.display());

    let region = resolve_region(&stations, args.region, config.padding)?;

    let cpt = args.cpt.as_deref().unwrap_or(&config.cpt);
    let palette = Palette::from_file(cpt)?;
    info!("using palette {}", cpt.display());
    if let Some((lo, hi)) = palette.z_range() {
        debug!("palette covers {} to {}", lo, hi);
    }

    let cache_dir = args.cache_dir.as_deref().unwrap_or(&config.cache_dir);
    let cache = GridCache::new(cache_dir, fetcher);
    let grid = fs::canonicalize(cache.ensure(&region, args.resolution)?)?;

    let inset = if args.wants_inset() {
        let inset_region = args
            .inset_region
            .unwrap_or_else(|| region.expanded(config.style.inset_padding));
        let inset_grid = cache.ensure(&inset_region, config.style.inset_resolution)?;
        Some(InsetRequest {
            grid: fs::canonicalize(inset_grid)?,
            region: inset_region,
            position: args.inset_position.clone(),
        })
    } else {
        None
    };

    let stats = cache.download_stats();
    if stats.grids_downloaded > 0 {
        info!(
            "downloaded {} grid(s), {} bytes",
            stats.grids_downloaded, stats.bytes_downloaded
        );
    }

    let request = MapRequest {
        labels: args.labels,
        title: args.title.clone(),
        colorbar: args.colorbar,
        inset,
        format,
        style: config.style.clone(),
        ..MapRequest::new(grid, region, palette, stations)
    };

    let composer = MapComposer::new();
    let plan = composer.plan(&request);
    debug!("{} GMT calls planned", plan.calls.len());
    Ok(composer.render(&plan, runner, &args.output)?)
}
