//! Palette previews: a gradient swatch per palette, plus an optional full
//! station map drawn with each palette.

use crate::{grid_fetcher, load_config, load_stations, resolve_region, Config, Error, PreviewArgs, Result};
use stamap_cpt::{preview::write_swatch, CptRepository, Palette};
use stamap_dem::{GridCache, GridFetcher, Region};
use stamap_gmt::{GmtProcess, GmtRunner, MapComposer, MapRequest, MapStyle, OutputFormat};
use stamap_inventory::Station;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Outcome of a preview run.
#[derive(Debug, Default)]
pub struct PreviewSummary {
    /// Palette files found.
    pub total: usize,
    /// Swatch images written.
    pub swatches: usize,
    /// Map previews written.
    pub maps: usize,
    /// Palettes that failed, with the reason.
    pub failures: Vec<(PathBuf, String)>,
}

impl PreviewSummary {
    /// Palettes previewed without error.
    pub fn succeeded(&self) -> usize {
        self.total - self.failures.len()
    }

    /// Whether every palette was previewed.
    pub fn all_succeeded(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Shared inputs for map previews.
struct MapContext {
    stations: Vec<Station>,
    region: Region,
    grid: PathBuf,
}

/// Preview every palette with the real `gmt` executable.
pub fn run_preview(args: &PreviewArgs) -> Result<PreviewSummary> {
    let config = load_config(args.config.as_deref())?;
    let gmt = GmtProcess::new(&config.gmt);
    let fetcher = grid_fetcher(&config, gmt.clone())?;
    run_preview_with(args, &config, &gmt, fetcher)
}

/// Preview every palette with the given GMT runner and grid source.
///
/// Palette failures are collected in the summary; only problems shared by
/// every palette (missing directory, unreadable stations, grid download)
/// abort the run.
pub fn run_preview_with<R, F>(
    args: &PreviewArgs,
    config: &Config,
    runner: &R,
    fetcher: F,
) -> Result<PreviewSummary>
where
    R: GmtRunner + ?Sized,
    F: GridFetcher,
{
    let repo = CptRepository::open(&args.cpt_dir)?;
    let palettes = repo.load_all()?;
    if palettes.is_empty() {
        return Err(Error::Validation(format!(
            "no .cpt files found in {}",
            repo.dir().display()
        )));
    }
    info!("found {} palettes in {}", palettes.len(), repo.dir().display());

    let out_dir = args.out_dir.as_deref().unwrap_or(repo.dir());
    fs::create_dir_all(out_dir)?;

    let map = match &args.dataless {
        Some(path) => {
            let stations = load_stations(path)?;
            let region = resolve_region(&stations, None, config.padding)?;
            let cache_dir = args.cache_dir.as_deref().unwrap_or(&config.cache_dir);
            let cache = GridCache::new(cache_dir, fetcher);
            let grid = fs::canonicalize(cache.ensure(&region, args.resolution)?)?;
            Some(MapContext {
                stations,
                region,
                grid,
            })
        }
        None => None,
    };

    let composer = MapComposer::new();
    let mut summary = PreviewSummary {
        total: palettes.len(),
        ..PreviewSummary::default()
    };

    for (path, parsed) in palettes {
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        let palette = match parsed {
            Ok(palette) => palette,
            Err(e) => {
                summary.failures.push((path, e.to_string()));
                continue;
            }
        };

        let swatch = out_dir.join(format!("{}.png", name));
        if let Err(e) = write_swatch(&palette, &swatch, args.width, args.height) {
            warn!("swatch for {} failed: {}", name, e);
            summary.failures.push((path, e.to_string()));
            continue;
        }
        summary.swatches += 1;
        info!("swatch written to {}", swatch.display());

        if let Some(ctx) = &map {
            let output = out_dir.join(format!("{}_map.png", name));
            match render_map(&composer, runner, ctx, &name, palette, &output) {
                Ok(_) => summary.maps += 1,
                Err(e) => {
                    warn!("map preview for {} failed: {}", name, e);
                    summary.failures.push((path, e.to_string()));
                }
            }
        }
    }

    Ok(summary)
}

fn render_map<R: GmtRunner + ?Sized>(
    composer: &MapComposer,
    runner: &R,
    ctx: &MapContext,
    name: &str,
    palette: Palette,
    output: &Path,
) -> Result<PathBuf> {
    let request = MapRequest {
        title: Some(format!("CPT Preview: {}", name)),
        colorbar: true,
        format: OutputFormat::Png,
        style: MapStyle::preview(),
        ..MapRequest::new(ctx.grid.clone(), ctx.region, palette, ctx.stations.clone())
    };
    let plan = composer.plan(&request);
    Ok(composer.render(&plan, runner, output)?)
}
