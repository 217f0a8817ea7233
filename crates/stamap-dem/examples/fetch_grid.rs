//! Example: Fetch a topography grid through the cache.
//!
//! Usage: cargo run --example fetch_grid -- <url_template> <region> [resolution] [cache_dir]

use stamap_dem::{GridCache, HttpGridFetcher, Region, Resolution};
use std::env;
use std::time::Instant;

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 3 {
        eprintln!("Usage: {} <url_template> <region> [resolution] [cache_dir]", args[0]);
        eprintln!(
            "Example: {} 'https://example.org/relief?bbox={{west}},{{south}},{{east}},{{north}}' 114.5/118.5/38.5/42.5 30s",
            args[0]
        );
        std::process::exit(1);
    }

    let region: Region = args[2].parse().expect("Invalid region");
    let resolution: Resolution = args
        .get(3)
        .map(|s| s.parse().expect("Invalid resolution"))
        .unwrap_or_default();
    let cache_dir = args.get(4).map(|s| s.as_str()).unwrap_or("cache");

    let fetcher = HttpGridFetcher::new(args[1].as_str()).expect("Failed to build HTTP client");
    let cache = GridCache::new(cache_dir, fetcher);

    println!("Key: {}", stamap_dem::cache_key(&region, resolution));
    println!("Cached: {}", cache.is_cached(&region, resolution));

    let start = Instant::now();
    match cache.ensure(&region, resolution) {
        Ok(path) => {
            println!("Grid: {} ({:.2}s)", path.display(), start.elapsed().as_secs_f64());
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }

    // Second call is served from disk
    let start = Instant::now();
    if let Ok(path) = cache.ensure(&region, resolution) {
        println!("Grid (cached): {} ({:.6}s)", path.display(), start.elapsed().as_secs_f64());
    }

    let stats = cache.download_stats();
    println!(
        "Downloaded {} grid(s), {} bytes",
        stats.grids_downloaded, stats.bytes_downloaded
    );
}
