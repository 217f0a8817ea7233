//! # stamap-dem
//!
//! Topography grids for station maps, cached on disk by region and
//! resolution.
//!
//! This crate provides:
//! - [`Region`]: a lon/lat bounding box in GMT `-R` notation
//! - [`Resolution`]: the `earth_relief` grid spacings (`01m` … `01s`)
//! - [`GridCache`]: maps (region, resolution) to a local grid file,
//!   fetching only on a miss
//! - [`GridFetcher`]: the download seam, with an HTTP implementation
//!
//! ## Cache Layout
//!
//! One file per key directly under the cache root, named by
//! [`cache_key`]. The key is a pure function of the region and resolution,
//! so cache behaviour can be tested without a network or filesystem.
//! Entries are never evicted.
//!
//! ## Example
//!
//! ```no_run
//! use stamap_dem::{GridCache, HttpGridFetcher, Region, Resolution};
//!
//! let fetcher = HttpGridFetcher::new(
//!     "https://example.org/relief?bbox={west},{south},{east},{north}&res={resolution}",
//! )?;
//! let cache = GridCache::new("cache", fetcher);
//!
//! let region: Region = "114.5/118.5/38.5/42.5".parse()?;
//! let grid = cache.ensure(&region, Resolution::ThreeSeconds)?;
//! println!("grid at {}", grid.display());
//! # Ok::<(), stamap_dem::DemError>(())
//! ```

mod cache;
mod error;
mod fetch;
mod region;
mod resolution;

pub use cache::{cache_key, DownloadStats, GridCache, DEFAULT_CACHE_DIR};
pub use error::DemError;
pub use fetch::{GridFetcher, HttpGridFetcher, DEFAULT_HTTP_TIMEOUT};
pub use region::Region;
pub use resolution::Resolution;

/// Result type for DEM operations.
pub type Result<T> = std::result::Result<T, DemError>;
