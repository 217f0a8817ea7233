//! On-disk grid cache keyed by region and resolution.
//!
//! Each (region, resolution) pair maps to one file directly under the cache
//! root:
//!
//! ```text
//! cache/relief_03s_114.5_118.5_38.5_42.5_1f3a9c0e.nc
//! ```
//!
//! Entries are created on the first miss and reused on every later run with
//! the same key. Nothing is ever evicted or expired.

use crate::fetch::GridFetcher;
use crate::{DemError, Region, Resolution, Result};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use tracing::{debug, info, warn};

/// Default cache directory, relative to the working directory.
pub const DEFAULT_CACHE_DIR: &str = "cache";

/// Derive the cache file name for a region and resolution.
///
/// The readable prefix rounds bounds to one decimal; the trailing digest
/// covers the exact values so regions that round alike still get distinct
/// entries.
pub fn cache_key(region: &Region, resolution: Resolution) -> String {
    let bounds = [region.lon_min, region.lon_max, region.lat_min, region.lat_max];

    let mut hasher = Sha256::new();
    hasher.update(resolution.code().as_bytes());
    for value in bounds {
        // Fold -0.0 into 0.0 so both spellings share an entry.
        hasher.update((value + 0.0).to_bits().to_be_bytes());
    }
    let digest = hex::encode(hasher.finalize());

    format!(
        "relief_{}_{:.1}_{:.1}_{:.1}_{:.1}_{}.nc",
        resolution.code(),
        region.lon_min,
        region.lon_max,
        region.lat_min,
        region.lat_max,
        &digest[..8]
    )
}

/// Download statistics for the cache.
#[derive(Debug, Clone, Copy, Default)]
pub struct DownloadStats {
    /// Number of grids downloaded this session.
    pub grids_downloaded: usize,
    /// Total bytes downloaded this session.
    pub bytes_downloaded: u64,
}

/// Grid cache backed by a directory and a fetcher for misses.
pub struct GridCache<F> {
    /// Cache directory for downloaded grids.
    root: PathBuf,
    /// Source used on a cache miss.
    fetcher: F,
    /// Number of grids downloaded this session.
    grids_downloaded: AtomicUsize,
    /// Total bytes downloaded this session.
    bytes_downloaded: AtomicU64,
}

impl<F: GridFetcher> std::fmt::Debug for GridCache<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GridCache")
            .field("root", &self.root)
            .field("fetcher", &self.fetcher.describe())
            .finish()
    }
}

impl<F: GridFetcher> GridCache<F> {
    /// Create a cache rooted at `root`. The directory is created on the
    /// first download.
    pub fn new<P: AsRef<Path>>(root: P, fetcher: F) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            fetcher,
            grids_downloaded: AtomicUsize::new(0),
            bytes_downloaded: AtomicU64::new(0),
        }
    }

    /// Get the fetcher used on misses.
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Get download statistics for this session.
    pub fn download_stats(&self) -> DownloadStats {
        DownloadStats {
            grids_downloaded: self.grids_downloaded.load(Ordering::Relaxed),
            bytes_downloaded: self.bytes_downloaded.load(Ordering::Relaxed),
        }
    }

    /// Get the cache path for a region and resolution.
    pub fn path_for(&self, region: &Region, resolution: Resolution) -> PathBuf {
        self.root.join(cache_key(region, resolution))
    }

    /// Check if a grid is cached locally.
    pub fn is_cached(&self, region: &Region, resolution: Resolution) -> bool {
        self.path_for(region, resolution).is_file()
    }

    /// Return the local grid for a region, downloading it on a miss.
    ///
    /// The fetcher writes into a temporary `.part` file that is renamed into
    /// place only after it succeeds, so a failed or interrupted download
    /// never leaves a file under the final key.
    pub fn ensure(&self, region: &Region, resolution: Resolution) -> Result<PathBuf> {
        let key = cache_key(region, resolution);
        let cache_path = self.root.join(&key);

        if cache_path.is_file() {
            info!("using cached grid {}", key);
            return Ok(cache_path);
        }

        fs::create_dir_all(&self.root)?;
        let partial = cache_path.with_extension("part.nc");
        if partial.exists() {
            debug!(path = %partial.display(), "removing stale partial download");
            fs::remove_file(&partial)?;
        }

        info!(
            "downloading {} grid for {} via {}",
            resolution,
            region,
            self.fetcher.describe()
        );
        let bytes = match self.fetcher.fetch(region, resolution, &partial) {
            Ok(bytes) => bytes,
            Err(e) => {
                remove_partial(&partial);
                return Err(match e {
                    DemError::DownloadFailed { .. } => e,
                    other => DemError::DownloadFailed {
                        key,
                        reason: other.to_string(),
                    },
                });
            }
        };

        if !partial.is_file() {
            return Err(DemError::DownloadFailed {
                key,
                reason: "source reported success but produced no file".to_string(),
            });
        }
        fs::rename(&partial, &cache_path)?;

        self.grids_downloaded.fetch_add(1, Ordering::Relaxed);
        self.bytes_downloaded.fetch_add(bytes, Ordering::Relaxed);
        info!("cached grid {} ({} bytes)", key, bytes);

        Ok(cache_path)
    }
}

fn remove_partial(partial: &Path) {
    if partial.exists() {
        if let Err(e) = fs::remove_file(partial) {
            warn!("could not remove partial download {}: {}", partial.display(), e);
        }
    }
}

impl<F: GridFetcher + ?Sized> GridFetcher for Box<F> {
    fn fetch(&self, region: &Region, resolution: Resolution, dest: &Path) -> Result<u64> {
        (**self).fetch(region, resolution, dest)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    /// Fetcher that writes a fixed payload and counts calls.
    struct CountingFetcher {
        calls: Cell<usize>,
        fail: bool,
    }

    impl CountingFetcher {
        fn new() -> Self {
            Self {
                calls: Cell::new(0),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                calls: Cell::new(0),
                fail: true,
            }
        }
    }

    impl GridFetcher for CountingFetcher {
        fn fetch(&self, _region: &Region, _resolution: Resolution, dest: &Path) -> Result<u64> {
            self.calls.set(self.calls.get() + 1);
            fs::write(dest, b"grid")?;
            if self.fail {
                return Err(DemError::Io(std::io::Error::new(
                    std::io::ErrorKind::ConnectionReset,
                    "connection reset",
                )));
            }
            Ok(4)
        }

        fn describe(&self) -> String {
            "counting".to_string()
        }
    }

    fn region() -> Region {
        "114.5/118.5/38.5/42.5".parse().unwrap()
    }

    #[test]
    fn test_cache_key_format() {
        let key = cache_key(&region(), Resolution::ThreeSeconds);
        assert!(key.starts_with("relief_03s_114.5_118.5_38.5_42.5_"), "{}", key);
        assert!(key.ends_with(".nc"));
        assert_eq!(key, cache_key(&region(), Resolution::ThreeSeconds));
    }

    #[test]
    fn test_cache_key_distinguishes_close_regions() {
        let a: Region = "114.51/118.5/38.5/42.5".parse().unwrap();
        let b: Region = "114.54/118.5/38.5/42.5".parse().unwrap();
        let ka = cache_key(&a, Resolution::ThreeSeconds);
        let kb = cache_key(&b, Resolution::ThreeSeconds);
        assert_ne!(ka, kb);
        assert_eq!(ka[..ka.len() - 12], kb[..kb.len() - 12]);
    }

    #[test]
    fn test_cache_key_depends_on_resolution() {
        assert_ne!(
            cache_key(&region(), Resolution::ThreeSeconds),
            cache_key(&region(), Resolution::OneMinute)
        );
    }

    #[test]
    fn test_miss_then_hit() {
        let dir = tempfile::tempdir().unwrap();
        let cache = GridCache::new(dir.path().join("cache"), CountingFetcher::new());

        let first = cache.ensure(&region(), Resolution::ThreeSeconds).unwrap();
        assert!(first.is_file());
        assert_eq!(cache.fetcher().calls.get(), 1);

        let second = cache.ensure(&region(), Resolution::ThreeSeconds).unwrap();
        assert_eq!(first, second);
        assert_eq!(cache.fetcher().calls.get(), 1);

        let stats = cache.download_stats();
        assert_eq!(stats.grids_downloaded, 1);
        assert_eq!(stats.bytes_downloaded, 4);
    }

    #[test]
    fn test_prepopulated_entry_skips_fetch() {
        let dir = tempfile::tempdir().unwrap();
        let cache = GridCache::new(dir.path(), CountingFetcher::new());
        let path = cache.path_for(&region(), Resolution::FifteenSeconds);
        fs::write(&path, b"existing").unwrap();

        assert!(cache.is_cached(&region(), Resolution::FifteenSeconds));
        assert_eq!(cache.ensure(&region(), Resolution::FifteenSeconds).unwrap(), path);
        assert_eq!(cache.fetcher().calls.get(), 0);
    }

    #[test]
    fn test_failed_fetch_leaves_no_entry() {
        let dir = tempfile::tempdir().unwrap();
        let cache = GridCache::new(dir.path(), CountingFetcher::failing());

        let err = cache.ensure(&region(), Resolution::ThreeSeconds).unwrap_err();
        match err {
            DemError::DownloadFailed { key, reason } => {
                assert_eq!(key, cache_key(&region(), Resolution::ThreeSeconds));
                assert!(reason.contains("connection reset"), "{}", reason);
            }
            other => panic!("unexpected error: {}", other),
        }
        assert!(!cache.is_cached(&region(), Resolution::ThreeSeconds));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
        assert_eq!(cache.download_stats().grids_downloaded, 0);
    }
}
