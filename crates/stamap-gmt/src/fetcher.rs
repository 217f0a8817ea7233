//! Grid downloads through GMT's remote `earth_relief` datasets.

use crate::{GmtCall, GmtRunner};
use stamap_dem::{cache_key, DemError, GridFetcher, Region, Resolution};
use std::fs;
use std::path::Path;

/// Fetches grids with `gmt grdcut @earth_relief_<res> -R... -G<file>`.
///
/// GMT downloads the remote tiles into its own data directory and cuts the
/// requested region out of them.
#[derive(Debug, Clone)]
pub struct GmtGridFetcher<R> {
    runner: R,
}

impl<R: GmtRunner> GmtGridFetcher<R> {
    /// Create a fetcher that issues `grdcut` through `runner`.
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    /// Build the `grdcut` call writing into `file_name`.
    pub fn grdcut_call(region: &Region, resolution: Resolution, file_name: &str) -> GmtCall {
        GmtCall::new("grdcut").args([
            resolution.remote_dataset(),
            format!("-R{}", region),
            format!("-G{}", file_name),
        ])
    }
}

impl<R: GmtRunner> GridFetcher for GmtGridFetcher<R> {
    fn fetch(&self, region: &Region, resolution: Resolution, dest: &Path) -> stamap_dem::Result<u64> {
        let failed = |reason: String| DemError::DownloadFailed {
            key: cache_key(region, resolution),
            reason,
        };

        let file_name = dest
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| failed(format!("unusable destination {}", dest.display())))?;
        let workdir = match dest.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };

        let call = Self::grdcut_call(region, resolution, file_name);
        self.runner
            .run(&call, workdir)
            .map_err(|e| failed(e.to_string()))?;

        Ok(fs::metadata(dest)?.len())
    }

    fn describe(&self) -> String {
        "gmt grdcut".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GmtError, Result};
    use std::cell::RefCell;
    use std::path::PathBuf;

    struct WritingRunner {
        seen: RefCell<Vec<(GmtCall, PathBuf)>>,
        fail: bool,
    }

    impl GmtRunner for WritingRunner {
        fn run(&self, call: &GmtCall, workdir: &Path) -> Result<()> {
            self.seen.borrow_mut().push((call.clone(), workdir.to_path_buf()));
            if self.fail {
                return Err(GmtError::CommandFailed {
                    module: call.module.clone(),
                    status: "exit status: 1".to_string(),
                    stderr: "grdcut: Unable to obtain remote file".to_string(),
                });
            }
            let target = call.option('G').unwrap_or_default();
            fs::write(workdir.join(target), b"CDF")?;
            Ok(())
        }
    }

    #[test]
    fn test_grdcut_call() {
        let region: Region = "114.5/118.5/38.5/42.5".parse().unwrap();
        let call = GmtGridFetcher::<WritingRunner>::grdcut_call(&region, Resolution::ThreeSeconds, "out.nc");
        assert_eq!(
            call.to_string(),
            "gmt grdcut @earth_relief_03s -R114.5/118.5/38.5/42.5 -Gout.nc"
        );
    }

    #[test]
    fn test_fetch_runs_in_destination_dir() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = GmtGridFetcher::new(WritingRunner {
            seen: RefCell::new(Vec::new()),
            fail: false,
        });
        let region: Region = "0/1/0/1".parse().unwrap();
        let dest = dir.path().join("grid.part.nc");

        let bytes = fetcher.fetch(&region, Resolution::OneMinute, &dest).unwrap();
        assert_eq!(bytes, 3);

        let seen = fetcher.runner.seen.borrow();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].1, dir.path());
        assert_eq!(seen[0].0.option('G'), Some("grid.part.nc"));
    }

    #[test]
    fn test_failure_becomes_download_error() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = GmtGridFetcher::new(WritingRunner {
            seen: RefCell::new(Vec::new()),
            fail: true,
        });
        let region: Region = "0/1/0/1".parse().unwrap();

        match fetcher.fetch(&region, Resolution::OneMinute, &dir.path().join("g.nc")) {
            Err(DemError::DownloadFailed { reason, .. }) => {
                assert!(reason.contains("remote file"), "{}", reason)
            }
            other => panic!("expected download failure, got {:?}", other),
        }
    }
}
