//! Grid sources the cache downloads from on a miss.

use crate::{DemError, Region, Resolution, Result};
use std::fs;
use std::io::Write;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// Default HTTP timeout for grid downloads.
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(120);

/// Something that can produce an elevation grid file for a region.
///
/// Implementations write the grid to `dest` and return the number of bytes
/// written. They are called only on cache misses and never retried.
pub trait GridFetcher {
    /// Download the grid covering `region` at `resolution` into `dest`.
    fn fetch(&self, region: &Region, resolution: Resolution, dest: &Path) -> Result<u64>;

    /// Short description for log messages.
    fn describe(&self) -> String;
}

/// Fetches grids over HTTP from a URL template.
///
/// The template may contain the placeholders `{west}`, `{east}`, `{south}`,
/// `{north}`, `{resolution}` and `{arcsec}`, e.g.
///
/// ```text
/// https://example.org/relief?bbox={west},{south},{east},{north}&res={resolution}
/// ```
pub struct HttpGridFetcher {
    /// URL template.
    url_template: String,
    /// HTTP client for downloading grids.
    client: reqwest::blocking::Client,
}

impl std::fmt::Debug for HttpGridFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpGridFetcher")
            .field("url_template", &self.url_template)
            .finish()
    }
}

impl HttpGridFetcher {
    /// Create a fetcher with the default timeout.
    pub fn new(url_template: impl Into<String>) -> Result<Self> {
        Self::with_timeout(url_template, DEFAULT_HTTP_TIMEOUT)
    }

    /// Create a fetcher with a specified request timeout.
    pub fn with_timeout(url_template: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(Self {
            url_template: url_template.into(),
            client,
        })
    }

    /// Expand the template for a region and resolution.
    pub fn url_for(&self, region: &Region, resolution: Resolution) -> String {
        self.url_template
            .replace("{west}", &region.lon_min.to_string())
            .replace("{east}", &region.lon_max.to_string())
            .replace("{south}", &region.lat_min.to_string())
            .replace("{north}", &region.lat_max.to_string())
            .replace("{resolution}", resolution.code())
            .replace("{arcsec}", &resolution.arc_seconds().to_string())
    }
}

impl GridFetcher for HttpGridFetcher {
    fn fetch(&self, region: &Region, resolution: Resolution, dest: &Path) -> Result<u64> {
        let url = self.url_for(region, resolution);
        debug!(%url, "requesting grid");

        let response = self.client.get(&url).send()?;

        if !response.status().is_success() {
            return Err(DemError::DownloadFailed {
                key: crate::cache_key(region, resolution),
                reason: format!("HTTP {} from {}", response.status(), url),
            });
        }

        let bytes = response.bytes()?;

        let mut file = fs::File::create(dest)?;
        file.write_all(&bytes)?;

        Ok(bytes.len() as u64)
    }

    fn describe(&self) -> String {
        format!("HTTP {}", self.url_template)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_template_expansion() {
        let fetcher = HttpGridFetcher::new(
            "https://example.org/relief?bbox={west},{south},{east},{north}&res={resolution}&s={arcsec}",
        )
        .unwrap();
        let region: Region = "114.5/118.5/38.5/42.5".parse().unwrap();
        assert_eq!(
            fetcher.url_for(&region, Resolution::ThirtySeconds),
            "https://example.org/relief?bbox=114.5,38.5,118.5,42.5&res=30s&s=30"
        );
    }
}
