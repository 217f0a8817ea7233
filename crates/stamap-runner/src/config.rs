//! YAML configuration file.
//!
//! Every field is optional; anything left out keeps its default.
//!
//! ```yaml
//! cpt: cpt/gray_relief.cpt
//! cache_dir: /var/cache/stamap
//! padding: 1.0
//! gmt: /opt/gmt/bin/gmt
//! download:
//!   url_template: "https://example.org/relief?bbox={west},{south},{east},{north}&res={resolution}"
//!   timeout_secs: 300
//! style:
//!   projection: M18c
//!   label_offset: 0.2c/0.2c
//! ```

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use stamap_dem::DEFAULT_CACHE_DIR;
use stamap_gmt::{MapStyle, DEFAULT_GMT_PROGRAM};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default palette used when neither the command line nor the config names one.
pub const DEFAULT_CPT: &str = "cpt/colombia.cpt";

/// Default padding around the stations, in degrees.
pub const DEFAULT_PADDING: f64 = 0.5;

/// Tool configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Palette file.
    pub cpt: PathBuf,
    /// Grid cache directory.
    pub cache_dir: PathBuf,
    /// Degrees added around the stations when no region is given.
    pub padding: f64,
    /// GMT executable.
    pub gmt: PathBuf,
    /// Fetch grids over HTTP instead of through GMT.
    pub download: Option<DownloadConfig>,
    /// Map look.
    pub style: MapStyle,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cpt: PathBuf::from(DEFAULT_CPT),
            cache_dir: PathBuf::from(DEFAULT_CACHE_DIR),
            padding: DEFAULT_PADDING,
            gmt: PathBuf::from(DEFAULT_GMT_PROGRAM),
            download: None,
            style: MapStyle::default(),
        }
    }
}

/// HTTP grid source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DownloadConfig {
    /// URL template with `{west}`, `{east}`, `{south}`, `{north}`,
    /// `{resolution}` and `{arcsec}` placeholders.
    pub url_template: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    stamap_dem::DEFAULT_HTTP_TIMEOUT.as_secs()
}

impl Config {
    /// Read a config file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Error::Validation(format!(
                "config file not found: {}",
                path.display()
            )));
        }
        let text = fs::read_to_string(path)?;
        let config = Self::from_yaml(&text).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Parse config YAML. An empty document yields the defaults.
    pub fn from_yaml(text: &str) -> std::result::Result<Self, serde_yaml::Error> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text)
    }

    /// Check values that serde cannot.
    pub fn validate(&self) -> Result<()> {
        if !self.padding.is_finite() || self.padding < 0.0 {
            return Err(Error::Validation(format!(
                "padding must be a non-negative number, got {}",
                self.padding
            )));
        }
        if !self.style.inset_padding.is_finite() || self.style.inset_padding < 0.0 {
            return Err(Error::Validation(format!(
                "inset_padding must be a non-negative number, got {}",
                self.style.inset_padding
            )));
        }
        if self.style.dpi == 0 {
            return Err(Error::Validation("dpi must be positive".to_string()));
        }
        Ok(())
    }
}
