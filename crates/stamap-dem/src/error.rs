//! Error types for the DEM crate.

use thiserror::Error;

/// Errors that can occur when working with topography grids.
#[derive(Debug, Error)]
pub enum DemError {
    /// I/O error reading or writing the cache.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A region string or value is not usable.
    #[error("Invalid region '{input}': {reason}")]
    InvalidRegion {
        /// The rejected input.
        input: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Unknown grid resolution code.
    #[error("Invalid resolution '{0}' (expected one of 01m, 30s, 15s, 03s, 01s)")]
    InvalidResolution(String),

    /// HTTP request error when fetching a grid.
    #[error("HTTP request error: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// Failed to download a grid from its source.
    #[error("Failed to download grid {key}: {reason}")]
    DownloadFailed {
        /// Cache key of the grid being fetched.
        key: String,
        /// Reason for failure.
        reason: String,
    },
}
