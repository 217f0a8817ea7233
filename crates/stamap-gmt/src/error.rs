//! Error types for GMT map composition.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while planning or rendering a map.
#[derive(Debug, Error)]
pub enum GmtError {
    /// I/O error in the session directory or when placing the output.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The `gmt` executable could not be started.
    #[error("Failed to start '{program}': {source}")]
    Spawn {
        /// Program that was launched.
        program: String,
        /// Underlying error.
        source: std::io::Error,
    },

    /// A GMT module exited unsuccessfully.
    #[error("gmt {module} failed ({status}): {stderr}")]
    CommandFailed {
        /// Module name, e.g. `grdimage`.
        module: String,
        /// Exit status description.
        status: String,
        /// Captured standard error.
        stderr: String,
    },

    /// GMT finished but the expected figure file is missing.
    #[error("GMT did not produce {}", .0.display())]
    MissingOutput(PathBuf),

    /// Output file extension is not a supported figure format.
    #[error("Unsupported output format '{0}' (expected png, pdf, jpg or jpeg)")]
    UnsupportedFormat(String),

    /// Inset position string is not `j{{TL|TR|BL|BR}}[+o<offset>]`.
    #[error("Invalid inset position '{0}' (expected e.g. jBR+o0.1c)")]
    InvalidInsetPosition(String),

    /// A plan without its `begin`/`end` framing was handed to the renderer.
    #[error("Map plan must start with 'begin' and end with 'end'")]
    InvalidPlan,
}
