//! Error taxonomy for the command-line tools.

use stamap_cpt::CptError;
use stamap_dem::DemError;
use stamap_gmt::GmtError;
use stamap_inventory::InventoryError;
use std::path::PathBuf;
use thiserror::Error;

/// Broad failure categories, each with its own exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad or missing input: arguments, files, empty station set.
    Validation,
    /// Malformed palette or station metadata.
    Parse,
    /// Grid could not be obtained.
    Download,
    /// GMT failed while drawing.
    Render,
    /// Config file or other I/O failure.
    Other,
}

impl ErrorKind {
    /// Process exit code for this kind.
    pub fn exit_code(self) -> u8 {
        match self {
            ErrorKind::Validation => 2,
            ErrorKind::Parse => 3,
            ErrorKind::Download => 4,
            ErrorKind::Render => 5,
            ErrorKind::Other => 1,
        }
    }
}

/// Errors surfaced by a run.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid user input.
    #[error("{0}")]
    Validation(String),

    /// Station metadata error.
    #[error("Inventory error: {0}")]
    Inventory(#[from] InventoryError),

    /// Palette error.
    #[error("Palette error: {0}")]
    Palette(#[from] CptError),

    /// Grid cache or download error.
    #[error("Grid error: {0}")]
    Grid(#[from] DemError),

    /// Map composition error.
    #[error("Render error: {0}")]
    Render(#[from] GmtError),

    /// Config file could not be parsed.
    #[error("Invalid config {}: {source}", path.display())]
    Config {
        /// Config file path.
        path: PathBuf,
        /// Underlying error.
        source: serde_yaml::Error,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Classify the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Validation(_) => ErrorKind::Validation,
            Error::Inventory(InventoryError::Io(_)) => ErrorKind::Other,
            Error::Inventory(_) => ErrorKind::Parse,
            Error::Palette(CptError::NotFound(_)) => ErrorKind::Validation,
            Error::Palette(CptError::Io(_) | CptError::Image(_)) => ErrorKind::Other,
            Error::Palette(_) => ErrorKind::Parse,
            Error::Grid(DemError::InvalidRegion { .. } | DemError::InvalidResolution(_)) => {
                ErrorKind::Validation
            }
            Error::Grid(DemError::Io(_)) => ErrorKind::Other,
            Error::Grid(_) => ErrorKind::Download,
            Error::Render(GmtError::UnsupportedFormat(_) | GmtError::InvalidInsetPosition(_)) => {
                ErrorKind::Validation
            }
            Error::Render(_) => ErrorKind::Render,
            Error::Config { .. } | Error::Io(_) => ErrorKind::Other,
        }
    }

    /// Process exit code.
    pub fn exit_code(&self) -> u8 {
        self.kind().exit_code()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(Error::Validation("no stations".into()).exit_code(), 2);
        assert_eq!(Error::from(CptError::Empty).exit_code(), 3);
        assert_eq!(Error::from(CptError::NotFound(PathBuf::from("x.cpt"))).exit_code(), 2);
        assert_eq!(
            Error::from(InventoryError::MalformedXml("no Station".into())).exit_code(),
            3
        );
        assert_eq!(
            Error::from(DemError::DownloadFailed {
                key: "k".into(),
                reason: "offline".into()
            })
            .exit_code(),
            4
        );
        assert_eq!(Error::from(DemError::InvalidResolution("02m".into())).exit_code(), 2);
        assert_eq!(Error::from(GmtError::InvalidPlan).exit_code(), 5);
        assert_eq!(Error::from(GmtError::UnsupportedFormat("a.gif".into())).exit_code(), 2);
        assert_eq!(
            Error::from(std::io::Error::new(std::io::ErrorKind::Other, "disk")).exit_code(),
            1
        );
    }
}
