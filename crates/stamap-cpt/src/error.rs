//! Error types for the CPT crate.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when reading or parsing colour palettes.
#[derive(Debug, Error)]
pub enum CptError {
    /// I/O error reading a palette or writing a preview.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A line of the palette could not be parsed.
    #[error("line {line}: {message}: '{text}'")]
    Parse {
        /// 1-based line number.
        line: usize,
        /// The offending line, trimmed.
        text: String,
        /// What was wrong with it.
        message: String,
    },

    /// Parse error annotated with the file it came from.
    #[error("{}: {source}", path.display())]
    InFile {
        /// Palette file.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: Box<CptError>,
    },

    /// The palette uses a colour model other than RGB.
    #[error("unsupported colour model '{0}' (only RGB is supported)")]
    UnsupportedColorModel(String),

    /// The palette has no colour segments.
    #[error("palette has no colour segments")]
    Empty,

    /// A palette was requested that does not exist.
    #[error("palette not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Image encoding failed while writing a preview.
    #[error("preview image error: {0}")]
    Image(#[from] image::ImageError),
}

impl CptError {
    pub(crate) fn parse(line: usize, text: &str, message: impl Into<String>) -> Self {
        CptError::Parse {
            line,
            text: text.trim().to_string(),
            message: message.into(),
        }
    }

    /// Line number of a parse failure, if this error points at one.
    pub fn line(&self) -> Option<usize> {
        match self {
            CptError::Parse { line, .. } => Some(*line),
            CptError::InFile { source, .. } => source.line(),
            _ => None,
        }
    }
}
