//! # stamap-cpt
//!
//! GMT colour palette tables (CPT).
//!
//! A CPT maps value ranges to colours. Each data line is one linear segment:
//!
//! ```text
//! # COLOR_MODEL = RGB
//! -200   70 130 180   0      170 210 230
//! 0      90 150  80   500    180 200 120
//! B 40 60 120
//! F 255 255 255
//! N 128 128 128
//! ```
//!
//! The trailing `B`/`F`/`N` lines give the background (below range),
//! foreground (above range) and NaN colours; they are optional.
//!
//! ## Example
//!
//! ```no_run
//! use stamap_cpt::{CptRepository, preview};
//!
//! let repo = CptRepository::open("cpt")?;
//! for path in repo.list()? {
//!     let palette = stamap_cpt::Palette::from_file(&path)?;
//!     preview::write_swatch(&palette, path.with_extension("png"), 512, 48)?;
//! }
//! # Ok::<(), stamap_cpt::CptError>(())
//! ```

mod color;
mod error;
mod palette;
pub mod preview;
mod repository;

pub use color::Rgb;
pub use error::CptError;
pub use palette::{Annotation, Palette, Segment};
pub use repository::{CptRepository, CPT_EXTENSION};

/// Result type for CPT operations.
pub type Result<T> = std::result::Result<T, CptError>;
