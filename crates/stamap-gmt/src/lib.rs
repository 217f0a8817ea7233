//! # stamap-gmt
//!
//! Station maps drawn by the Generic Mapping Tools (GMT) in modern mode.
//!
//! Drawing is split in two steps:
//! - [`MapComposer::plan`] turns a [`MapRequest`] into the session data
//!   files and the ordered `gmt` module calls, without running anything
//! - [`MapComposer::render`] runs a plan through a [`GmtRunner`] inside a
//!   scoped [`Figure`] session and moves the figure into place only after
//!   `gmt end` succeeds
//!
//! [`GmtProcess`] runs the real `gmt` executable; tests substitute their own
//! runner. [`GmtGridFetcher`] plugs GMT's remote `earth_relief` datasets
//! into the `stamap-dem` grid cache.
//!
//! ## Example
//!
//! ```no_run
//! use stamap_gmt::{GmtProcess, MapComposer, MapRequest};
//!
//! # fn demo(request: MapRequest) -> stamap_gmt::Result<()> {
//! let composer = MapComposer::new();
//! let plan = composer.plan(&request);
//! composer.render(&plan, &GmtProcess::default(), "station_map.png".as_ref())?;
//! # Ok(())
//! # }
//! ```

mod call;
mod composer;
mod error;
mod fetcher;
mod figure;
mod inset;
mod runner;
mod style;

pub use call::GmtCall;
pub use composer::{
    InsetRequest, MapComposer, MapPlan, MapRequest, OutputFormat, PlanFile, DEFAULT_FIGURE_NAME,
    INSET_OUTLINE_FILE, LABELS_FILE, PALETTE_FILE, STATIONS_FILE,
};
pub use error::GmtError;
pub use fetcher::GmtGridFetcher;
pub use figure::Figure;
pub use inset::{Corner, InsetPosition};
pub use runner::{GmtProcess, GmtRunner, DEFAULT_GMT_PROGRAM};
pub use style::MapStyle;

/// Result type for GMT operations.
pub type Result<T> = std::result::Result<T, GmtError>;
