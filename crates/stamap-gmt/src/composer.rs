//! Map composition: request → plan of GMT calls → rendered figure.

use crate::figure::Figure;
use crate::{GmtCall, GmtError, GmtRunner, InsetPosition, MapStyle, Result};
use stamap_cpt::Palette;
use stamap_dem::Region;
use stamap_inventory::Station;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use tracing::info;

/// Session file holding the palette.
pub const PALETTE_FILE: &str = "palette.cpt";
/// Session file holding station coordinates.
pub const STATIONS_FILE: &str = "stations.txt";
/// Session file holding station labels.
pub const LABELS_FILE: &str = "labels.txt";
/// Session file holding the main region outline for the inset.
pub const INSET_OUTLINE_FILE: &str = "inset_outline.txt";

/// Default figure name inside the session directory.
pub const DEFAULT_FIGURE_NAME: &str = "stamap";

/// Figure file format, chosen by output extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    /// Portable Network Graphics.
    Png,
    /// Portable Document Format.
    Pdf,
    /// JPEG.
    Jpg,
}

impl OutputFormat {
    /// Pick the format from a path's extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        match ext.as_str() {
            "png" => Ok(OutputFormat::Png),
            "pdf" => Ok(OutputFormat::Pdf),
            "jpg" | "jpeg" => Ok(OutputFormat::Jpg),
            _ => Err(GmtError::UnsupportedFormat(path.display().to_string())),
        }
    }

    /// GMT format code, also the produced file's extension.
    pub fn code(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Pdf => "pdf",
            OutputFormat::Jpg => "jpg",
        }
    }

    /// Whether the format is a raster that takes a DPI.
    pub fn is_raster(self) -> bool {
        !matches!(self, OutputFormat::Pdf)
    }
}

/// Inset showing the main region inside a wider area.
#[derive(Debug, Clone)]
pub struct InsetRequest {
    /// Grid covering `region`.
    pub grid: PathBuf,
    /// Area shown by the inset.
    pub region: Region,
    /// Anchor corner and offset.
    pub position: InsetPosition,
}

/// Everything needed to draw one station map.
///
/// Grid paths are handed to GMT as given, and GMT runs in a temporary
/// session directory, so they should be absolute.
#[derive(Debug, Clone)]
pub struct MapRequest {
    /// Elevation grid for the main map.
    pub grid: PathBuf,
    /// Main map region.
    pub region: Region,
    /// Palette applied to the grid (and inset grid).
    pub palette: Palette,
    /// Stations to mark.
    pub stations: Vec<Station>,
    /// Label each station with `NET.STA`.
    pub labels: bool,
    /// Optional map title.
    pub title: Option<String>,
    /// Draw an elevation colourbar.
    pub colorbar: bool,
    /// Optional inset.
    pub inset: Option<InsetRequest>,
    /// Figure format.
    pub format: OutputFormat,
    /// Visual constants.
    pub style: MapStyle,
}

impl MapRequest {
    /// Request with no labels, title, colourbar or inset, as PNG.
    pub fn new(grid: impl Into<PathBuf>, region: Region, palette: Palette, stations: Vec<Station>) -> Self {
        Self {
            grid: grid.into(),
            region,
            palette,
            stations,
            labels: false,
            title: None,
            colorbar: false,
            inset: None,
            format: OutputFormat::Png,
            style: MapStyle::default(),
        }
    }
}

/// A data file written into the session directory before plotting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanFile {
    /// File name relative to the session directory.
    pub name: String,
    /// File contents.
    pub contents: String,
}

/// The files and ordered GMT calls that draw one map.
#[derive(Debug, Clone)]
pub struct MapPlan {
    /// Figure name given to `gmt begin`.
    pub figure_name: String,
    /// Figure format.
    pub format: OutputFormat,
    /// Session data files.
    pub files: Vec<PlanFile>,
    /// Calls from `begin` to `end`.
    pub calls: Vec<GmtCall>,
}

impl MapPlan {
    /// Name of the figure file GMT writes on `end`.
    pub fn figure_file(&self) -> String {
        format!("{}.{}", self.figure_name, self.format.code())
    }

    /// Module names in call order, with `inset begin`/`inset end` spelled out.
    pub fn modules(&self) -> Vec<String> {
        self.calls
            .iter()
            .map(|c| match (c.module.as_str(), c.args.first()) {
                ("inset", Some(sub)) => format!("inset {}", sub),
                (m, _) => m.to_string(),
            })
            .collect()
    }
}

/// Turns map requests into GMT calls and runs them.
#[derive(Debug, Clone)]
pub struct MapComposer {
    figure_name: String,
}

impl Default for MapComposer {
    fn default() -> Self {
        Self {
            figure_name: DEFAULT_FIGURE_NAME.to_string(),
        }
    }
}

impl MapComposer {
    /// Composer with the default figure name.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the plan for a request. Touches neither GMT nor the filesystem.
    pub fn plan(&self, request: &MapRequest) -> MapPlan {
        let style = &request.style;
        let mut files = vec![
            PlanFile {
                name: PALETTE_FILE.to_string(),
                contents: request.palette.to_cpt_string(),
            },
            PlanFile {
                name: STATIONS_FILE.to_string(),
                contents: station_points(&request.stations),
            },
        ];
        let mut calls = Vec::new();

        let mut begin = GmtCall::new("begin").args([self.figure_name.as_str(), request.format.code()]);
        if request.format.is_raster() {
            begin = begin.arg(format!("E{}", style.dpi));
        }
        calls.push(begin);

        calls.push(GmtCall::new("set").args([
            "MAP_FRAME_TYPE",
            style.frame_type.as_str(),
            "MAP_FRAME_PEN",
            style.frame_pen.as_str(),
            "FONT_ANNOT_PRIMARY",
            style.font_annot.as_str(),
            "FONT_LABEL",
            style.font_label.as_str(),
            "FONT_TITLE",
            style.font_title.as_str(),
        ]));

        calls.push(GmtCall::new("grdimage").args([
            request.grid.display().to_string(),
            format!("-J{}", style.projection),
            format!("-R{}", request.region),
            format!("-C{}", PALETTE_FILE),
            format!("-I{}", style.shading),
        ]));

        if style.coast {
            calls.push(coast_call(style, &style.shorelines));
        }

        calls.push(GmtCall::new("plot").args([
            STATIONS_FILE.to_string(),
            format!("-S{}", style.marker),
            format!("-G{}", style.marker_fill),
            format!("-W{}", style.marker_pen),
        ]));

        if request.labels {
            files.push(PlanFile {
                name: LABELS_FILE.to_string(),
                contents: station_labels(&request.stations),
            });
            calls.push(GmtCall::new("text").args([
                LABELS_FILE.to_string(),
                format!("-F+f{}+j{}", style.label_font, style.label_justify),
                format!("-D{}", style.label_offset),
            ]));
        }

        let mut frame = format!("-B{}", style.frame_axes);
        if let Some(title) = request.title.as_deref().filter(|t| !t.is_empty()) {
            let _ = write!(frame, "+t{}", title);
        }
        calls.push(GmtCall::new("basemap").args([
            frame,
            format!("-Bx{}", style.frame_interval),
            format!("-By{}", style.frame_interval),
        ]));

        if request.colorbar {
            calls.push(GmtCall::new("colorbar").args([
                format!("-C{}", PALETTE_FILE),
                format!("-D{}", style.colorbar_position),
                format!("-Bx+l{}", style.colorbar_label),
                format!("-By+l{}", style.colorbar_unit),
            ]));
        }

        if let Some(inset) = &request.inset {
            files.push(PlanFile {
                name: INSET_OUTLINE_FILE.to_string(),
                contents: points_text(request.region.outline()),
            });

            let mut begin_inset = GmtCall::new("inset").args([
                "begin".to_string(),
                format!("-D{}+w{}", inset.position, style.inset_width),
            ]);
            if !style.inset_box.is_empty() {
                begin_inset = begin_inset.arg(format!("-F{}", style.inset_box));
            }
            calls.push(begin_inset);

            calls.push(GmtCall::new("grdimage").args([
                inset.grid.display().to_string(),
                "-JM?".to_string(),
                format!("-R{}", inset.region),
                format!("-C{}", PALETTE_FILE),
                format!("-I{}", style.shading),
            ]));
            if style.coast {
                calls.push(coast_call(style, &style.inset_shorelines));
            }
            calls.push(GmtCall::new("plot").args([
                INSET_OUTLINE_FILE.to_string(),
                format!("-W{}", style.inset_outline_pen),
            ]));
            calls.push(GmtCall::new("inset").arg("end"));
        }

        calls.push(GmtCall::new("end"));

        MapPlan {
            figure_name: self.figure_name.clone(),
            format: request.format,
            files,
            calls,
        }
    }

    /// Run a plan and place the figure at `output`.
    ///
    /// Nothing is written to `output` unless every call, including `end`,
    /// succeeds.
    pub fn render<R: GmtRunner + ?Sized>(&self, plan: &MapPlan, runner: &R, output: &Path) -> Result<PathBuf> {
        let (begin, rest) = plan
            .calls
            .split_first()
            .filter(|(begin, _)| begin.is_begin())
            .ok_or(GmtError::InvalidPlan)?;
        let (end, body) = rest
            .split_last()
            .filter(|(end, _)| end.is_end())
            .ok_or(GmtError::InvalidPlan)?;

        let figure = Figure::begin(runner, begin)?;
        for file in &plan.files {
            figure.write_file(&file.name, &file.contents)?;
        }
        for call in body {
            figure.run(call)?;
        }
        let path = figure.finish(end, &plan.figure_file(), output)?;

        info!("map written to {}", path.display());
        Ok(path)
    }
}

fn coast_call(style: &MapStyle, shorelines: &str) -> GmtCall {
    GmtCall::new("coast").args([
        format!("-W{}", shorelines),
        format!("-S{}", style.water),
        format!("-C{}", style.lakes),
    ])
}

fn points_text<I: IntoIterator<Item = (f64, f64)>>(points: I) -> String {
    let mut out = String::new();
    for (lon, lat) in points {
        let _ = writeln!(out, "{} {}", lon, lat);
    }
    out
}

fn station_points(stations: &[Station]) -> String {
    points_text(stations.iter().map(|s| (s.longitude, s.latitude)))
}

fn station_labels(stations: &[Station]) -> String {
    let mut out = String::new();
    for s in stations {
        let _ = writeln!(out, "{} {} {}", s.longitude, s.latitude, s.label());
    }
    out
}
