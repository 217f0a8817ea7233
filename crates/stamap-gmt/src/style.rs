//! Visual constants for map composition.
//!
//! Everything that shapes the look of a map lives here rather than in the
//! composer, so a YAML config can override any of it:
//!
//! ```yaml
//! style:
//!   projection: M18c
//!   marker: i0.5c
//!   label_offset: 0.2c/0.2c
//! ```

use serde::{Deserialize, Serialize};
use stamap_dem::Resolution;

/// Pens, fills, fonts and placements used by the map composer.
///
/// Values use GMT's own syntax and are passed through unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MapStyle {
    /// Main map projection and width (`-J`).
    pub projection: String,
    /// Relief shading (`grdimage -I`).
    pub shading: String,
    /// Raster output resolution in dots per inch.
    pub dpi: u32,

    /// `MAP_FRAME_TYPE`.
    pub frame_type: String,
    /// `MAP_FRAME_PEN`.
    pub frame_pen: String,
    /// `FONT_ANNOT_PRIMARY`.
    pub font_annot: String,
    /// `FONT_LABEL`.
    pub font_label: String,
    /// `FONT_TITLE`.
    pub font_title: String,

    /// Draw shorelines, water and lakes.
    pub coast: bool,
    /// Shoreline pen (`coast -W`).
    pub shorelines: String,
    /// Ocean fill (`coast -S`).
    pub water: String,
    /// Lake fill (`coast -C`).
    pub lakes: String,

    /// Station marker symbol and size (`plot -S`).
    pub marker: String,
    /// Station marker fill.
    pub marker_fill: String,
    /// Station marker outline pen.
    pub marker_pen: String,

    /// Station label font.
    pub label_font: String,
    /// Station label justification.
    pub label_justify: String,
    /// Fixed label offset from the marker (`text -D`).
    pub label_offset: String,

    /// Frame sides (`-B`).
    pub frame_axes: String,
    /// Annotation and tick intervals applied to both axes.
    pub frame_interval: String,

    /// Colourbar placement (`colorbar -D`).
    pub colorbar_position: String,
    /// Colourbar axis label.
    pub colorbar_label: String,
    /// Colourbar unit label.
    pub colorbar_unit: String,

    /// Inset width.
    pub inset_width: String,
    /// Inset frame box (`inset begin -F`).
    pub inset_box: String,
    /// Pen for the main region outline inside the inset.
    pub inset_outline_pen: String,
    /// Inset shoreline pen.
    pub inset_shorelines: String,
    /// Degrees added around the main region when no inset region is given.
    pub inset_padding: f64,
    /// Grid resolution for the inset.
    pub inset_resolution: Resolution,
}

impl Default for MapStyle {
    fn default() -> Self {
        Self {
            projection: "M22c".to_string(),
            shading: "+a315+ne0.2+nt0.8".to_string(),
            dpi: 300,

            frame_type: "plain".to_string(),
            frame_pen: "0p".to_string(),
            font_annot: "12p,Helvetica,black".to_string(),
            font_label: "14p,Helvetica,black".to_string(),
            font_title: "18p,Helvetica-Bold,black".to_string(),

            coast: true,
            shorelines: "1/0.05p,180/180/185".to_string(),
            water: "230/240/245".to_string(),
            lakes: "230/240/245".to_string(),

            marker: "t0.7c".to_string(),
            marker_fill: "180/40/40".to_string(),
            marker_pen: "1.5p,120/20/20".to_string(),

            label_font: "10p,Helvetica-Bold,black".to_string(),
            label_justify: "LM".to_string(),
            label_offset: "0.3c/0.1c".to_string(),

            frame_axes: "WSen".to_string(),
            frame_interval: "a1f1".to_string(),

            colorbar_position: "JMR+w12c/0.6c+o2.5c/0c".to_string(),
            colorbar_label: "Elevation (m)".to_string(),
            colorbar_unit: "m".to_string(),

            inset_width: "5c".to_string(),
            inset_box: "+gwhite+p0.5p,120/120/120".to_string(),
            inset_outline_pen: "1.2p,180/40/40".to_string(),
            inset_shorelines: "1/0.1p,120/120/125".to_string(),
            inset_padding: 5.0,
            inset_resolution: Resolution::OneMinute,
        }
    }
}

impl MapStyle {
    /// Smaller layout used for palette preview maps.
    pub fn preview() -> Self {
        Self {
            projection: "M15c".to_string(),
            marker: "t0.5c".to_string(),
            marker_pen: "1.0p,120/20/20".to_string(),
            colorbar_position: "JMR+w10c/0.5c+o1.5c/0c".to_string(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let style: MapStyle = serde_yaml::from_str("projection: M18c\ndpi: 150\n").unwrap();
        assert_eq!(style.projection, "M18c");
        assert_eq!(style.dpi, 150);
        assert_eq!(style.marker, MapStyle::default().marker);
        assert_eq!(style.inset_resolution, Resolution::OneMinute);
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(serde_yaml::from_str::<MapStyle>("projektion: M18c\n").is_err());
    }

    #[test]
    fn test_preview_variant() {
        let preview = MapStyle::preview();
        assert_eq!(preview.projection, "M15c");
        assert_eq!(preview.shading, MapStyle::default().shading);
    }
}
