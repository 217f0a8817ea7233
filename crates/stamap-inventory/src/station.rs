//! Station records.

use crate::{InventoryError, Result};
use std::collections::HashSet;
use std::fmt;

/// A seismic station's identity and position.
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    /// FDSN network code, e.g. `BJ`.
    pub network: String,
    /// Station code, e.g. `BJT`.
    pub code: String,
    /// Latitude in decimal degrees (positive = north).
    pub latitude: f64,
    /// Longitude in decimal degrees (positive = east).
    pub longitude: f64,
    /// Elevation in meters, when the metadata provides one.
    pub elevation: Option<f64>,
}

impl Station {
    /// `NET.STA` label used on maps.
    pub fn label(&self) -> String {
        format!("{}.{}", self.network, self.code)
    }

    /// Elevation in meters, zero when unknown.
    pub fn elevation_or_zero(&self) -> f64 {
        self.elevation.unwrap_or(0.0)
    }
}

impl fmt::Display for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({:.4}, {:.4}, {:.0} m)",
            self.label(),
            self.latitude,
            self.longitude,
            self.elevation_or_zero()
        )
    }
}

/// Parse a coordinate field, trimming the fixed-width padding SEED uses.
pub(crate) fn parse_coordinate(station: &str, field: &'static str, text: &str) -> Result<f64> {
    let trimmed = text.trim();
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| InventoryError::InvalidCoordinate {
            station: station.to_string(),
            field,
            value: trimmed.to_string(),
        })
}

/// Collapse repeated (network, station) epochs, keeping the first.
pub(crate) fn dedup_epochs(stations: Vec<Station>) -> Vec<Station> {
    let mut seen = HashSet::new();
    stations
        .into_iter()
        .filter(|s| seen.insert((s.network.clone(), s.code.clone())))
        .collect()
}
