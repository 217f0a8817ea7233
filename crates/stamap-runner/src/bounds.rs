//! Map region from station coordinates.

use crate::{Error, Result};
use stamap_dem::Region;
use stamap_inventory::Station;
use tracing::info;

/// Pick the map region.
///
/// A manual region is returned unchanged. Otherwise the stations' bounding
/// box grown by `padding` degrees on each side, with latitudes clamped to
/// the poles.
pub fn resolve_region(stations: &[Station], manual: Option<Region>, padding: f64) -> Result<Region> {
    if let Some(region) = manual {
        info!("using manual region {}", region);
        return Ok(region);
    }

    let auto = Region::around(stations.iter().map(|s| (s.longitude, s.latitude)), padding)
        .ok_or_else(|| {
            Error::Validation("no stations to compute a map region from; pass --region".to_string())
        })?;

    let region = Region::new(
        auto.lon_min,
        auto.lon_max,
        auto.lat_min.max(-90.0),
        auto.lat_max.min(90.0),
    )
    .map_err(|e| Error::Validation(format!("cannot derive a map region from the stations: {}", e)))?;

    info!("computed region {} from {} stations", region, stations.len());
    Ok(region)
}
