//! Geographic bounding regions.

use crate::{DemError, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A longitude/latitude bounding box in decimal degrees.
///
/// The textual form is GMT's `-R` syntax: `lon_min/lon_max/lat_min/lat_max`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    /// Western edge.
    pub lon_min: f64,
    /// Eastern edge.
    pub lon_max: f64,
    /// Southern edge.
    pub lat_min: f64,
    /// Northern edge.
    pub lat_max: f64,
}

impl Region {
    /// Create a region, checking that the bounds are ordered and finite.
    pub fn new(lon_min: f64, lon_max: f64, lat_min: f64, lat_max: f64) -> Result<Self> {
        let region = Self {
            lon_min,
            lon_max,
            lat_min,
            lat_max,
        };
        region.validate()?;
        Ok(region)
    }

    fn validate(&self) -> Result<()> {
        let invalid = |reason: &str| DemError::InvalidRegion {
            input: self.to_string(),
            reason: reason.to_string(),
        };
        let bounds = [self.lon_min, self.lon_max, self.lat_min, self.lat_max];
        if bounds.iter().any(|v| !v.is_finite()) {
            return Err(invalid("bounds must be finite numbers"));
        }
        if self.lon_min >= self.lon_max {
            return Err(invalid("lon_min must be less than lon_max"));
        }
        if self.lat_min >= self.lat_max {
            return Err(invalid("lat_min must be less than lat_max"));
        }
        if self.lat_min < -90.0 || self.lat_max > 90.0 {
            return Err(invalid("latitudes must lie within -90..90"));
        }
        Ok(())
    }

    /// Smallest region containing every `(longitude, latitude)` point,
    /// grown by `padding` degrees on each side.
    ///
    /// Returns `None` for an empty point set.
    pub fn around<I>(points: I, padding: f64) -> Option<Self>
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let mut points = points.into_iter();
        let (lon, lat) = points.next()?;
        let mut region = Self {
            lon_min: lon,
            lon_max: lon,
            lat_min: lat,
            lat_max: lat,
        };
        for (lon, lat) in points {
            region.lon_min = region.lon_min.min(lon);
            region.lon_max = region.lon_max.max(lon);
            region.lat_min = region.lat_min.min(lat);
            region.lat_max = region.lat_max.max(lat);
        }
        Some(region.padded(padding))
    }

    /// Grow each side by `padding` degrees without clamping.
    pub fn padded(&self, padding: f64) -> Self {
        Self {
            lon_min: self.lon_min - padding,
            lon_max: self.lon_max + padding,
            lat_min: self.lat_min - padding,
            lat_max: self.lat_max + padding,
        }
    }

    /// Grow each side by `padding` degrees, clamped to the globe.
    pub fn expanded(&self, padding: f64) -> Self {
        Self {
            lon_min: (self.lon_min - padding).max(-180.0),
            lon_max: (self.lon_max + padding).min(180.0),
            lat_min: (self.lat_min - padding).max(-90.0),
            lat_max: (self.lat_max + padding).min(90.0),
        }
    }

    /// Check whether a point lies inside the region (inclusive).
    pub fn contains(&self, lon: f64, lat: f64) -> bool {
        lon >= self.lon_min && lon <= self.lon_max && lat >= self.lat_min && lat <= self.lat_max
    }

    /// Closed outline polygon, counter-clockwise from the south-west corner.
    pub fn outline(&self) -> [(f64, f64); 5] {
        [
            (self.lon_min, self.lat_min),
            (self.lon_max, self.lat_min),
            (self.lon_max, self.lat_max),
            (self.lon_min, self.lat_max),
            (self.lon_min, self.lat_min),
        ]
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}/{}",
            self.lon_min, self.lon_max, self.lat_min, self.lat_max
        )
    }
}

impl FromStr for Region {
    type Err = DemError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = |reason: String| DemError::InvalidRegion {
            input: s.to_string(),
            reason,
        };
        let parts: Vec<&str> = s.trim().split('/').collect();
        if parts.len() != 4 {
            return Err(invalid(
                "expected lon_min/lon_max/lat_min/lat_max".to_string(),
            ));
        }
        let mut values = [0.0; 4];
        for (value, part) in values.iter_mut().zip(&parts) {
            *value = part
                .trim()
                .parse()
                .map_err(|_| invalid(format!("'{}' is not a number", part)))?;
        }
        Region::new(values[0], values[1], values[2], values[3])
    }
}

impl Serialize for Region {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Region {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_around_with_default_padding() {
        let points = [(115.0, 39.0), (118.0, 42.0), (116.5, 40.2)];
        let region = Region::around(points, 0.5).unwrap();
        assert_relative_eq!(region.lon_min, 114.5);
        assert_relative_eq!(region.lon_max, 118.5);
        assert_relative_eq!(region.lat_min, 38.5);
        assert_relative_eq!(region.lat_max, 42.5);
    }

    #[test]
    fn test_around_empty() {
        assert!(Region::around(std::iter::empty(), 0.5).is_none());
    }

    #[test]
    fn test_parse_and_display() {
        let region: Region = "114.5/118.5/38.5/42.5".parse().unwrap();
        assert_eq!(region.lon_min, 114.5);
        assert_eq!(region.lat_max, 42.5);
        assert_eq!(region.to_string(), "114.5/118.5/38.5/42.5");
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!("114/118/38".parse::<Region>().is_err());
        assert!("a/118/38/42".parse::<Region>().is_err());
        assert!("118/114/38/42".parse::<Region>().is_err());
        assert!("114/118/42/38".parse::<Region>().is_err());
        assert!("114/118/-95/42".parse::<Region>().is_err());
    }

    #[test]
    fn test_expanded_clamps_to_globe() {
        let region = Region::new(-178.0, 170.0, 80.0, 88.0).unwrap();
        let wide = region.expanded(5.0);
        assert_eq!(wide.lon_min, -180.0);
        assert_eq!(wide.lon_max, 175.0);
        assert_eq!(wide.lat_min, 75.0);
        assert_eq!(wide.lat_max, 90.0);
    }

    #[test]
    fn test_outline_is_closed() {
        let region: Region = "0/1/0/1".parse().unwrap();
        let outline = region.outline();
        assert_eq!(outline[0], outline[4]);
        assert!(outline.iter().all(|&(lon, lat)| region.contains(lon, lat)));
    }
}
