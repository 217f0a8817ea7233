//! Earth relief grid resolutions.

use crate::DemError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Grid spacing of the GMT `earth_relief` datasets.
///
/// Finer resolutions download much larger files; `01s` and `03s` are
/// SRTM-based and only cover land between 60°S and 60°N.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Resolution {
    /// 1 arc-minute.
    #[serde(rename = "01m")]
    OneMinute,
    /// 30 arc-seconds.
    #[serde(rename = "30s")]
    ThirtySeconds,
    /// 15 arc-seconds.
    #[serde(rename = "15s")]
    FifteenSeconds,
    /// 3 arc-seconds.
    #[default]
    #[serde(rename = "03s")]
    ThreeSeconds,
    /// 1 arc-second.
    #[serde(rename = "01s")]
    OneSecond,
}

impl Resolution {
    /// All resolutions, coarsest first.
    pub const ALL: [Resolution; 5] = [
        Resolution::OneMinute,
        Resolution::ThirtySeconds,
        Resolution::FifteenSeconds,
        Resolution::ThreeSeconds,
        Resolution::OneSecond,
    ];

    /// The GMT resolution code, e.g. `03s`.
    pub fn code(self) -> &'static str {
        match self {
            Resolution::OneMinute => "01m",
            Resolution::ThirtySeconds => "30s",
            Resolution::FifteenSeconds => "15s",
            Resolution::ThreeSeconds => "03s",
            Resolution::OneSecond => "01s",
        }
    }

    /// Grid spacing in arc-seconds.
    pub fn arc_seconds(self) -> u32 {
        match self {
            Resolution::OneMinute => 60,
            Resolution::ThirtySeconds => 30,
            Resolution::FifteenSeconds => 15,
            Resolution::ThreeSeconds => 3,
            Resolution::OneSecond => 1,
        }
    }

    /// GMT remote dataset name, e.g. `@earth_relief_03s`.
    pub fn remote_dataset(self) -> String {
        format!("@earth_relief_{}", self.code())
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Resolution {
    type Err = DemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Resolution::ALL
            .into_iter()
            .find(|r| r.code() == s.trim())
            .ok_or_else(|| DemError::InvalidResolution(s.to_string()))
    }
}
