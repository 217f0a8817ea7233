//! Inset placement.

use crate::GmtError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Corner of the main map an inset is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Corner {
    /// Top left.
    TopLeft,
    /// Top right.
    TopRight,
    /// Bottom left.
    BottomLeft,
    /// Bottom right.
    BottomRight,
}

impl Corner {
    /// GMT justification code.
    pub fn code(self) -> &'static str {
        match self {
            Corner::TopLeft => "TL",
            Corner::TopRight => "TR",
            Corner::BottomLeft => "BL",
            Corner::BottomRight => "BR",
        }
    }
}

/// Inset anchor in GMT reference-point syntax: `j{TL|TR|BL|BR}[+o<dx>[/<dy>]]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsetPosition {
    /// Anchor corner, inside the map frame.
    pub corner: Corner,
    /// Offset from the corner, e.g. `0.1c`.
    pub offset: Option<String>,
}

impl Default for InsetPosition {
    fn default() -> Self {
        Self {
            corner: Corner::BottomRight,
            offset: Some("0.1c".to_string()),
        }
    }
}

impl fmt::Display for InsetPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "j{}", self.corner.code())?;
        if let Some(offset) = &self.offset {
            write!(f, "+o{}", offset)?;
        }
        Ok(())
    }
}

impl FromStr for InsetPosition {
    type Err = GmtError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || GmtError::InvalidInsetPosition(s.to_string());
        let rest = s.trim().strip_prefix('j').ok_or_else(invalid)?;
        let code = rest.get(..2).ok_or_else(invalid)?;
        let modifiers = &rest[2..];

        let corner = match code {
            "TL" | "LT" => Corner::TopLeft,
            "TR" | "RT" => Corner::TopRight,
            "BL" | "LB" => Corner::BottomLeft,
            "BR" | "RB" => Corner::BottomRight,
            _ => return Err(invalid()),
        };

        let offset = if modifiers.is_empty() {
            None
        } else {
            let value = modifiers.strip_prefix("+o").ok_or_else(invalid)?;
            if value.is_empty() || value.contains('+') {
                return Err(invalid());
            }
            Some(value.to_string())
        };

        Ok(Self { corner, offset })
    }
}

impl Serialize for InsetPosition {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for InsetPosition {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
