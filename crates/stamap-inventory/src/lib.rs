//! # stamap-inventory
//!
//! Reads station identity and coordinates from seismic network metadata.
//!
//! Two formats are supported and detected from the file contents:
//! - Dataless SEED volumes (blockette 050 station headers)
//! - FDSN StationXML documents
//!
//! Instrument responses, channels and comments are never interpreted.
//!
//! ```no_run
//! use stamap_inventory::Inventory;
//!
//! let inventory = Inventory::from_file("BJ.dataless")?;
//! for station in inventory.stations() {
//!     println!("{}", station);
//! }
//! # Ok::<(), stamap_inventory::InventoryError>(())
//! ```

mod error;
mod seed;
mod station;
mod stationxml;

pub use error::InventoryError;
pub use seed::parse_dataless;
pub use station::Station;
pub use stationxml::parse_station_xml;

use std::path::Path;
use tracing::info;

/// Result type for inventory operations.
pub type Result<T> = std::result::Result<T, InventoryError>;

/// Metadata file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Dataless SEED volume.
    DatalessSeed,
    /// FDSN StationXML document.
    StationXml,
}

impl Format {
    /// Detect the format from the first bytes of a file.
    pub fn detect(bytes: &[u8]) -> Option<Self> {
        let start = bytes.iter().position(|b| !b.is_ascii_whitespace())?;
        let head = &bytes[start..];
        // UTF-8 byte order mark before an XML declaration.
        let head = head.strip_prefix(b"\xEF\xBB\xBF".as_slice()).unwrap_or(head);
        if head.first() == Some(&b'<') {
            Some(Format::StationXml)
        } else if seed::looks_like_seed(bytes) {
            Some(Format::DatalessSeed)
        } else {
            None
        }
    }
}

/// Stations read from one metadata file.
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    stations: Vec<Station>,
}

impl Inventory {
    /// Build an inventory from already-parsed stations, collapsing repeated
    /// epochs of the same station.
    pub fn new(stations: Vec<Station>) -> Self {
        Self {
            stations: station::dedup_epochs(stations),
        }
    }

    /// Read a Dataless SEED or StationXML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let inventory = Self::from_bytes(&bytes)?;
        info!(
            "read {} stations from {}",
            inventory.len(),
            path.display()
        );
        Ok(inventory)
    }

    /// Parse metadata held in memory.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let stations = match Format::detect(bytes).ok_or(InventoryError::UnknownFormat)? {
            Format::DatalessSeed => parse_dataless(bytes)?,
            Format::StationXml => {
                let text = std::str::from_utf8(bytes)
                    .map_err(|e| InventoryError::MalformedXml(e.to_string()))?;
                parse_station_xml(text)?
            }
        };
        Ok(Self::new(stations))
    }

    /// All stations, in file order.
    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    /// Number of stations.
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    /// Whether no stations were found.
    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}
