//! Error types for inventory loading.

use thiserror::Error;

/// Errors that can occur when reading station metadata.
#[derive(Debug, Error)]
pub enum InventoryError {
    /// I/O error reading the metadata file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is neither Dataless SEED nor StationXML.
    #[error("unrecognised metadata format (expected Dataless SEED or StationXML)")]
    UnknownFormat,

    /// A SEED logical record or blockette is damaged.
    #[error("malformed SEED record {record}: {reason}")]
    MalformedSeed {
        /// Sequence number of the record the problem was found in.
        record: u32,
        /// What was wrong.
        reason: String,
    },

    /// XML syntax error.
    #[error("StationXML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// XML attribute syntax error.
    #[error("StationXML attribute error: {0}")]
    XmlAttr(#[from] quick_xml::events::attributes::AttrError),

    /// Well-formed XML missing required station content.
    #[error("malformed StationXML: {0}")]
    MalformedXml(String),

    /// A coordinate field could not be read as a number.
    #[error("invalid {field} '{value}' for station {station}")]
    InvalidCoordinate {
        /// Station the field belongs to.
        station: String,
        /// Field name.
        field: &'static str,
        /// Raw field text.
        value: String,
    },
}
