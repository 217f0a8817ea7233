//! FDSN StationXML.
//!
//! Only the network and station codes and the station-level coordinates
//! are read. Channel elements carry their own `Latitude`/`Longitude`, which
//! are ignored.

use crate::station::parse_coordinate;
use crate::{InventoryError, Result, Station};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::debug;

#[derive(Default)]
struct PendingStation {
    code: String,
    latitude: Option<f64>,
    longitude: Option<f64>,
    elevation: Option<f64>,
}

fn code_attribute(element: &BytesStart<'_>) -> Result<String> {
    match element.try_get_attribute("code")? {
        Some(attr) => Ok(attr.unescape_value()?.trim().to_string()),
        None => Ok(String::new()),
    }
}

/// Extract every station from a StationXML document.
pub fn parse_station_xml(text: &str) -> Result<Vec<Station>> {
    let mut reader = Reader::from_str(text);
    reader.trim_text(true);

    let mut path: Vec<Vec<u8>> = Vec::new();
    let mut network = String::new();
    let mut pending: Option<PendingStation> = None;
    let mut stations = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let name = e.local_name().as_ref().to_vec();
                match name.as_slice() {
                    b"Network" => network = code_attribute(&e)?,
                    b"Station" => {
                        pending = Some(PendingStation {
                            code: code_attribute(&e)?,
                            ..Default::default()
                        })
                    }
                    _ => {}
                }
                path.push(name);
            }
            Event::Text(t) => {
                let in_station = path.len() >= 2 && path[path.len() - 2] == b"Station";
                if let (true, Some(station)) = (in_station, pending.as_mut()) {
                    let value = t.unescape()?;
                    let code = station.code.clone();
                    match path.last().map(Vec::as_slice) {
                        Some(b"Latitude") => {
                            station.latitude = Some(parse_coordinate(&code, "latitude", &value)?)
                        }
                        Some(b"Longitude") => {
                            station.longitude = Some(parse_coordinate(&code, "longitude", &value)?)
                        }
                        Some(b"Elevation") => {
                            station.elevation = Some(parse_coordinate(&code, "elevation", &value)?)
                        }
                        _ => {}
                    }
                }
            }
            Event::End(e) => {
                if e.local_name().as_ref() == b"Station" {
                    if let Some(done) = pending.take() {
                        stations.push(finish_station(&network, done)?);
                    }
                }
                path.pop();
            }
            Event::Eof => break,
            _ => {}
        }
    }

    debug!(count = stations.len(), "read StationXML stations");
    Ok(stations)
}

fn finish_station(network: &str, pending: PendingStation) -> Result<Station> {
    let missing = |field: &str| {
        InventoryError::MalformedXml(format!(
            "station {}.{} has no {}",
            network, pending.code, field
        ))
    };
    Ok(Station {
        network: network.to_string(),
        code: pending.code.clone(),
        latitude: pending.latitude.ok_or_else(|| missing("Latitude"))?,
        longitude: pending.longitude.ok_or_else(|| missing("Longitude"))?,
        elevation: pending.elevation,
    })
}
