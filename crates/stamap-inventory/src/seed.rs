//! Dataless SEED station control headers.
//!
//! A SEED volume is a sequence of fixed-length logical records, each
//! starting with an 8-byte header:
//!
//! ```text
//! 000001V     sequence number (6 digits), record type, continuation flag
//! ```
//!
//! The first record carries blockette 010, whose logical-record-length
//! field gives the record size as a power of two. Station control headers
//! (type `S`) hold blockette 050, which identifies a station and its
//! coordinates. Blockettes may run across records; a continuation flag of
//! `*` marks a record whose data continues the previous one.

use crate::station::parse_coordinate;
use crate::{InventoryError, Result, Station};
use tracing::{debug, trace};

/// Record length used when the volume header does not say otherwise.
const DEFAULT_RECORD_LENGTH: usize = 4096;

/// Fixed header at the start of every logical record.
const RECORD_HEADER_LEN: usize = 8;

/// Blockette type and length fields.
const BLOCKETTE_HEADER_LEN: usize = 7;

const RECORD_TYPES: &[u8] = b"VASTDRQM";

#[derive(Debug, Clone, Copy)]
struct RecordHeader {
    sequence: u32,
    kind: u8,
    continuation: bool,
}

fn parse_record_header(record: &[u8]) -> Option<RecordHeader> {
    if record.len() < RECORD_HEADER_LEN {
        return None;
    }
    if !record[..6].iter().all(u8::is_ascii_digit) {
        return None;
    }
    let sequence = std::str::from_utf8(&record[..6]).ok()?.parse().ok()?;
    let kind = record[6];
    if !RECORD_TYPES.contains(&kind) {
        return None;
    }
    Some(RecordHeader {
        sequence,
        kind,
        continuation: record[7] == b'*',
    })
}

/// Check whether bytes start with a SEED logical record header.
pub fn looks_like_seed(bytes: &[u8]) -> bool {
    parse_record_header(bytes).is_some()
}

/// Logical record length from blockette 010 in the volume header.
fn record_length(bytes: &[u8]) -> Result<usize> {
    let header = parse_record_header(bytes).ok_or(InventoryError::UnknownFormat)?;
    if header.kind != b'V' || bytes.get(8..11) != Some(b"010".as_slice()) {
        debug!("no volume header, assuming {} byte records", DEFAULT_RECORD_LENGTH);
        return Ok(DEFAULT_RECORD_LENGTH);
    }

    // 010 + length(4) + format version(4), then the 2-digit exponent.
    let exponent = bytes
        .get(19..21)
        .and_then(|b| std::str::from_utf8(b).ok())
        .and_then(|s| s.trim().parse::<u32>().ok())
        .ok_or_else(|| InventoryError::MalformedSeed {
            record: header.sequence,
            reason: "unreadable logical record length in blockette 010".to_string(),
        })?;
    if !(8..=16).contains(&exponent) {
        return Err(InventoryError::MalformedSeed {
            record: header.sequence,
            reason: format!("logical record length 2^{} out of range", exponent),
        });
    }
    Ok(1usize << exponent)
}

/// Extract every station (blockette 050) from a Dataless SEED volume.
pub fn parse_dataless(bytes: &[u8]) -> Result<Vec<Station>> {
    let record_len = record_length(bytes)?;
    debug!(record_len, size = bytes.len(), "reading dataless SEED");

    // Station control data, joined across continuation records.
    let mut chains: Vec<(u32, Vec<u8>)> = Vec::new();
    let mut current: Option<(u32, Vec<u8>)> = None;

    for record in bytes.chunks(record_len) {
        let header = match parse_record_header(record) {
            Some(h) if h.kind == b'S' => h,
            _ => {
                chains.extend(current.take());
                continue;
            }
        };
        let data = &record[RECORD_HEADER_LEN..];
        match current.as_mut() {
            Some((_, buf)) if header.continuation => buf.extend_from_slice(data),
            _ => {
                chains.extend(current.take());
                current = Some((header.sequence, data.to_vec()));
            }
        }
    }
    chains.extend(current.take());

    let mut stations = Vec::new();
    for (sequence, data) in &chains {
        parse_station_chain(*sequence, data, &mut stations)?;
    }
    Ok(stations)
}

fn parse_station_chain(record: u32, data: &[u8], out: &mut Vec<Station>) -> Result<()> {
    let mut pos = 0;
    while pos + BLOCKETTE_HEADER_LEN <= data.len() {
        let kind = &data[pos..pos + 3];
        // Anything that is not a blockette type is record padding.
        if !kind.iter().all(u8::is_ascii_digit) {
            break;
        }
        let len = std::str::from_utf8(&data[pos + 3..pos + BLOCKETTE_HEADER_LEN])
            .ok()
            .and_then(|s| s.trim().parse::<usize>().ok())
            .ok_or_else(|| malformed(record, "unreadable blockette length"))?;
        if len < BLOCKETTE_HEADER_LEN || pos + len > data.len() {
            return Err(malformed(
                record,
                format!(
                    "blockette {} with length {} overruns the station header",
                    String::from_utf8_lossy(kind),
                    len
                ),
            ));
        }

        let blockette = &data[pos..pos + len];
        trace!(record, blockette = %String::from_utf8_lossy(kind), len, "blockette");
        if kind == b"050" {
            out.push(parse_blockette_050(record, blockette)?);
        }
        pos += len;
    }
    Ok(())
}

/// Sequential reader over blockette fields.
struct FieldReader<'a> {
    data: &'a [u8],
    pos: usize,
    record: u32,
}

impl<'a> FieldReader<'a> {
    fn fixed(&mut self, width: usize) -> Result<&'a str> {
        let end = self.pos + width;
        let bytes = self
            .data
            .get(self.pos..end)
            .ok_or_else(|| malformed(self.record, "blockette 050 is truncated"))?;
        self.pos = end;
        std::str::from_utf8(bytes).map_err(|_| malformed(self.record, "non-ASCII field in blockette 050"))
    }

    /// Variable-length field terminated by `~`.
    fn variable(&mut self) -> Result<&'a str> {
        let rest = &self.data[self.pos.min(self.data.len())..];
        let len = rest
            .iter()
            .position(|&b| b == b'~')
            .ok_or_else(|| malformed(self.record, "unterminated variable field in blockette 050"))?;
        let field = self.fixed(len)?;
        self.pos += 1;
        Ok(field)
    }

    fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }
}

fn parse_blockette_050(record: u32, blockette: &[u8]) -> Result<Station> {
    let mut fields = FieldReader {
        data: blockette,
        pos: BLOCKETTE_HEADER_LEN,
        record,
    };

    let code = fields.fixed(5)?.trim().to_string();
    let latitude = parse_coordinate(&code, "latitude", fields.fixed(10)?)?;
    let longitude = parse_coordinate(&code, "longitude", fields.fixed(11)?)?;
    let elevation = parse_coordinate(&code, "elevation", fields.fixed(7)?)?;
    fields.fixed(4)?; // number of channels
    fields.fixed(3)?; // number of station comments
    fields.variable()?; // site name
    fields.fixed(3)?; // network identifier code
    fields.fixed(4)?; // 32-bit word order
    fields.fixed(2)?; // 16-bit word order
    fields.variable()?; // start effective date
    fields.variable()?; // end effective date
    fields.fixed(1)?; // update flag

    // The network code field was added in SEED 2.3.
    let network = if fields.remaining() >= 2 {
        fields.fixed(2)?.trim().to_string()
    } else {
        String::new()
    };

    Ok(Station {
        network,
        code,
        latitude,
        longitude,
        elevation: Some(elevation),
    })
}

fn malformed(record: u32, reason: impl Into<String>) -> InventoryError {
    InventoryError::MalformedSeed {
        record,
        reason: reason.into(),
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_record_length_from_volume_header() {
        let vol = volume(12, &[]);
        assert_eq!(record_length(&vol).unwrap(), 4096);
        let vol = volume(8, &[]);
        assert_eq!(record_length(&vol).unwrap(), 256);
    }

    #[test]
    fn test_parse_single_station() {
        let data = format!(
            "{}{}",
            blockette_050("BJT", 40.0183, 116.1679, 137.0, "BJ"),
            blockette_052()
        );
        let vol = volume(12, &[data]);
        let stations = parse_dataless(&vol).unwrap();
        assert_eq!(stations.len(), 1);
        let s = &stations[0];
        assert_eq!(s.network, "BJ");
        assert_eq!(s.code, "BJT");
        assert_relative_eq!(s.latitude, 40.0183);
        assert_relative_eq!(s.longitude, 116.1679);
        assert_eq!(s.elevation, Some(137.0));
    }

    #[test]
    fn test_station_split_across_continuation_records() {
        // 256-byte records leave 248 bytes of data, so the third station
        // header spills into a continuation record.
        let data: String = [
            blockette_050("AAA", 39.1, 115.1, 10.0, "BJ"),
            blockette_052(),
            blockette_052(),
            blockette_050("BBB", 39.2, 115.2, 20.0, "BJ"),
            blockette_050("CCC", -12.5, -77.25, 30.0, "PE"),
        ]
        .concat();
        assert!(data.len() > 248);
        let vol = volume(8, &[data]);
        let stations = parse_dataless(&vol).unwrap();
        let codes: Vec<&str> = stations.iter().map(|s| s.code.as_str()).collect();
        assert_eq!(codes, vec!["AAA", "BBB", "CCC"]);
        assert_relative_eq!(stations[2].longitude, -77.25);
        assert_eq!(stations[2].network, "PE");
    }

    #[test]
    fn test_multiple_station_headers() {
        let vol = volume(
            12,
            &[
                blockette_050("AAA", 39.0, 115.0, 1.0, "BJ"),
                blockette_050("BBB", 42.0, 118.0, 2.0, "BJ"),
            ],
        );
        assert_eq!(parse_dataless(&vol).unwrap().len(), 2);
    }

    #[test]
    fn test_truncated_blockette_is_malformed() {
        let mut data = blockette_050("AAA", 39.0, 115.0, 1.0, "BJ");
        data.replace_range(3..7, "9999");
        let vol = volume(12, &[data]);
        assert!(matches!(
            parse_dataless(&vol),
            Err(InventoryError::MalformedSeed { record: 2, .. })
        ));
    }

    #[test]
    fn test_not_seed() {
        assert!(!looks_like_seed(b"<?xml version=\"1.0\"?>"));
        assert!(looks_like_seed(&volume(12, &[])));
    }
}
