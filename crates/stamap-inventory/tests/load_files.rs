//! Integration tests loading metadata files from disk.

use stamap_inventory::{Inventory, InventoryError};
use std::fs;

fn seed_record(sequence: u32, kind: char, data: &str) -> Vec<u8> {
    let mut rec = format!("{:06}{} ", sequence, kind).into_bytes();
    rec.extend_from_slice(data.as_bytes());
    rec.resize(4096, b' ');
    rec
}

fn station_blockette(code: &str, lat: &str, lon: &str, elev: &str, net: &str) -> String {
    let body = format!(
        "{:<5}{:>10}{:>11}{:>7}0003000Station~00132101020100101~~N{:<2}",
        code, lat, lon, elev, net
    );
    format!("050{:04}{}", body.len() + 7, body)
}

#[test]
fn test_load_dataless_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("BJ.dataless");

    let mut volume = seed_record(1, 'V', "0100034 2.412");
    volume.extend(seed_record(
        2,
        'S',
        &station_blockette("BJT", "+40.0183", "+116.1679", "137.0", "BJ"),
    ));
    volume.extend(seed_record(
        3,
        'S',
        &station_blockette("CHC", "+39.8000", "+115.9000", "60.0", "BJ"),
    ));
    fs::write(&path, volume).unwrap();

    let inventory = Inventory::from_file(&path).expect("Failed to load dataless volume");
    assert_eq!(inventory.len(), 2);
    let labels: Vec<String> = inventory.stations().iter().map(|s| s.label()).collect();
    assert_eq!(labels, vec!["BJ.BJT", "BJ.CHC"]);
    assert_eq!(inventory.stations()[1].elevation, Some(60.0));
}

#[test]
fn test_load_station_xml_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stations.xml");
    fs::write(
        &path,
        r#"<?xml version="1.0" encoding="UTF-8"?>
<FDSNStationXML xmlns="http://www.fdsn.org/xml/station/1" schemaVersion="1.1">
  <Network code="IU">
    <Station code="BJT"><Latitude>40.0183</Latitude><Longitude>116.1679</Longitude></Station>
    <Station code="BJT"><Latitude>40.0183</Latitude><Longitude>116.1679</Longitude></Station>
  </Network>
</FDSNStationXML>"#,
    )
    .unwrap();

    let inventory = Inventory::from_file(&path).unwrap();
    assert_eq!(inventory.len(), 1);
    assert_eq!(inventory.stations()[0].label(), "IU.BJT");
}

#[test]
fn test_empty_network_loads_as_empty_inventory() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.xml");
    fs::write(&path, "<FDSNStationXML><Network code=\"XX\"/></FDSNStationXML>").unwrap();
    assert!(Inventory::from_file(&path).unwrap().is_empty());
}

#[test]
fn test_missing_file() {
    assert!(matches!(
        Inventory::from_file("/nonexistent/BJ.dataless"),
        Err(InventoryError::Io(_))
    ));
}
