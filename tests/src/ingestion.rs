#![cfg(test)]
use std::net::Ipv4Addr;

use hostrank_common::config::InputFormat;
use hostrank_common::models::Host;
use hostrank_core::error::IngestError;
use hostrank_core::ingest::{self, HostLoader, StructuredAdapter, TabularAdapter};

use crate::fixtures;

fn load(format: InputFormat, text: &str) -> Result<Vec<Host>, IngestError> {
    let mut input: &[u8] = text.as_bytes();
    ingest::loader_for(format).load_hosts(&mut input)
}

#[test]
fn structured_report_yields_every_host_in_order() {
    let hosts: Vec<Host> = load(InputFormat::Xml, fixtures::OFFICE_XML).unwrap();

    let ips: Vec<Option<Ipv4Addr>> = hosts.iter().map(|h| h.ip_address).collect();
    assert_eq!(
        ips,
        vec![
            Some(Ipv4Addr::new(192, 168, 1, 10)),
            Some(Ipv4Addr::new(192, 168, 1, 20)),
            Some(Ipv4Addr::new(192, 168, 1, 30)),
        ]
    );
}

#[test]
fn structured_report_details() {
    let hosts: Vec<Host> = StructuredAdapter.parse_str(fixtures::OFFICE_XML).unwrap();
    let dc: &Host = &hosts[0];

    assert_eq!(dc.hostname.as_deref(), Some("dc01.corp.local"));
    assert_eq!(dc.ports.len(), 5);

    let os = dc.os_info.as_ref().unwrap();
    assert_eq!(os.name.as_deref(), Some("Microsoft Windows Server 2016"));
    assert_eq!(os.family.as_deref(), Some("Microsoft Windows"));
    assert_eq!(os.accuracy, Some(96));

    let rdp = dc.ports.iter().find(|p| p.number == 3389).unwrap();
    assert_eq!(rdp.cpe.as_deref(), Some("cpe:/o:microsoft:windows"));
    assert_eq!(rdp.software.as_deref(), Some("Microsoft Terminal Services"));

    let web: &Host = &hosts[1];
    let ssh = &web.ports[0];
    assert_eq!(ssh.protocol.as_deref(), Some("tcp"));
    assert_eq!(ssh.state.as_deref(), Some("open"));
    assert_eq!(ssh.version.as_deref(), Some("8.9p1"));

    let printer: &Host = &hosts[2];
    assert_eq!(printer.hostname, None);
    assert_eq!(printer.os_info, None);
    assert_eq!(printer.ports[0].state.as_deref(), Some("open|filtered"));
}

#[test]
fn tabular_export_matches_structured_report() {
    let from_csv: Vec<Host> = load(InputFormat::Csv, fixtures::OFFICE_CSV).unwrap();
    let from_xml: Vec<Host> = load(InputFormat::Xml, fixtures::OFFICE_XML).unwrap();

    assert_eq!(from_csv.len(), from_xml.len());
    for (csv_host, xml_host) in from_csv.iter().zip(&from_xml) {
        assert_eq!(csv_host.ip_address, xml_host.ip_address);
        assert_eq!(csv_host.hostname, xml_host.hostname);
        assert_eq!(csv_host.os_name(), xml_host.os_name());
        assert_eq!(csv_host.ports, xml_host.ports);
    }
}

#[test]
fn only_consecutive_rows_are_grouped() {
    let hosts: Vec<Host> = TabularAdapter.parse_str(fixtures::REGROUPED_CSV).unwrap();

    let shape: Vec<(Option<Ipv4Addr>, Vec<u16>)> = hosts
        .iter()
        .map(|h| (h.ip_address, h.ports.iter().map(|p| p.number).collect()))
        .collect();
    assert_eq!(
        shape,
        vec![
            (Some(Ipv4Addr::new(10, 0, 0, 1)), vec![22, 80]),
            (Some(Ipv4Addr::new(10, 0, 0, 2)), vec![443]),
            (Some(Ipv4Addr::new(10, 0, 0, 1)), vec![8080]),
        ]
    );
}

#[test]
fn bad_port_rejects_the_whole_export() {
    match load(InputFormat::Csv, fixtures::BAD_PORT_CSV) {
        Err(IngestError::InvalidPort { value, line }) => {
            assert_eq!(value, "not-a-port");
            assert_eq!(line, 3);
        }
        other => panic!("expected an invalid port error, got {other:?}"),
    }
}

#[test]
fn truncated_report_is_a_parse_error() {
    let err = load(InputFormat::Xml, fixtures::TRUNCATED_XML).unwrap_err();
    assert!(matches!(err, IngestError::Malformed(_) | IngestError::Xml(_)));
    assert!(!err.is_decoding());
}

#[test]
fn report_in_the_wrong_format_fails() {
    assert!(load(InputFormat::Xml, fixtures::OFFICE_CSV).is_err());
}
