//! Delimited text exports.
//!
//! One row per (host, port) pair. Consecutive rows that share an address are
//! grouped into one host; a row with an empty `port` cell describes a host
//! with no ports.

use std::net::Ipv4Addr;

use csv::{ReaderBuilder, StringRecord, Trim};
use hostrank_common::models::{self, Host, OsInfo, Port};
use tracing::debug;

use crate::error::IngestError;
use crate::ingest::HostLoader;

pub struct TabularAdapter;

impl HostLoader for TabularAdapter {
    fn name(&self) -> &'static str {
        "tabular"
    }

    fn parse_str(&self, text: &str) -> Result<Vec<Host>, IngestError> {
        let mut reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(text.as_bytes());
        let columns = Columns::from_headers(reader.headers()?);

        let mut hosts: Vec<Host> = Vec::new();
        for record in reader.records() {
            let record: StringRecord = record?;
            let line: u64 = record.position().map_or(0, |pos| pos.line());

            let address: Ipv4Addr = parse_address(columns.cell(&record, columns.ipv4), line)?;
            let starts_host = hosts.last().is_none_or(|h| h.ip_address != Some(address));
            if starts_host {
                debug!(%address, line, "New host");
                hosts.push(columns.host(&record, address));
            }

            if let Some(raw) = columns.cell(&record, columns.port) {
                let port: Port = columns.port(&record, parse_port(raw, line)?);
                if let Some(host) = hosts.last_mut() {
                    host.add_port(port);
                }
            }
        }

        Ok(hosts)
    }
}

/// Position of each recognized header. Names match exactly; unknown headers
/// are ignored.
#[derive(Debug, Default)]
struct Columns {
    ipv4: Option<usize>,
    hostname: Option<usize>,
    os_name: Option<usize>,
    port: Option<usize>,
    state: Option<usize>,
    protocol: Option<usize>,
    service: Option<usize>,
    software_banner: Option<usize>,
    version: Option<usize>,
    cpe: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &StringRecord) -> Self {
        let mut columns = Self::default();
        for (idx, header) in headers.iter().enumerate() {
            let slot: &mut Option<usize> = match header {
                "ipv4" => &mut columns.ipv4,
                "hostname" => &mut columns.hostname,
                "os_name" => &mut columns.os_name,
                "port" => &mut columns.port,
                "state" => &mut columns.state,
                "protocol" => &mut columns.protocol,
                "service" => &mut columns.service,
                "software_banner" => &mut columns.software_banner,
                "version" => &mut columns.version,
                "cpe" => &mut columns.cpe,
                _ => continue,
            };
            slot.get_or_insert(idx);
        }
        columns
    }

    /// Cell content, `None` when the column is missing or the cell is blank.
    fn cell<'r>(&self, record: &'r StringRecord, column: Option<usize>) -> Option<&'r str> {
        column
            .and_then(|idx| record.get(idx))
            .filter(|value| !value.is_empty())
    }

    fn owned(&self, record: &StringRecord, column: Option<usize>) -> Option<String> {
        models::normalize(self.cell(record, column))
    }

    fn host(&self, record: &StringRecord, address: Ipv4Addr) -> Host {
        Host {
            ip_address: Some(address),
            hostname: self.owned(record, self.hostname),
            os_info: self.owned(record, self.os_name).map(OsInfo::named),
            ports: Vec::new(),
        }
    }

    fn port(&self, record: &StringRecord, number: u16) -> Port {
        Port {
            number,
            protocol: self.owned(record, self.protocol),
            state: self.owned(record, self.state),
            service: self.owned(record, self.service),
            software: self.owned(record, self.software_banner),
            version: self.owned(record, self.version),
            cpe: self.owned(record, self.cpe),
        }
    }
}

fn parse_address(raw: Option<&str>, line: u64) -> Result<Ipv4Addr, IngestError> {
    let raw: &str = raw.unwrap_or_default();
    raw.parse::<Ipv4Addr>()
        .map_err(|_| IngestError::InvalidAddress {
            value: raw.to_string(),
            line,
        })
}

/// Port cells may be written as decimals (`"22.0"`); the fraction is dropped.
fn parse_port(raw: &str, line: u64) -> Result<u16, IngestError> {
    let invalid = || IngestError::InvalidPort {
        value: raw.to_string(),
        line,
    };
    let value: f64 = raw.parse::<f64>().map_err(|_| invalid())?.trunc();
    if !value.is_finite() || !(0.0..=f64::from(u16::MAX)).contains(&value) {
        return Err(invalid());
    }
    Ok(value as u16)
}
