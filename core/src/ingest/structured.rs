//! Hierarchical scan reports.
//!
//! The document root holds one `host` element per asset:
//!
//! ```text
//! host
//! ├── address      addr, addrtype
//! ├── hostnames/hostname   name, type
//! ├── ports/port   portid, protocol
//! │   ├── state    state
//! │   └── service  name, product, version
//! │       └── cpe  (text)
//! └── os/osmatch   name
//!     └── osclass  vendor, osfamily, type, accuracy
//! ```
//!
//! Optional data that is missing becomes `None`. Only structurally required
//! attributes (`portid` and `protocol` on a port) raise an error, as does
//! anything that is not a single well-formed document element.

use std::collections::HashMap;
use std::net::Ipv4Addr;

use hostrank_common::models::{self, Host, OsInfo, Port};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use tracing::{debug, warn};

use crate::error::IngestError;
use crate::ingest::HostLoader;

pub struct StructuredAdapter;

impl HostLoader for StructuredAdapter {
    fn name(&self) -> &'static str {
        "structured"
    }

    fn parse_str(&self, text: &str) -> Result<Vec<Host>, IngestError> {
        let mut reader = Reader::from_str(text);
        reader.trim_text(true);

        let mut parser = ReportParser::default();
        loop {
            match reader.read_event()? {
                Event::Start(e) => parser.open(&e)?,
                Event::Empty(e) => {
                    parser.open(&e)?;
                    parser.close();
                }
                Event::End(_) => parser.close(),
                Event::Text(t) => parser.text(&t.unescape()?)?,
                Event::CData(t) => parser.text(&String::from_utf8_lossy(&t))?,
                Event::Eof => break,
                _ => {}
            }
        }
        parser.finish()
    }
}

type Attributes = HashMap<String, String>;

/// Event-driven builder for the hosts of one report.
#[derive(Default)]
struct ReportParser {
    /// Names of the currently open elements, outermost first.
    stack: Vec<String>,
    saw_root: bool,
    hosts: Vec<Host>,
    host: Option<HostDraft>,
    port: Option<Port>,
    os_match: Option<OsMatch>,
    cpe: Option<String>,
}

#[derive(Default)]
struct HostDraft {
    host: Host,
    /// Set once an OS match has produced a fingerprint; later matches are ignored.
    os_resolved: bool,
}

struct OsMatch {
    name: Option<String>,
    candidates: Vec<OsInfo>,
}

impl ReportParser {
    fn parent(&self) -> Option<&str> {
        self.stack.last().map(String::as_str)
    }

    fn open(&mut self, e: &BytesStart) -> Result<(), IngestError> {
        let name: String = String::from_utf8_lossy(e.name().as_ref()).into_owned();
        if self.stack.is_empty() {
            if self.saw_root {
                return Err(IngestError::Malformed(format!(
                    "<{name}> found after the document element"
                )));
            }
            self.saw_root = true;
        }

        match (name.as_str(), self.parent()) {
            ("host", _) if self.stack.len() == 1 => {
                self.host = Some(HostDraft::default());
            }
            ("address", Some("host")) => self.address(&attributes(e)?)?,
            ("hostname", Some("hostnames")) => self.hostname(&attributes(e)?),
            ("port", Some("ports")) if self.host.is_some() => {
                self.port = Some(new_port(&attributes(e)?)?);
            }
            ("state", Some("port")) => {
                if let Some(port) = self.port.as_mut() {
                    port.state = models::normalize(attributes(e)?.get("state").map(String::as_str));
                }
            }
            ("service", Some("port")) => {
                if let Some(port) = self.port.as_mut() {
                    let attrs: Attributes = attributes(e)?;
                    let get = |key: &str| models::normalize(attrs.get(key).map(String::as_str));
                    port.service = get("name");
                    port.software = get("product");
                    port.version = get("version");
                }
            }
            ("cpe", Some("service")) if self.port.is_some() => {
                self.cpe = Some(String::new());
            }
            ("osmatch", Some("os")) => {
                if self.host.as_ref().is_some_and(|draft| !draft.os_resolved) {
                    let attrs: Attributes = attributes(e)?;
                    self.os_match = Some(OsMatch {
                        name: models::normalize(attrs.get("name").map(String::as_str)),
                        candidates: Vec::new(),
                    });
                }
            }
            ("osclass", Some("osmatch")) => {
                if let Some(os_match) = self.os_match.as_mut() {
                    let attrs: Attributes = attributes(e)?;
                    match os_class(&attrs, os_match.name.as_deref()) {
                        Some(candidate) => os_match.candidates.push(candidate),
                        None => debug!(?attrs, "Skipping OS class without a valid accuracy"),
                    }
                }
            }
            _ => {}
        }

        self.stack.push(name);
        Ok(())
    }

    fn close(&mut self) {
        let Some(name) = self.stack.pop() else {
            return;
        };

        match name.as_str() {
            "host" if self.stack.len() == 1 => self.finish_host(),
            "port" => {
                if let (Some(draft), Some(port)) = (self.host.as_mut(), self.port.take()) {
                    draft.host.add_port(port);
                }
            }
            "cpe" => {
                if let (Some(port), Some(text)) = (self.port.as_mut(), self.cpe.take()) {
                    if port.cpe.is_none() {
                        port.cpe = models::normalize(Some(&text));
                    }
                }
            }
            "osmatch" => {
                if let (Some(draft), Some(os_match)) = (self.host.as_mut(), self.os_match.take()) {
                    if let Some(os_info) = select_os(os_match.candidates) {
                        draft.host.os_info = Some(os_info);
                        draft.os_resolved = true;
                    }
                }
            }
            _ => {}
        }
    }

    fn text(&mut self, text: &str) -> Result<(), IngestError> {
        if self.stack.is_empty() && !text.trim().is_empty() {
            return Err(IngestError::Malformed(
                "text outside the document element".to_string(),
            ));
        }
        if let Some(cpe) = self.cpe.as_mut() {
            cpe.push_str(text);
        }
        Ok(())
    }

    fn address(&mut self, attrs: &Attributes) -> Result<(), IngestError> {
        let Some(draft) = self.host.as_mut() else {
            return Ok(());
        };
        if draft.host.ip_address.is_some() || attrs.get("addrtype").map(String::as_str) != Some("ipv4") {
            return Ok(());
        }

        let raw: &String = attrs.get("addr").ok_or(IngestError::MissingAttribute {
            element: "address",
            attribute: "addr",
        })?;
        let ip: Ipv4Addr = raw.parse().map_err(|_| IngestError::InvalidAttribute {
            element: "address",
            attribute: "addr",
            value: raw.clone(),
        })?;
        draft.host.ip_address = Some(ip);
        Ok(())
    }

    fn hostname(&mut self, attrs: &Attributes) {
        let Some(draft) = self.host.as_mut() else {
            return;
        };
        if draft.host.hostname.is_none() && attrs.get("type").map(String::as_str) == Some("PTR") {
            draft.host.hostname = models::normalize(attrs.get("name").map(String::as_str));
        }
    }

    fn finish_host(&mut self) {
        let Some(draft) = self.host.take() else {
            return;
        };
        let host: Host = draft.host;
        match host.ip_address {
            Some(ip) => debug!(%ip, ports = host.ports.len(), "Parsed host"),
            None => warn!(ports = host.ports.len(), "Host has no IPv4 address"),
        }
        self.hosts.push(host);
    }

    fn finish(self) -> Result<Vec<Host>, IngestError> {
        if let Some(open) = self.stack.last() {
            return Err(IngestError::Malformed(format!(
                "document ends inside <{open}>"
            )));
        }
        if !self.saw_root {
            return Err(IngestError::Malformed("no root element found".to_string()));
        }
        Ok(self.hosts)
    }
}

fn attributes(e: &BytesStart) -> Result<Attributes, IngestError> {
    let mut attrs = Attributes::new();
    for attr in e.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        let key: String = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value: String = attr.unescape_value()?.into_owned();
        attrs.insert(key, value);
    }
    Ok(attrs)
}

fn new_port(attrs: &Attributes) -> Result<Port, IngestError> {
    let raw: &String = attrs.get("portid").ok_or(IngestError::MissingAttribute {
        element: "port",
        attribute: "portid",
    })?;
    let number: u16 = raw.trim().parse().map_err(|_| IngestError::InvalidAttribute {
        element: "port",
        attribute: "portid",
        value: raw.clone(),
    })?;
    let protocol: &String = attrs.get("protocol").ok_or(IngestError::MissingAttribute {
        element: "port",
        attribute: "protocol",
    })?;

    let mut port = Port::new(number);
    port.protocol = models::normalize(Some(protocol));
    Ok(port)
}

/// Flattens one OS class into a candidate fingerprint.
///
/// Returns `None` unless `accuracy` is an integer percentage.
fn os_class(attrs: &Attributes, match_name: Option<&str>) -> Option<OsInfo> {
    let accuracy: u8 = attrs
        .get("accuracy")
        .and_then(|raw| raw.trim().parse::<u8>().ok())
        .filter(|accuracy| *accuracy <= 100)?;

    let vendor: Option<String> = models::normalize(attrs.get("vendor").map(String::as_str));
    let family: Option<String> = models::normalize(attrs.get("osfamily").map(String::as_str));
    let family: Option<String> = match (&vendor, family) {
        (Some(vendor), Some(family)) if *vendor == family => Some(vendor.clone()),
        (Some(vendor), Some(family)) => Some(format!("{vendor} {family}")),
        (None, family) => family,
        (Some(vendor), None) => Some(vendor.clone()),
    };

    Some(OsInfo {
        vendor,
        family,
        os_type: models::normalize(attrs.get("type").map(String::as_str)),
        name: match_name.map(String::from),
        accuracy: Some(accuracy),
    })
}

/// Highest accuracy wins; among equal accuracies the earliest candidate wins.
fn select_os(candidates: Vec<OsInfo>) -> Option<OsInfo> {
    let mut best: Option<OsInfo> = None;
    for candidate in candidates {
        match &best {
            Some(current) if candidate.accuracy <= current.accuracy => {}
            _ => best = Some(candidate),
        }
    }
    best
}
