use std::net::Ipv4Addr;

use crate::models::{OsInfo, Port};

/// One scanned network asset.
///
/// Ports keep the order in which the input listed them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Host {
    /// `None` only when a structured report carried no IPv4 address for the host.
    pub ip_address: Option<Ipv4Addr>,
    pub hostname: Option<String>,
    pub os_info: Option<OsInfo>,
    pub ports: Vec<Port>,
}

impl From<Ipv4Addr> for Host {
    fn from(ip: Ipv4Addr) -> Self {
        Self {
            ip_address: Some(ip),
            ..Default::default()
        }
    }
}

impl Host {
    pub fn with_hostname(mut self, hostname: impl Into<String>) -> Self {
        self.hostname = Some(hostname.into());
        self
    }

    pub fn with_os_info(mut self, os_info: OsInfo) -> Self {
        self.os_info = Some(os_info);
        self
    }

    pub fn with_ports(mut self, ports: impl IntoIterator<Item = Port>) -> Self {
        self.ports.extend(ports);
        self
    }

    pub fn add_port(&mut self, port: Port) {
        self.ports.push(port);
    }

    /// The four address octets, or `None` for a host without an address.
    pub fn octets(&self) -> Option<[u8; 4]> {
        self.ip_address.map(|ip| ip.octets())
    }

    pub fn os_name(&self) -> Option<&str> {
        self.os_info.as_ref().and_then(|os| os.name.as_deref())
    }

    /// Ports ordered by port number, for detailed output.
    pub fn sorted_ports(&self) -> Vec<&Port> {
        let mut ports: Vec<&Port> = self.ports.iter().collect();
        ports.sort_by_key(|port| port.number);
        ports
    }
}
