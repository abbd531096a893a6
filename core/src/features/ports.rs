//! Port inventory counts.

use hostrank_common::models::Host;

use crate::features::{Feature, count_ports, per_host};

/// Highest port number still counted as a "low" port.
const LOW_PORT_MAX: u16 = 9999;

/// All ports, regardless of state and protocol.
pub struct TotalPortCount;

impl Feature for TotalPortCount {
    fn name(&self) -> &str {
        "port_count"
    }

    fn compute(&self, hosts: &[Host]) -> Vec<f64> {
        per_host(hosts, |host| host.ports.len() as f64)
    }
}

/// Ports in the `open` state, regardless of protocol.
pub struct OpenPortCount;

impl Feature for OpenPortCount {
    fn name(&self) -> &str {
        "open_port_count"
    }

    fn compute(&self, hosts: &[Host]) -> Vec<f64> {
        per_host(hosts, |host| count_ports(host, |port| port.is_open()))
    }
}

/// Open ports numbered below 10000.
pub struct LowPortCount;

impl Feature for LowPortCount {
    fn name(&self) -> &str {
        "low_port_count"
    }

    fn compute(&self, hosts: &[Host]) -> Vec<f64> {
        per_host(hosts, |host| {
            count_ports(host, |port| port.is_open() && port.number <= LOW_PORT_MAX)
        })
    }
}

/// Open TCP ports.
pub struct TcpPortCount;

impl Feature for TcpPortCount {
    fn name(&self) -> &str {
        "tcp_port_count"
    }

    fn compute(&self, hosts: &[Host]) -> Vec<f64> {
        per_host(hosts, |host| {
            count_ports(host, |port| port.is_open() && port.protocol.as_deref() == Some("tcp"))
        })
    }
}

/// Ports whose service was recognized, i.e. present and not `unknown`.
pub struct NamedServiceCount;

impl Feature for NamedServiceCount {
    fn name(&self) -> &str {
        "named_service_count"
    }

    fn compute(&self, hosts: &[Host]) -> Vec<f64> {
        per_host(hosts, |host| {
            count_ports(host, |port| {
                port.service.as_deref().is_some_and(|service| service != "unknown")
            })
        })
    }
}

/// Ports that returned a software banner.
pub struct SoftwareBannerCount;

impl Feature for SoftwareBannerCount {
    fn name(&self) -> &str {
        "software_banner_count"
    }

    fn compute(&self, hosts: &[Host]) -> Vec<f64> {
        per_host(hosts, |host| {
            count_ports(host, |port| port.software.as_deref().is_some_and(|s| !s.is_empty()))
        })
    }
}

/// Length of the longest banner on the host.
///
/// An unusually verbose banner often points at a misconfigured service.
pub struct MaxBannerLength;

impl Feature for MaxBannerLength {
    fn name(&self) -> &str {
        "max_banner_length"
    }

    fn compute(&self, hosts: &[Host]) -> Vec<f64> {
        per_host(hosts, |host| {
            host.ports.iter().map(|port| port.banner_length()).max().unwrap_or(0) as f64
        })
    }
}
