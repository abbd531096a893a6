//! The feature abstraction and the built-in catalog.
//!
//! A [`Feature`] sees the whole host population at once. Most features are
//! plain per-host maps, but the entropy features need frequency tables built
//! over every host before a single value can be produced.

use hostrank_common::models::{Host, Port};

pub mod address;
pub mod entropy;
pub mod hostname;
pub mod os;
pub mod ports;
pub mod services;

pub use address::IpOctet;
pub use entropy::{HostnameEntropy, PortEntropy};
pub use hostname::HostnameLength;
pub use os::OsNameFlag;
pub use ports::{
    LowPortCount, MaxBannerLength, NamedServiceCount, OpenPortCount, SoftwareBannerCount,
    TcpPortCount, TotalPortCount,
};
pub use services::{
    DatabaseCount, HttpServerCount, WindowsDomainAdminCount, WindowsDomainMemberCount,
};

/// A named numeric column computed over a host population.
pub trait Feature: Send + Sync {
    /// Column name. Unique within a report.
    fn name(&self) -> &str;

    /// One value per host, in host order.
    ///
    /// Must not depend on anything but `hosts`.
    fn compute(&self, hosts: &[Host]) -> Vec<f64>;
}

/// Applies `value` to every host.
pub(crate) fn per_host(hosts: &[Host], value: impl Fn(&Host) -> f64) -> Vec<f64> {
    hosts.iter().map(value).collect()
}

/// Number of ports on `host` matching `predicate`.
pub(crate) fn count_ports(host: &Host, predicate: impl Fn(&Port) -> bool) -> f64 {
    host.ports.iter().filter(|&port| predicate(port)).count() as f64
}

/// The standard feature set, in matrix column order.
pub fn default_catalog() -> Vec<Box<dyn Feature>> {
    let mut catalog: Vec<Box<dyn Feature>> = IpOctet::all()
        .into_iter()
        .map(|octet| Box::new(octet) as Box<dyn Feature>)
        .collect();
    let rest: Vec<Box<dyn Feature>> = vec![
        Box::new(TotalPortCount),
        Box::new(OpenPortCount),
        Box::new(LowPortCount),
        Box::new(TcpPortCount),
        Box::new(NamedServiceCount),
        Box::new(SoftwareBannerCount),
        Box::new(MaxBannerLength),
        Box::new(OsNameFlag::windows()),
        Box::new(OsNameFlag::linux()),
        Box::new(HttpServerCount),
        Box::new(DatabaseCount),
        Box::new(WindowsDomainAdminCount),
        Box::new(WindowsDomainMemberCount),
        Box::new(PortEntropy),
        Box::new(HostnameLength),
        Box::new(HostnameEntropy),
    ];
    catalog.extend(rest);
    catalog
}
