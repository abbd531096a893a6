use hostrank_common::models::Host;

use crate::features::{Feature, per_host};

/// One octet of the IPv4 address, as an address-range context indicator.
///
/// Hosts without an address score 0.
pub struct IpOctet {
    index: usize,
    name: String,
}

impl IpOctet {
    /// `None` unless `index` is in `0..4`.
    pub fn new(index: usize) -> Option<Self> {
        (index < 4).then(|| Self {
            index,
            name: format!("ip_octet_{index}"),
        })
    }

    /// All four octets, most significant first.
    pub fn all() -> [Self; 4] {
        [0, 1, 2, 3].map(|index| Self {
            index,
            name: format!("ip_octet_{index}"),
        })
    }
}

impl Feature for IpOctet {
    fn name(&self) -> &str {
        &self.name
    }

    fn compute(&self, hosts: &[Host]) -> Vec<f64> {
        per_host(hosts, |host| {
            host.octets().map_or(0.0, |octets| f64::from(octets[self.index]))
        })
    }
}
