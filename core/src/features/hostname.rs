use hostrank_common::models::Host;

use crate::features::{Feature, per_host};

/// Character count of the hostname, 0 when there is none.
pub struct HostnameLength;

impl Feature for HostnameLength {
    fn name(&self) -> &str {
        "hostname_length"
    }

    fn compute(&self, hosts: &[Host]) -> Vec<f64> {
        per_host(hosts, |host| {
            host.hostname.as_deref().map_or(0, |name| name.chars().count()) as f64
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_characters() {
        let hosts = vec![Host::default().with_hostname("a.b.com"), Host::default()];
        assert_eq!(HostnameLength.compute(&hosts), vec![7.0, 0.0]);
    }
}
