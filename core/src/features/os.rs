use hostrank_common::models::Host;

use crate::features::{Feature, per_host};

/// 1 when the fingerprinted OS name contains a keyword, 0 otherwise.
///
/// Hosts without a fingerprint score 0.
pub struct OsNameFlag {
    name: &'static str,
    keyword: &'static str,
}

impl OsNameFlag {
    pub const fn windows() -> Self {
        Self {
            name: "is_windows",
            keyword: "windows",
        }
    }

    pub const fn linux() -> Self {
        Self {
            name: "is_linux",
            keyword: "linux",
        }
    }
}

impl Feature for OsNameFlag {
    fn name(&self) -> &str {
        self.name
    }

    fn compute(&self, hosts: &[Host]) -> Vec<f64> {
        per_host(hosts, |host| {
            let matches = host
                .os_info
                .as_ref()
                .is_some_and(|os| os.name_contains(self.keyword));
            if matches { 1.0 } else { 0.0 }
        })
    }
}
