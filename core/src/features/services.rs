//! Counts of well-known service classes.

use hostrank_common::models::Host;

use crate::features::{Feature, count_ports, per_host};

const DATABASE_PORTS: &[u16] = &[
    1433, 1434, 3306, 5432, 1521, 1830, 9200, 9300, 7000, 7001, 9042, 6379, 5984,
];
const DATABASE_SERVICES: &[&str] = &[
    "sql",
    "mysql",
    "mssql",
    "oracle",
    "elasticsearch",
    "cassandra",
    "mongo",
    "redis",
    "couchdb",
];
const DOMAIN_ADMIN_PORTS: &[u16] = &[53, 88, 389, 636, 445];
const DOMAIN_MEMBER_PORTS: &[u16] = &[25, 135, 137, 139, 3268, 3269];

/// Ports whose service name mentions `http`.
pub struct HttpServerCount;

impl Feature for HttpServerCount {
    fn name(&self) -> &str {
        "http_server_count"
    }

    fn compute(&self, hosts: &[Host]) -> Vec<f64> {
        per_host(hosts, |host| {
            count_ports(host, |port| {
                port.service.as_deref().is_some_and(|service| service.contains("http"))
            })
        })
    }
}

/// Database services, matched by well-known port number or by service name.
pub struct DatabaseCount;

impl Feature for DatabaseCount {
    fn name(&self) -> &str {
        "database_count"
    }

    fn compute(&self, hosts: &[Host]) -> Vec<f64> {
        per_host(hosts, |host| {
            count_ports(host, |port| {
                DATABASE_PORTS.contains(&port.number)
                    || port
                        .service
                        .as_deref()
                        .is_some_and(|service| DATABASE_SERVICES.contains(&service))
            })
        })
    }
}

/// Ports typical of a Windows domain controller (DNS, Kerberos, LDAP, SMB).
pub struct WindowsDomainAdminCount;

impl Feature for WindowsDomainAdminCount {
    fn name(&self) -> &str {
        "windows_domain_admin_count"
    }

    fn compute(&self, hosts: &[Host]) -> Vec<f64> {
        per_host(hosts, |host| {
            count_ports(host, |port| DOMAIN_ADMIN_PORTS.contains(&port.number))
        })
    }
}

/// Ports typical of a Windows domain member.
pub struct WindowsDomainMemberCount;

impl Feature for WindowsDomainMemberCount {
    fn name(&self) -> &str {
        "windows_domain_member_count"
    }

    fn compute(&self, hosts: &[Host]) -> Vec<f64> {
        per_host(hosts, |host| {
            count_ports(host, |port| DOMAIN_MEMBER_PORTS.contains(&port.number))
        })
    }
}
