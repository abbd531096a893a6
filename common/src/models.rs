//! # Scan Models
//!
//! The entities produced by ingestion and read by feature computation.
//!
//! ## Core Entities
//! * [`host::Host`]: One scanned asset, identified by its IPv4 address.
//! * [`port::Port`]: One service endpoint on a host.
//!
//! ## Value Objects
//! * [`os::OsInfo`]: The operating-system fingerprint chosen for a host.
//!
//! Absent data is always `None`. Adapters normalize blank or placeholder
//! input through [`normalize`] so that an empty string never stands in for
//! a known value.

pub mod host;
pub mod os;
pub mod port;

pub use host::Host;
pub use os::OsInfo;
pub use port::Port;

/// Trims `value` and maps blank input to `None`.
pub fn normalize(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_blank_is_absent() {
        assert_eq!(normalize(None), None);
        assert_eq!(normalize(Some("")), None);
        assert_eq!(normalize(Some("   ")), None);
    }

    #[test]
    fn normalize_trims_present_values() {
        assert_eq!(normalize(Some(" ssh ")), Some("ssh".to_string()));
    }
}
