/// Operating-system fingerprint attached to a host.
///
/// Structured scan reports fill every field; tabular exports only carry a
/// name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OsInfo {
    pub vendor: Option<String>,
    /// Vendor and OS family joined by a space, or the vendor alone when both are equal.
    pub family: Option<String>,
    pub os_type: Option<String>,
    pub name: Option<String>,
    /// Match accuracy in percent (0-100).
    pub accuracy: Option<u8>,
}

impl OsInfo {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    /// Case-insensitive substring test against the OS name.
    pub fn name_contains(&self, needle: &str) -> bool {
        self.name
            .as_deref()
            .is_some_and(|name| name.to_lowercase().contains(needle))
    }
}
