/// A single service endpoint observed on a host.
///
/// Only the port number is guaranteed. Every other field is `None` when the
/// scanner did not report it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Port {
    pub number: u16,
    pub protocol: Option<String>,
    pub state: Option<String>,
    pub service: Option<String>,
    /// Product banner reported by service detection.
    pub software: Option<String>,
    pub version: Option<String>,
    pub cpe: Option<String>,
}

impl Port {
    pub fn new(number: u16) -> Self {
        Self {
            number,
            ..Default::default()
        }
    }

    pub fn with_protocol(mut self, protocol: impl Into<String>) -> Self {
        self.protocol = Some(protocol.into());
        self
    }

    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    pub fn with_service(mut self, service: impl Into<String>) -> Self {
        self.service = Some(service.into());
        self
    }

    pub fn with_software(mut self, software: impl Into<String>) -> Self {
        self.software = Some(software.into());
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn with_cpe(mut self, cpe: impl Into<String>) -> Self {
        self.cpe = Some(cpe.into());
        self
    }

    /// Character count of the software banner, 0 when there is none.
    pub fn banner_length(&self) -> usize {
        self.software.as_deref().map_or(0, |s| s.chars().count())
    }

    pub fn is_open(&self) -> bool {
        self.state.as_deref() == Some("open")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn banner_length_counts_characters() {
        assert_eq!(Port::new(22).with_software("OpenSSH").banner_length(), 7);
        assert_eq!(Port::new(22).banner_length(), 0);
    }

    #[test]
    fn only_open_state_is_open() {
        assert!(Port::new(80).with_state("open").is_open());
        assert!(!Port::new(80).with_state("filtered").is_open());
        assert!(!Port::new(80).is_open());
    }
}
