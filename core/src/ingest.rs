//! Ingestion adapters.
//!
//! Each adapter reads one scan input to completion and returns its hosts in
//! input order. A malformed input fails as a whole; no partial host list is
//! returned.
//!
//! * [`tabular`]: delimited text export with a header row.
//! * [`structured`]: hierarchical scan report with one `host` element per asset.

use std::io::Read;

use hostrank_common::config::InputFormat;
use hostrank_common::models::Host;
use tracing::info;

use crate::error::IngestError;

pub mod structured;
pub mod tabular;

pub use structured::StructuredAdapter;
pub use tabular::TabularAdapter;

/// Reads a scan input into hosts.
pub trait HostLoader {
    /// Short adapter name used in log output.
    fn name(&self) -> &'static str;

    /// Parses an already decoded input.
    fn parse_str(&self, text: &str) -> Result<Vec<Host>, IngestError>;

    /// Decodes `input` as UTF-8 and parses it.
    fn load_hosts(&self, input: &mut dyn Read) -> Result<Vec<Host>, IngestError> {
        let text: String = read_text(input)?;
        let hosts: Vec<Host> = self.parse_str(&text)?;
        info!(adapter = self.name(), hosts = hosts.len(), "Loaded scan input");
        Ok(hosts)
    }
}

/// Returns the adapter for `format`.
pub fn loader_for(format: InputFormat) -> Box<dyn HostLoader> {
    match format {
        InputFormat::Xml => Box::new(StructuredAdapter),
        InputFormat::Csv => Box::new(TabularAdapter),
    }
}

fn read_text(input: &mut dyn Read) -> Result<String, IngestError> {
    let mut bytes: Vec<u8> = Vec::new();
    input.read_to_end(&mut bytes)?;
    let mut text: String = String::from_utf8(bytes).map_err(|e| e.utf8_error())?;
    if text.starts_with('\u{feff}') {
        text.drain(..'\u{feff}'.len_utf8());
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_utf8_is_a_decoding_error() {
        let mut input: &[u8] = &[0x69, 0x70, 0xff, 0xfe];
        let err = TabularAdapter.load_hosts(&mut input).unwrap_err();
        assert!(matches!(err, IngestError::Encoding(_)));
        assert!(err.is_decoding());
    }

    #[test]
    fn byte_order_mark_is_stripped() {
        let mut input: &[u8] = "\u{feff}ipv4,port\n10.0.0.1,22\n".as_bytes();
        let hosts = TabularAdapter.load_hosts(&mut input).unwrap();
        assert_eq!(hosts.len(), 1);
        assert_eq!(hosts[0].ports.len(), 1);
    }

    #[test]
    fn loader_for_selects_adapter() {
        assert_eq!(loader_for(InputFormat::Xml).name(), "structured");
        assert_eq!(loader_for(InputFormat::Csv).name(), "tabular");
    }
}
