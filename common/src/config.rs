use std::fmt;
use std::str::FromStr;

/// Settings for one run, filled in from the command line.
#[derive(Debug, Clone)]
pub struct Config {
    /// Format assumed for input files that were not given a format explicitly.
    pub input_format: InputFormat,
    /// 0 logs at info level, anything higher at debug level.
    pub verbosity: u8,
    /// Computes feature columns on the rayon pool.
    ///
    /// Output is identical either way.
    pub parallel: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_format: InputFormat::Xml,
            verbosity: 0,
            parallel: true,
        }
    }
}

/// Encoding of a scan input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputFormat {
    /// Hierarchical scan report with one `host` element per asset.
    #[default]
    Xml,
    /// Delimited text export with a header row.
    Csv,
}

impl FromStr for InputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "xml" => Ok(Self::Xml),
            "csv" => Ok(Self::Csv),
            _ => Err(format!("unknown input format: {s} (expected 'xml' or 'csv')")),
        }
    }
}

impl fmt::Display for InputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Xml => f.write_str("xml"),
            Self::Csv => f.write_str("csv"),
        }
    }
}
