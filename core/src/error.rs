//! Error types for ingestion, matrix assembly and ranking.

use thiserror::Error;

/// Failure while reading one scan input. The whole input is rejected.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),

    #[error("input is not valid UTF-8 text: {0}")]
    Encoding(#[from] std::str::Utf8Error),

    #[error("malformed tabular input: {0}")]
    Tabular(#[from] csv::Error),

    #[error("malformed scan report: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("malformed scan report: {0}")]
    Malformed(String),

    #[error("invalid IPv4 address '{value}' (line {line})")]
    InvalidAddress { value: String, line: u64 },

    #[error("invalid port number '{value}' (line {line})")]
    InvalidPort { value: String, line: u64 },

    #[error("<{element}> is missing required attribute '{attribute}'")]
    MissingAttribute {
        element: &'static str,
        attribute: &'static str,
    },

    #[error("invalid value '{value}' for attribute '{attribute}' of <{element}>")]
    InvalidAttribute {
        element: &'static str,
        attribute: &'static str,
        value: String,
    },
}

impl IngestError {
    /// True when the input bytes could not be decoded as text, as opposed to
    /// text that does not have the expected structure.
    pub fn is_decoding(&self) -> bool {
        match self {
            Self::Encoding(_) => true,
            Self::Tabular(err) => matches!(err.kind(), csv::ErrorKind::Utf8 { .. }),
            _ => false,
        }
    }
}

/// Failure while assembling the feature matrix.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("feature '{feature}' produced {actual} values for {expected} hosts")]
    ColumnLength {
        feature: String,
        expected: usize,
        actual: usize,
    },
}

/// Failure while handing a report to the anomaly model or ranking its hosts.
#[derive(Debug, Error)]
pub enum RankError {
    #[error("nothing to rank: the report contains no hosts")]
    EmptyReport,

    #[error("model and report don't share matching features: {model:?} != {report:?}")]
    FeatureMismatch {
        model: Vec<String>,
        report: Vec<String>,
    },

    #[error("model returned {scores} scores for {hosts} hosts")]
    ScoreCount { scores: usize, hosts: usize },

    #[error(transparent)]
    Matrix(#[from] ReportError),

    /// Raised by the injected anomaly model.
    #[error(transparent)]
    Model(#[from] anyhow::Error),
}
