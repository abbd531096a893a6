pub mod matrix;

use std::path::PathBuf;

use clap::Parser;
use hostrank_common::config::{Config, InputFormat};

#[derive(Parser)]
#[command(name = "hostrank")]
#[command(about = "Turns scan reports into a feature matrix for anomaly ranking.")]
pub struct CommandLine {
    /// Scan reports read with --input-format
    #[arg(value_name = "REPORTS")]
    pub reports: Vec<PathBuf>,

    /// Format of the positional reports (xml or csv)
    #[arg(short = 'f', long, default_value_t = InputFormat::Xml)]
    pub input_format: InputFormat,

    /// Tabular export to read, may be repeated
    #[arg(short = 'c', long = "read-csv", value_name = "CSV")]
    pub read_csv: Vec<PathBuf>,

    /// Structured scan report to read, may be repeated
    #[arg(short = 'x', long = "read-xml", value_name = "XML")]
    pub read_xml: Vec<PathBuf>,

    /// Write the feature matrix here instead of stdout
    #[arg(short = 'o', long = "output-matrix", value_name = "MATRIX_FILE")]
    pub output_matrix: Option<PathBuf>,

    /// Increase log verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Compute feature columns on a single thread
    #[arg(long)]
    pub sequential: bool,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn config(&self) -> Config {
        Config {
            input_format: self.input_format,
            verbosity: self.verbose,
            parallel: !self.sequential,
        }
    }

    /// Every input paired with the format it is read as, in the order
    /// positional, tabular, structured.
    pub fn inputs(&self) -> Vec<(PathBuf, InputFormat)> {
        let positional = self.reports.iter().map(|p| (p.clone(), self.input_format));
        let tabular = self.read_csv.iter().map(|p| (p.clone(), InputFormat::Csv));
        let structured = self.read_xml.iter().map(|p| (p.clone(), InputFormat::Xml));
        positional.chain(tabular).chain(structured).collect()
    }
}
