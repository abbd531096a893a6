use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use hostrank_common::config::{Config, InputFormat};
use hostrank_common::models::Host;
use hostrank_core::ingest;
use hostrank_core::matrix::FeatureMatrix;
use hostrank_core::report::{Report, ReportSummary};
use tracing::{info, warn};

use crate::terminal::print;

/// Loads every input, builds the default report and writes its matrix.
pub fn matrix(
    inputs: &[(PathBuf, InputFormat)],
    output: Option<&Path>,
    cfg: &Config,
) -> anyhow::Result<()> {
    if inputs.is_empty() {
        bail!("no scan inputs given (pass report files, --read-csv or --read-xml)");
    }

    let mut report: Report = Report::with_default_features();
    report.set_parallel(cfg.parallel);

    for (path, format) in inputs {
        let hosts: Vec<Host> = load(path, *format)?;
        report.add_hosts(hosts);
    }

    if report.hosts().is_empty() {
        warn!("Nothing to rank: no hosts found in the given inputs");
        return Ok(());
    }

    print_summary(&report.summary());

    let matrix: FeatureMatrix = report.generate_matrix()?;
    match output {
        Some(path) => {
            let file: File = File::create(path)
                .with_context(|| format!("cannot create {}", path.display()))?;
            write_matrix(&report, &matrix, file)?;
            info!("Feature matrix written to {}", path.display());
        }
        None => write_matrix(&report, &matrix, io::stdout().lock())?,
    }
    Ok(())
}

fn load(path: &Path, format: InputFormat) -> anyhow::Result<Vec<Host>> {
    let mut file: File =
        File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
    ingest::loader_for(format)
        .load_hosts(&mut file)
        .with_context(|| format!("failed to parse {} as {format}", path.display()))
}

fn print_summary(summary: &ReportSummary) {
    print::header("report summary");
    let hosts: String = summary.number_of_hosts.to_string();
    let features: String = summary.features.len().to_string();
    print::aligned_line("Hosts", hosts, 8);
    print::aligned_line("Features", features, 8);
}

/// One header row (`ip` then feature names), then one row per host.
pub fn write_matrix<W: Write>(
    report: &Report,
    matrix: &FeatureMatrix,
    out: W,
) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_writer(out);

    let mut header: Vec<String> = vec!["ip".to_string()];
    header.extend(report.feature_names());
    writer.write_record(&header)?;

    for (host, row) in report.hosts().iter().zip(matrix.rows()) {
        let mut record: Vec<String> = Vec::with_capacity(row.len() + 1);
        record.push(host.ip_address.map(|ip| ip.to_string()).unwrap_or_default());
        record.extend(row.iter().map(|value| value.to_string()));
        writer.write_record(&record)?;
    }

    writer.flush().context("failed to write feature matrix")?;
    Ok(())
}
