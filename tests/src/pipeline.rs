#![cfg(test)]
use std::net::Ipv4Addr;

use hostrank_core::error::RankError;
use hostrank_core::ingest::{HostLoader, StructuredAdapter, TabularAdapter};
use hostrank_core::matrix::FeatureMatrix;
use hostrank_core::report::Report;
use hostrank_core::scoring::{AnomalyModel, rank};

use crate::fixtures;

fn office_report() -> Report {
    let mut report = Report::with_default_features();
    report.add_hosts(StructuredAdapter.parse_str(fixtures::OFFICE_XML).unwrap());
    report
}

fn value(report: &Report, matrix: &FeatureMatrix, row: usize, feature: &str) -> f64 {
    let col: usize = report
        .feature_names()
        .iter()
        .position(|name| name == feature)
        .unwrap();
    matrix.get(row, col).unwrap()
}

/// Scores each host by one named column.
struct ByColumn {
    names: Vec<String>,
    column: &'static str,
}

impl AnomalyModel for ByColumn {
    fn feature_names(&self) -> Option<&[String]> {
        Some(self.names.as_slice())
    }

    fn fit(&mut self, _matrix: &FeatureMatrix) -> anyhow::Result<()> {
        Ok(())
    }

    fn score(&self, matrix: &FeatureMatrix) -> anyhow::Result<Vec<f64>> {
        let col = self
            .names
            .iter()
            .position(|name| name == self.column)
            .ok_or_else(|| anyhow::anyhow!("unknown column {}", self.column))?;
        Ok(matrix.column(col).unwrap_or_default())
    }
}

#[test]
fn office_matrix_values() {
    let report = office_report();
    let matrix = report.generate_matrix().unwrap();
    assert_eq!(matrix.shape(), (3, 20));

    let dc: usize = 0;
    assert_eq!(&matrix.row(dc).unwrap()[..4], &[192.0, 168.0, 1.0, 10.0]);
    assert_eq!(value(&report, &matrix, dc, "port_count"), 5.0);
    assert_eq!(value(&report, &matrix, dc, "open_port_count"), 5.0);
    assert_eq!(value(&report, &matrix, dc, "software_banner_count"), 4.0);
    assert_eq!(value(&report, &matrix, dc, "is_windows"), 1.0);
    assert_eq!(value(&report, &matrix, dc, "is_linux"), 0.0);
    assert_eq!(value(&report, &matrix, dc, "windows_domain_admin_count"), 4.0);
    assert_eq!(value(&report, &matrix, dc, "hostname_length"), 15.0);

    let web: usize = 1;
    assert_eq!(value(&report, &matrix, web, "http_server_count"), 1.0);
    assert_eq!(value(&report, &matrix, web, "database_count"), 1.0);
    assert_eq!(value(&report, &matrix, web, "is_linux"), 1.0);
    assert_eq!(value(&report, &matrix, web, "windows_domain_admin_count"), 0.0);

    let snmp: usize = 2;
    assert_eq!(value(&report, &matrix, snmp, "port_count"), 1.0);
    assert_eq!(value(&report, &matrix, snmp, "open_port_count"), 0.0);
    assert_eq!(value(&report, &matrix, snmp, "tcp_port_count"), 0.0);
    assert_eq!(value(&report, &matrix, snmp, "named_service_count"), 1.0);
    assert_eq!(value(&report, &matrix, snmp, "hostname_length"), 0.0);
    assert_eq!(value(&report, &matrix, snmp, "hostname_entropy"), 0.0);

    for row in matrix.rows() {
        assert!(row.iter().all(|v| v.is_finite() && *v >= 0.0));
    }
}

#[test]
fn both_input_formats_build_the_same_matrix() {
    let from_xml = office_report().generate_matrix().unwrap();

    let mut report = Report::with_default_features();
    report.add_hosts(TabularAdapter.parse_str(fixtures::OFFICE_CSV).unwrap());
    let from_csv = report.generate_matrix().unwrap();

    assert_eq!(from_xml, from_csv);
}

#[test]
fn merged_inputs_append_hosts() {
    let mut report = office_report();
    report.add_hosts(TabularAdapter.parse_str(fixtures::REGROUPED_CSV).unwrap());

    let summary = report.summary();
    assert_eq!(summary.number_of_hosts, 6);
    assert_eq!(summary.features.len(), 20);
    assert_eq!(report.generate_matrix().unwrap().shape(), (6, 20));
}

#[test]
fn ranking_orders_hosts_and_exposes_sorted_ports() {
    let report = office_report();
    let mut model = ByColumn {
        names: report.feature_names(),
        column: "windows_domain_admin_count",
    };

    let ranking = rank(&report, &mut model, true, Some(2)).unwrap();
    assert_eq!(ranking.len(), 2);

    let top = &ranking.hosts()[0];
    assert_eq!(top.rank, 1);
    assert_eq!(top.host.ip_address, Some(Ipv4Addr::new(192, 168, 1, 10)));
    assert_eq!(top.features.len(), 20);
    assert_eq!(top.features[0], ("ip_octet_0".to_string(), 192.0));

    let ports: Vec<u16> = top.host.sorted_ports().iter().map(|p| p.number).collect();
    assert_eq!(ports, vec![53, 88, 389, 445, 3389]);

    // web01 and the SNMP device tie at zero; report order decides.
    assert_eq!(
        ranking.hosts()[1].host.ip_address,
        Some(Ipv4Addr::new(192, 168, 1, 20))
    );
}

#[test]
fn model_trained_on_other_features_is_refused() {
    let report = office_report();
    let mut names = report.feature_names();
    names.swap(0, 1);
    let mut model = ByColumn {
        names,
        column: "port_count",
    };

    assert!(matches!(
        rank(&report, &mut model, false, None),
        Err(RankError::FeatureMismatch { .. })
    ));
}

#[test]
fn empty_inputs_leave_nothing_to_rank() {
    let mut report = Report::with_default_features();
    report.add_hosts(TabularAdapter.parse_str("ipv4,port\n").unwrap());
    let mut model = ByColumn {
        names: report.feature_names(),
        column: "port_count",
    };

    assert!(matches!(
        rank(&report, &mut model, true, None),
        Err(RankError::EmptyReport)
    ));
}
