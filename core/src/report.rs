//! A host population plus the features registered to describe it.

use hostrank_common::models::Host;
use rayon::prelude::*;
use tracing::debug;

use crate::error::ReportError;
use crate::features::{self, Feature};
use crate::matrix::FeatureMatrix;

/// Counts shown to the user after ingestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSummary {
    pub number_of_hosts: usize,
    pub features: Vec<String>,
}

pub struct Report {
    hosts: Vec<Host>,
    features: Vec<Box<dyn Feature>>,
    parallel: bool,
}

impl Default for Report {
    fn default() -> Self {
        Self::new()
    }
}

impl Report {
    /// An empty report with no hosts and no features.
    pub fn new() -> Self {
        Self {
            hosts: Vec::new(),
            features: Vec::new(),
            parallel: true,
        }
    }

    /// An empty report carrying the standard feature catalog.
    pub fn with_default_features() -> Self {
        let mut report = Self::new();
        for feature in features::default_catalog() {
            report.add_feature(feature);
        }
        report
    }

    /// Controls whether feature columns are computed on the rayon pool.
    pub fn set_parallel(&mut self, parallel: bool) {
        self.parallel = parallel;
    }

    /// Registers a feature as the next matrix column.
    pub fn add_feature(&mut self, feature: Box<dyn Feature>) {
        self.features.push(feature);
    }

    /// Appends hosts, keeping their order. Duplicates are not merged.
    pub fn add_hosts(&mut self, hosts: impl IntoIterator<Item = Host>) {
        self.hosts.extend(hosts);
    }

    pub fn hosts(&self) -> &[Host] {
        &self.hosts
    }

    pub fn features(&self) -> &[Box<dyn Feature>] {
        &self.features
    }

    pub fn feature_names(&self) -> Vec<String> {
        self.features.iter().map(|f| f.name().to_string()).collect()
    }

    pub fn summary(&self) -> ReportSummary {
        ReportSummary {
            number_of_hosts: self.hosts.len(),
            features: self.feature_names(),
        }
    }

    /// Computes every registered feature over the full host list.
    ///
    /// Columns are computed independently, so they may run in parallel, but
    /// are always placed in registration order.
    pub fn generate_matrix(&self) -> Result<FeatureMatrix, ReportError> {
        let hosts: &[Host] = &self.hosts;
        let columns: Vec<Vec<f64>> = if self.parallel {
            self.features.par_iter().map(|f| f.compute(hosts)).collect()
        } else {
            self.features.iter().map(|f| f.compute(hosts)).collect()
        };

        for (feature, column) in self.features.iter().zip(&columns) {
            if column.len() != hosts.len() {
                return Err(ReportError::ColumnLength {
                    feature: feature.name().to_string(),
                    expected: hosts.len(),
                    actual: column.len(),
                });
            }
        }

        debug!(
            hosts = hosts.len(),
            features = columns.len(),
            parallel = self.parallel,
            "Generated feature matrix"
        );
        Ok(FeatureMatrix::from_columns(hosts.len(), &columns))
    }
}
