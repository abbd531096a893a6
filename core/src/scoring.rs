//! The boundary with an external anomaly model.
//!
//! Hostrank does not ship a model. Anything implementing [`AnomalyModel`] can
//! be fitted on a report's matrix and used to score it; [`rank`] then orders
//! the hosts from most to least anomalous.

use hostrank_common::models::Host;
use tracing::{debug, info};

use crate::error::RankError;
use crate::matrix::FeatureMatrix;
use crate::report::Report;

/// An unsupervised outlier detector.
///
/// Higher scores mean more anomalous. Implementations are expected to be
/// deterministic for a fixed seed.
pub trait AnomalyModel {
    /// Feature names the model was trained on, if it was persisted with them.
    fn feature_names(&self) -> Option<&[String]> {
        None
    }

    fn fit(&mut self, matrix: &FeatureMatrix) -> anyhow::Result<()>;

    /// One score per matrix row.
    fn score(&self, matrix: &FeatureMatrix) -> anyhow::Result<Vec<f64>>;
}

/// A persisted model may only score reports built with the same features, in
/// the same order.
pub fn ensure_features_match(model: &[String], report: &[String]) -> Result<(), RankError> {
    if model == report {
        Ok(())
    } else {
        Err(RankError::FeatureMismatch {
            model: model.to_vec(),
            report: report.to_vec(),
        })
    }
}

/// One host with its position in the ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedHost<'a> {
    /// 1-based.
    pub rank: usize,
    pub score: f64,
    pub host: &'a Host,
    /// Feature name and value pairs, in column order.
    pub features: Vec<(String, f64)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Ranking<'a> {
    hosts: Vec<RankedHost<'a>>,
}

impl<'a> Ranking<'a> {
    /// Orders hosts by descending score. Equal scores keep report order.
    ///
    /// `limit` keeps only the top entries; `None` keeps every host.
    pub fn new(
        report: &'a Report,
        matrix: &FeatureMatrix,
        scores: &[f64],
        limit: Option<usize>,
    ) -> Result<Self, RankError> {
        let hosts: &[Host] = report.hosts();
        if scores.len() != hosts.len() {
            return Err(RankError::ScoreCount {
                scores: scores.len(),
                hosts: hosts.len(),
            });
        }

        let mut order: Vec<usize> = (0..hosts.len()).collect();
        order.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));
        let keep: usize = limit.unwrap_or(order.len());

        let names: Vec<String> = report.feature_names();
        let ranked: Vec<RankedHost<'a>> = order
            .into_iter()
            .take(keep)
            .enumerate()
            .map(|(position, index)| RankedHost {
                rank: position + 1,
                score: scores[index],
                host: &hosts[index],
                features: names
                    .iter()
                    .cloned()
                    .zip(matrix.row(index).unwrap_or_default().iter().copied())
                    .collect(),
            })
            .collect();

        Ok(Self { hosts: ranked })
    }

    pub fn hosts(&self) -> &[RankedHost<'a>] {
        &self.hosts
    }

    pub fn len(&self) -> usize {
        self.hosts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }
}

/// Builds the matrix, optionally fits `model` on it, and ranks the hosts by
/// the model's scores.
pub fn rank<'a>(
    report: &'a Report,
    model: &mut dyn AnomalyModel,
    fit: bool,
    limit: Option<usize>,
) -> Result<Ranking<'a>, RankError> {
    if report.hosts().is_empty() {
        return Err(RankError::EmptyReport);
    }

    if let Some(trained_on) = model.feature_names() {
        ensure_features_match(trained_on, &report.feature_names())?;
    }

    let matrix: FeatureMatrix = report.generate_matrix()?;
    if fit {
        info!(hosts = matrix.shape().0, "Fitting anomaly model");
        model.fit(&matrix)?;
    }

    let scores: Vec<f64> = model.score(&matrix)?;
    debug!(scores = scores.len(), "Scored hosts");
    Ranking::new(report, &matrix, &scores, limit)
}
